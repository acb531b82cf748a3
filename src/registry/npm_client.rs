//
// Copyright 2025 The Sigstore Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use tracing::debug;

use super::{AttestationSource, Attestation, AttestationsResponse, PackageSpec};
use crate::config::VerifierConfig;
use crate::errors::{ProvenanceError, Result};

/// Reads attestations from an npm registry.
pub struct NpmRegistryClient {
    base_url: String,
    client: reqwest::Client,
}

impl NpmRegistryClient {
    /// Requests use the default timeout of [`VerifierConfig`].
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&VerifierConfig {
            registry_url: base_url.to_owned(),
            ..Default::default()
        })
    }

    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        Ok(Self::with_client(&config.registry_url, config.http_client()?))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    pub fn attestations_url(&self, package: &PackageSpec) -> String {
        format!(
            "{}/-/npm/v1/attestations/{}@{}",
            self.base_url,
            package.escaped_name(),
            package.version()
        )
    }
}

#[async_trait]
impl AttestationSource for NpmRegistryClient {
    async fn fetch_attestations(&self, package: &PackageSpec) -> Result<Vec<Attestation>> {
        let url = self.attestations_url(package);
        debug!(%url, "fetching attestations");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProvenanceError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvenanceError::network(&url, status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProvenanceError::network(&url, e))?;
        let parsed: AttestationsResponse =
            serde_json::from_str(&body).map_err(|e| ProvenanceError::malformed(&url, e))?;

        Ok(parsed.attestations)
    }
}
