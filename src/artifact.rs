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

//! Downloading and hashing the artifact under verification.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::VerifierConfig;
use crate::errors::{ProvenanceError, Result};

/// An artifact exactly as downloaded, together with its SHA-256 digest.
///
/// The digest covers the compressed bytes: the transparency log records the
/// artifact as published, not its unpacked contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub bytes: Vec<u8>,
    /// Lowercase hex, without algorithm prefix.
    pub digest: String,
}

impl DownloadedArtifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        let digest = hex::encode(Sha256::digest(&bytes));
        Self { bytes, digest }
    }
}

/// Retrieves an artifact with a single request.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<DownloadedArtifact>;
}

/// Downloads artifacts over HTTP(S). Any non-2xx response is a failure.
pub struct HttpArtifactFetcher {
    client: reqwest::Client,
}

impl HttpArtifactFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Downloads with the timeout and user agent of `config`.
    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        Ok(Self::new(config.http_client()?))
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    async fn fetch(&self, url: &str) -> Result<DownloadedArtifact> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProvenanceError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvenanceError::network(url, status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProvenanceError::network(url, e))?;
        let artifact = DownloadedArtifact::new(bytes.to_vec());
        debug!(url, size = artifact.bytes.len(), digest = %artifact.digest, "downloaded artifact");

        Ok(artifact)
    }
}
