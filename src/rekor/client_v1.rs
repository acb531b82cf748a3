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

//! Rekor v1 API client implementation.

use async_trait::async_trait;
use tracing::debug;

use super::apis::configuration::Configuration;
use super::apis::{entries_api, index_api};
use super::client::TransparencyLog;
use crate::config::VerifierConfig;
use crate::errors::{ProvenanceError, Result};
use crate::rekor::models::{log_entry::LogEntry, SearchIndex};

/// Rekor v1 API client.
///
/// Searches with `POST /api/v1/index/retrieve` and reads entries with
/// `GET /api/v1/log/entries/{uuid}`. Failed requests are never retried.
pub struct RekorV1Client {
    config: Configuration,
}

impl RekorV1Client {
    /// Create a new Rekor v1 client for the given base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the Rekor instance (e.g., <https://rekor.sigstore.dev>)
    ///
    /// Requests use the default timeout of [`VerifierConfig`].
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&VerifierConfig {
            rekor_url: base_url.to_owned(),
            ..Default::default()
        })
    }

    /// Targets `config.rekor_url` with the timeout and user agent of `config`.
    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        Ok(Self::with_client(&config.rekor_url, config.http_client()?))
    }

    /// Like [`new`](Self::new), sending requests through `client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            config: Configuration::with_client(base_url, client),
        }
    }
}

#[async_trait]
impl TransparencyLog for RekorV1Client {
    async fn search_by_digest(&self, hex_digest: &str) -> Result<Vec<String>> {
        let query = SearchIndex::sha256(hex_digest);
        let hash = query.hash.clone().unwrap_or_default();

        let uuids = index_api::search_index(&self.config, query)
            .await
            .map_err(|e| e.into_provenance_error(&index_api::search_index_uri(&self.config)))?;
        debug!(%hash, count = uuids.len(), "searched transparency log");

        if uuids.is_empty() {
            return Err(ProvenanceError::EmptyTransparencyLog { digest: hash });
        }
        Ok(uuids)
    }

    async fn get_entry(&self, uuid: &str) -> Result<LogEntry> {
        entries_api::get_log_entry_by_uuid(&self.config, uuid)
            .await
            .map_err(|e| e.into_provenance_error(&entries_api::log_entry_uri(&self.config, uuid)))
    }

    fn base_url(&self) -> &str {
        &self.config.base_path
    }
}
