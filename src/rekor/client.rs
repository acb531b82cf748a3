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

//! Transparency log client trait.

use async_trait::async_trait;

use crate::errors::Result;
use crate::rekor::models::log_entry::LogEntry;

/// Read access to a transparency log.
///
/// Implementations:
/// - [`RekorV1Client`](crate::rekor::client_v1::RekorV1Client): Uses the Rekor v1 index and entries endpoints
#[async_trait]
pub trait TransparencyLog: Send + Sync {
    /// Look up the entries recorded for an artifact by its hex SHA-256 digest.
    ///
    /// An empty result is a hard failure
    /// ([`EmptyTransparencyLog`](crate::errors::ProvenanceError::EmptyTransparencyLog)):
    /// implementations never return an empty list.
    async fn search_by_digest(&self, hex_digest: &str) -> Result<Vec<String>>;

    /// Fetch one entry by the identifier returned from [`search_by_digest`](Self::search_by_digest).
    async fn get_entry(&self, uuid: &str) -> Result<LogEntry>;

    /// Get the base URL of this log instance.
    fn base_url(&self) -> &str;
}
