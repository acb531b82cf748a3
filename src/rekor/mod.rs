//
// Copyright 2021 The Sigstore Authors.
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

//! Read-only client for Rekor <https://github.com/sigstore/rekor>.
//!
//! Rekor is a cryptographically secure, immutable transparency log for signed software releases.
//! Only the two calls needed to cross-reference an artifact are implemented:
//!
//! - search_index (`POST /api/v1/index/retrieve`)
//! - get_log_entry_by_uuid (`GET /api/v1/log/entries/{entryUUID}`)
//!
//! ```no_run
//! use binary_provenance::rekor::{RekorV1Client, TransparencyLog};
//!
//! # async fn run() -> binary_provenance::errors::Result<()> {
//! let rekor = RekorV1Client::new("https://rekor.sigstore.dev")?;
//! let digest = "c7ab1a0cb7d8e1a5b7a0b1f3f05a4cf0e1b6a2f5a0e2d1c3b4a5968778695a4b";
//! for uuid in rekor.search_by_digest(digest).await? {
//!     let entry = rekor.get_entry(&uuid).await?;
//!     println!("{} integrated at {}", entry.uuid, entry.integrated_time);
//! }
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod client;
pub mod client_v1;
pub mod models;
pub mod resolver;

pub use client::TransparencyLog;
pub use client_v1::RekorV1Client;
pub use resolver::{resolve_certificate, LogEntryBody};
