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

//! DSSE entry models for Rekor transparency log.
//!
//! This module was manually created based on the Rekor DSSE type specification.
//! The upstream JSON schema can be found at:
//! <https://github.com/sigstore/rekor/blob/main/pkg/types/dsse/v0.0.1/dsse_v0_0_1_schema.json>
//!
//! Only the shape Rekor stores after integration is modelled, not the
//! `proposedContent` a client submits.

use serde::{Deserialize, Serialize};

use super::hashedrekord::Hash;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Dsse {
    #[serde(rename = "signatures", default)]
    pub signatures: Vec<Signature>,
    #[serde(rename = "envelopeHash", skip_serializing_if = "Option::is_none")]
    pub envelope_hash: Option<Hash>,
    #[serde(rename = "payloadHash", skip_serializing_if = "Option::is_none")]
    pub payload_hash: Option<Hash>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(rename = "signature", skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Base64 of the PEM-encoded signing certificate.
    #[serde(rename = "verifier", skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
}
