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

//! hashedrekord entry models, after
//! <https://github.com/sigstore/rekor/blob/main/pkg/types/hashedrekord/v0.0.1/hashedrekord_v0_0_1_schema.json>

use serde::{Deserialize, Serialize};

/// Stores the Signature and Data struct
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HashedRekord {
    #[serde(rename = "signature", default)]
    pub signature: Signature,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
}

/// Stores the signature format, signature of the artifact and the PublicKey struct
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
}

/// Stores the public key (or certificate) used to sign the artifact
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Base64 of the PEM-encoded key or certificate.
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Stores the hash of the signed artifact
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Data {
    #[serde(rename = "hash", skip_serializing_if = "Option::is_none")]
    pub hash: Option<Hash>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hash {
    #[serde(rename = "algorithm")]
    pub algorithm: String,
    #[serde(rename = "value")]
    pub value: String,
}
