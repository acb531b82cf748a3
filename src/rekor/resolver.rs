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

//! Recovering the signing certificate from a log entry body.

use base64::{engine::general_purpose::STANDARD as base64, Engine as _};
use serde::Deserialize;
use x509_cert::Certificate;

use super::models::{log_entry::LogEntry, Dsse, HashedRekord};
use crate::crypto::certificate;
use crate::errors::{ProvenanceError, Result};

/// The decoded body of a log entry.
///
/// Only the two entry kinds artifacts get logged as are understood; any
/// other kind is rejected when decoding.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEntryBody {
    Dsse(Dsse),
    HashedRekord(HashedRekord),
}

#[derive(Deserialize)]
struct RawBody {
    kind: String,
    spec: serde_json::Value,
}

impl LogEntryBody {
    pub fn decode(entry: &LogEntry) -> Result<Self> {
        let malformed = |reason: String| ProvenanceError::MalformedLogEntry {
            uuid: entry.uuid.clone(),
            reason,
        };

        let json = base64
            .decode(entry.body.trim())
            .map_err(|e| malformed(format!("body is not base64: {e}")))?;
        let raw: RawBody = serde_json::from_slice(&json)
            .map_err(|e| malformed(format!("body is not a log entry: {e}")))?;

        match raw.kind.as_str() {
            "dsse" => serde_json::from_value(raw.spec)
                .map(LogEntryBody::Dsse)
                .map_err(|e| malformed(format!("invalid dsse spec: {e}"))),
            "hashedrekord" => serde_json::from_value(raw.spec)
                .map(LogEntryBody::HashedRekord)
                .map_err(|e| malformed(format!("invalid hashedrekord spec: {e}"))),
            _ => Err(ProvenanceError::UnsupportedEntryKind { kind: raw.kind }),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LogEntryBody::Dsse(_) => "dsse",
            LogEntryBody::HashedRekord(_) => "hashedrekord",
        }
    }

    /// The base64 PEM certificate the entry was signed with.
    fn encoded_certificate(&self) -> Result<&str> {
        let found = match self {
            LogEntryBody::Dsse(dsse) => dsse
                .signatures
                .first()
                .and_then(|sig| sig.verifier.as_deref()),
            LogEntryBody::HashedRekord(rekord) => rekord
                .signature
                .public_key
                .as_ref()
                .and_then(|key| key.content.as_deref()),
        };

        found.ok_or_else(|| ProvenanceError::UnsupportedEntryKind {
            kind: match self {
                LogEntryBody::Dsse(_) => "dsse without signatures[0].verifier".to_owned(),
                LogEntryBody::HashedRekord(_) => {
                    "hashedrekord without signature.publicKey.content".to_owned()
                }
            },
        })
    }

    pub fn certificate(&self) -> Result<Certificate> {
        certificate::from_base64_pem(self.encoded_certificate()?)
    }
}

/// Decodes `entry` and parses the certificate it was signed with.
pub fn resolve_certificate(entry: &LogEntry) -> Result<Certificate> {
    LogEntryBody::decode(entry)?.certificate()
}
