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

//! The errors that can be raised while verifying binary provenance.
//!
//! Every variant is terminal: the caller must treat any of them as
//! "do not install this artifact".

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvenanceError>;

/// Why a network call did not produce a usable response.
#[derive(Error, Debug)]
pub enum NetworkErrorKind {
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for NetworkErrorKind {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkErrorKind::Timeout
        } else if let Some(status) = err.status() {
            NetworkErrorKind::Status(status)
        } else {
            NetworkErrorKind::Transport(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("request to {url} failed: {kind}")]
    NetworkFailure {
        url: String,
        #[source]
        kind: NetworkErrorKind,
    },

    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error(
        "no provenance attestation found for {package} (expected one of {expected:?}, got {available:?})"
    )]
    MissingAttestation {
        package: String,
        expected: Vec<String>,
        available: Vec<String>,
    },

    #[error("certificate has no {field} extension (looked for {oids})")]
    MissingExtension { field: String, oids: String },

    #[error("certificate's {field} does not match (got {actual}, expected {expected})")]
    IdentityMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error(
        "artifact digest {digest} has no entry in the transparency log; the binary may have been tampered with"
    )]
    EmptyTransparencyLog { digest: String },

    #[error("unsupported transparency log entry type: {kind}")]
    UnsupportedEntryKind { kind: String },

    #[error("transparency log entry {uuid} is malformed: {reason}")]
    MalformedLogEntry { uuid: String, reason: String },

    #[error(
        "none of the {candidates} transparency log entries was produced by run {expected} for the expected identity"
    )]
    RunMismatch { expected: String, candidates: usize },

    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    #[error("bundle verification failed: {0}")]
    BundleVerification(String),

    #[error("invalid package: {0}")]
    InvalidPackage(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse URL: {0}")]
    UrlParseError(#[from] url::ParseError),
}

impl ProvenanceError {
    pub(crate) fn network(url: impl Into<String>, kind: impl Into<NetworkErrorKind>) -> Self {
        ProvenanceError::NetworkFailure {
            url: url.into(),
            kind: kind.into(),
        }
    }

    pub(crate) fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        ProvenanceError::MalformedResponse {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::StatusCode> for NetworkErrorKind {
    fn from(status: reqwest::StatusCode) -> Self {
        NetworkErrorKind::Status(status)
    }
}
