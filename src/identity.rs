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

//! Asserting who a signing certificate was issued to.

use serde::Serialize;
use tracing::debug;
use x509_cert::Certificate;

use crate::config::VerifierConfig;
use crate::crypto::{require_field, FulcioField};
use crate::errors::{ProvenanceError, Result};

/// The facts of a Fulcio certificate trust decisions are made on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunIdentity {
    pub issuer: String,
    pub source_repository_uri: String,
    /// Names exactly one CI execution.
    pub run_invocation_uri: String,
}

/// Checks certificates against the identity provider and source host the
/// deployment trusts.
///
/// Values are compared byte for byte. No case folding, trailing slash
/// stripping or other normalization is applied to either side.
#[derive(Clone, Debug)]
pub struct IdentityVerifier {
    expected_issuer: String,
    source_host: String,
}

impl IdentityVerifier {
    pub fn new(expected_issuer: impl Into<String>, source_host: impl Into<String>) -> Self {
        Self {
            expected_issuer: expected_issuer.into(),
            source_host: source_host.into(),
        }
    }

    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(&config.expected_issuer, &config.source_host)
    }

    /// The source repository URI a certificate must carry for `repository`
    /// (`owner/name`).
    pub fn expected_repository_uri(&self, repository: &str) -> String {
        format!("https://{}/{}", self.source_host, repository)
    }

    /// Verifies `cert` was issued by the expected provider for
    /// `expected_repository`, and returns its full run identity.
    pub fn verify(&self, cert: &Certificate, expected_repository: &str) -> Result<RunIdentity> {
        let issuer = require_field(cert, FulcioField::Issuer)?;
        ensure_equal(FulcioField::Issuer, &self.expected_issuer, &issuer)?;

        let source_repository_uri = require_field(cert, FulcioField::SourceRepositoryUri)?;
        let expected_uri = self.expected_repository_uri(expected_repository);
        ensure_equal(
            FulcioField::SourceRepositoryUri,
            &expected_uri,
            &source_repository_uri,
        )?;

        let run_invocation_uri = require_field(cert, FulcioField::RunInvocationUri)?;
        debug!(%issuer, %source_repository_uri, %run_invocation_uri, "certificate identity verified");

        Ok(RunIdentity {
            issuer,
            source_repository_uri,
            run_invocation_uri,
        })
    }
}

fn ensure_equal(field: FulcioField, expected: &str, actual: &str) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(ProvenanceError::IdentityMismatch {
        field: field.name().to_owned(),
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    })
}
