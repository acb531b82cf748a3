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

//! Attestations as served by `GET /-/npm/v1/attestations/{name}@{version}`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use x509_cert::Certificate;

use super::PackageSpec;
use crate::bundle::SignedBundle;
use crate::crypto::{require_field, FulcioField};
use crate::errors::{ProvenanceError, Result};

/// SLSA provenance v0.2 predicate type.
pub const SLSA_PROVENANCE_V0_2: &str = "https://slsa.dev/provenance/v0.2";

/// SLSA provenance v1 predicate type.
pub const SLSA_PROVENANCE_V1: &str = "https://slsa.dev/provenance/v1";

/// Predicate types accepted as build provenance.
pub const PROVENANCE_PREDICATE_TYPES: [&str; 2] = [SLSA_PROVENANCE_V1, SLSA_PROVENANCE_V0_2];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttestationsResponse {
    #[serde(default)]
    pub attestations: Vec<Attestation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    pub predicate_type: String,
    pub bundle: SignedBundle,
}

/// The signer of a provenance attestation and the CI run it names.
#[derive(Clone, Debug, PartialEq)]
pub struct ProvenanceSigner {
    pub certificate: Certificate,
    pub run_invocation_uri: String,
}

impl Attestation {
    pub fn is_provenance(&self) -> bool {
        PROVENANCE_PREDICATE_TYPES.contains(&self.predicate_type.as_str())
    }

    /// Extracts the bundle's leaf certificate and its run invocation URI.
    pub fn signer(&self) -> Result<ProvenanceSigner> {
        let certificate = self.bundle.leaf_certificate()?;
        let run_invocation_uri = require_field(&certificate, FulcioField::RunInvocationUri)?;
        Ok(ProvenanceSigner {
            certificate,
            run_invocation_uri,
        })
    }
}

/// Returns the first build provenance attestation in `attestations`.
///
/// Having none is a failure naming the predicate types that were found.
pub fn select_provenance<'a>(
    package: &PackageSpec,
    attestations: &'a [Attestation],
) -> Result<&'a Attestation> {
    match attestations.iter().find(|a| a.is_provenance()) {
        Some(attestation) => {
            debug!(%package, predicate_type = %attestation.predicate_type, "selected provenance attestation");
            Ok(attestation)
        }
        None => Err(ProvenanceError::MissingAttestation {
            package: package.to_string(),
            expected: PROVENANCE_PREDICATE_TYPES.iter().map(|t| t.to_string()).collect(),
            available: attestations.iter().map(|a| a.predicate_type.clone()).collect(),
        }),
    }
}
