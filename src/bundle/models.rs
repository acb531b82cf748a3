// Copyright 2023 The Sigstore Authors.
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

//! The parts of a Sigstore bundle this crate reads.
//!
//! Only the certificate material is modelled. Everything else (DSSE
//! envelope, tlog entries, timestamps) is kept verbatim so a
//! [`BundleVerifier`](super::BundleVerifier) can hand the whole bundle to a
//! full Sigstore implementation.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use x509_cert::Certificate;

use crate::crypto::certificate;
use crate::errors::{ProvenanceError, Result};

// Known Sigstore bundle media types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    Bundle0_1,
    Bundle0_2,
    Bundle0_3,
}

impl Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match &self {
            Version::Bundle0_1 => "application/vnd.dev.sigstore.bundle+json;version=0.1",
            Version::Bundle0_2 => "application/vnd.dev.sigstore.bundle+json;version=0.2",
            Version::Bundle0_3 => "application/vnd.dev.sigstore.bundle.v0.3+json",
        })
    }
}

impl FromStr for Version {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "application/vnd.dev.sigstore.bundle+json;version=0.1" => Ok(Version::Bundle0_1),
            "application/vnd.dev.sigstore.bundle+json;version=0.2" => Ok(Version::Bundle0_2),
            "application/vnd.dev.sigstore.bundle.v0.3+json"
            | "application/vnd.dev.sigstore.bundle+json;version=0.3" => Ok(Version::Bundle0_3),
            _ => Err(()),
        }
    }
}

/// A signed Sigstore bundle as served by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedBundle {
    #[serde(default)]
    pub media_type: String,
    #[serde(default)]
    pub verification_material: VerificationMaterial,
    #[serde(flatten)]
    pub content: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMaterial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x509_certificate_chain: Option<X509CertificateChain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<X509Certificate>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct X509CertificateChain {
    #[serde(default)]
    pub certificates: Vec<X509Certificate>,
}

/// A base64-encoded DER certificate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct X509Certificate {
    pub raw_bytes: String,
}

impl SignedBundle {
    pub fn version(&self) -> Option<Version> {
        Version::from_str(&self.media_type).ok()
    }

    /// Parses the certificate chain, leaf first.
    ///
    /// Bundle 0.1 ships a chain; later versions ship the leaf alone.
    pub fn certificate_chain(&self) -> Result<Vec<Certificate>> {
        let material = &self.verification_material;
        let encoded: Vec<&X509Certificate> = match (&material.x509_certificate_chain, &material.certificate) {
            (Some(chain), _) if !chain.certificates.is_empty() => chain.certificates.iter().collect(),
            (_, Some(cert)) => vec![cert],
            _ => {
                return Err(ProvenanceError::MalformedCertificate(
                    "bundle does not contain any certificates".to_owned(),
                ))
            }
        };

        encoded
            .into_iter()
            .map(|c| certificate::from_base64_der(&c.raw_bytes))
            .collect()
    }

    /// The signing certificate: first element of the chain.
    pub fn leaf_certificate(&self) -> Result<Certificate> {
        let mut chain = self.certificate_chain()?;
        // certificate_chain never returns an empty list
        Ok(chain.swap_remove(0))
    }
}
