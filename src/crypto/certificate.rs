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

use base64::{engine::general_purpose::STANDARD as base64, Engine as _};
use const_oid::db::rfc5912::ID_KP_CODE_SIGNING;
use thiserror::Error;
use x509_cert::{
    der::Decode,
    ext::pkix::{constraints, ExtendedKeyUsage, KeyUsage},
    Certificate,
};

use crate::errors::{ProvenanceError, Result};

#[derive(Error, Debug)]
pub enum CertificateValidationError {
    #[error("only X.509 V3 certificates are supported")]
    VersionUnsupported,

    #[error("malformed certificate")]
    Malformed(#[source] x509_cert::der::Error),

    #[error("invalid signing cert: {0}")]
    InvalidLeaf(&'static str),

    #[error("invalid X.509 certificate: {0}")]
    InvalidCa(String),
}

impl From<x509_cert::der::Error> for CertificateValidationError {
    fn from(value: x509_cert::der::Error) -> Self {
        CertificateValidationError::Malformed(value)
    }
}

/// Parses a DER-encoded certificate.
pub fn from_der(der: &[u8]) -> Result<Certificate> {
    Certificate::from_der(der).map_err(|e| ProvenanceError::MalformedCertificate(e.to_string()))
}

/// Parses a base64 string holding a DER certificate, the form used by
/// bundle `rawBytes` fields.
pub fn from_base64_der(encoded: &str) -> Result<Certificate> {
    let der = base64
        .decode(encoded.trim())
        .map_err(|e| ProvenanceError::MalformedCertificate(format!("invalid base64: {e}")))?;
    from_der(&der)
}

/// Parses a base64 string holding a PEM certificate, the form Rekor stores
/// verifiers and public keys in. Bare DER inside the base64 is accepted too.
pub fn from_base64_pem(encoded: &str) -> Result<Certificate> {
    let decoded = base64
        .decode(encoded.trim())
        .map_err(|e| ProvenanceError::MalformedCertificate(format!("invalid base64: {e}")))?;

    match pem::parse(&decoded) {
        Ok(pem) if pem.tag() == "CERTIFICATE" => from_der(pem.contents()),
        Ok(pem) => Err(ProvenanceError::MalformedCertificate(format!(
            "expected a CERTIFICATE PEM block, got {}",
            pem.tag()
        ))),
        Err(_) => from_der(&decoded),
    }
}

/// Check if the given certificate is a leaf in the context of the Sigstore profile.
///
/// * It is not a root or intermediate CA;
/// * It has `keyUsage.digitalSignature`
/// * It has `CODE_SIGNING` as an `ExtendedKeyUsage`.
///
/// This function does not evaluate the trustworthiness of the certificate.
pub(crate) fn is_leaf(certificate: &Certificate) -> std::result::Result<(), CertificateValidationError> {
    let tbs = &certificate.tbs_certificate;

    if tbs.version != x509_cert::Version::V3 {
        return Err(CertificateValidationError::VersionUnsupported);
    }

    if is_ca(certificate)? {
        return Err(CertificateValidationError::InvalidLeaf("certificate is a CA"));
    };

    let digital_signature = match tbs.get::<KeyUsage>()? {
        None => return Err(CertificateValidationError::InvalidLeaf("missing KeyUsage")),
        Some((_, key_usage)) => key_usage.digital_signature(),
    };

    if !digital_signature {
        return Err(CertificateValidationError::InvalidLeaf(
            "missing digital signature usage",
        ));
    }

    let extended_key_usage = match tbs.get::<ExtendedKeyUsage>()? {
        None => {
            return Err(CertificateValidationError::InvalidLeaf(
                "missing ExtendedKeyUsage",
            ))
        }
        Some((_, extended_key_usage)) => extended_key_usage,
    };

    if !extended_key_usage.0.contains(&ID_KP_CODE_SIGNING) {
        return Err(CertificateValidationError::InvalidLeaf(
            "missing CODE_SIGNING ExtendedKeyUsage",
        ));
    }

    Ok(())
}

/// Checks if the given `certificate` is a CA certificate.
///
/// This does **not** indicate trustworthiness of the given `certificate`, only if it has the
/// appropriate interior state. Use [`is_leaf`] to decide whether a certificate is a signer.
pub(crate) fn is_ca(certificate: &Certificate) -> std::result::Result<bool, CertificateValidationError> {
    let tbs = &certificate.tbs_certificate;

    if tbs.version != x509_cert::Version::V3 {
        return Err(CertificateValidationError::VersionUnsupported);
    }

    // Valid CA certificates must have both `KeyUsage.keyCertSign` and
    // `BasicConstraints.ca`. Any other combination is inconsistent.
    let ca = match tbs.get::<constraints::BasicConstraints>()? {
        None => return Ok(false),
        Some((false, _)) => {
            // RFC 5280 4.2.1.9
            return Err(CertificateValidationError::InvalidCa(
                "non-critical BasicConstraints in CA".to_owned(),
            ));
        }
        Some((true, v)) => v.ca,
    };

    let key_cert_sign = match tbs.get::<KeyUsage>()? {
        None => {
            return Err(CertificateValidationError::InvalidCa(
                "missing KeyUsage".to_owned(),
            ))
        }
        Some((_, v)) => v.key_cert_sign(),
    };

    if ca && key_cert_sign {
        return Ok(true);
    }

    if !(ca || key_cert_sign) {
        return Ok(false);
    }

    Err(CertificateValidationError::InvalidCa(format!(
        "invalid certificate states: KeyUsage.keyCertSign={}, BasicConstraints.ca={}",
        key_cert_sign, ca
    )))
}

/// Returns `true` if and only if the given certificate is a self-issued CA.
pub(crate) fn is_root_ca(certificate: &Certificate) -> std::result::Result<bool, CertificateValidationError> {
    if !is_ca(certificate)? {
        return Ok(false);
    }

    let tbs = &certificate.tbs_certificate;
    Ok(tbs.issuer == tbs.subject)
}
