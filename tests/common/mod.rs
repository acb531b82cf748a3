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

//! Fixtures shared by the integration tests: Fulcio-shaped certificates and
//! the JSON documents registry and Rekor serve.

#![allow(dead_code)]

use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as base64, Engine as _};
use const_oid::{
    db::rfc5912::{ECDSA_WITH_SHA_256, ID_EC_PUBLIC_KEY, ID_KP_CODE_SIGNING},
    AssociatedOid, ObjectIdentifier,
};
use serde_json::{json, Value};
use x509_cert::{
    der::{
        asn1::{BitString, OctetString, Utf8StringRef},
        Encode, EncodePem,
    },
    ext::{
        pkix::{constraints::BasicConstraints, ExtendedKeyUsage, KeyUsage, KeyUsages},
        Extension,
    },
    name::Name,
    serial_number::SerialNumber,
    spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned},
    time::Validity,
    Certificate, TbsCertificate, Version,
};

use binary_provenance::crypto::extensions::{
    OIDC_ISSUER_V2_OID, RUN_INVOCATION_URI_OID, SOURCE_REPOSITORY_URI_OID,
};

pub const ISSUER: &str = "https://token.actions.githubusercontent.com";
pub const REPOSITORY: &str = "octo-org/octo-bin";
pub const REPOSITORY_URI: &str = "https://github.com/octo-org/octo-bin";
pub const RUN: &str = "https://github.com/octo-org/octo-bin/actions/runs/1234567890/attempts/1";
pub const OTHER_RUN: &str = "https://github.com/octo-org/octo-bin/actions/runs/42/attempts/2";

fn der_utf8(value: &str) -> Vec<u8> {
    Utf8StringRef::new(value)
        .and_then(|s| s.to_der())
        .expect("cannot encode UTF8String")
}

fn extension<T: Encode + AssociatedOid>(critical: bool, value: T) -> Extension {
    Extension {
        extn_id: T::OID,
        critical,
        extn_value: OctetString::new(value.to_der().expect("cannot encode extension"))
            .expect("cannot build OCTET STRING"),
    }
}

/// A leaf certificate as Fulcio issues it to a GitHub Actions run. It
/// carries a dummy signature. Same shape as the leaves built by the unit
/// tests' `generate_certificate`.
pub fn fulcio_leaf(issuer: &str, repository_uri: &str, run: &str) -> Certificate {
    let fulcio: [(ObjectIdentifier, &str); 3] = [
        (OIDC_ISSUER_V2_OID, issuer),
        (SOURCE_REPOSITORY_URI_OID, repository_uri),
        (RUN_INVOCATION_URI_OID, run),
    ];

    let mut extensions = vec![
        extension(
            true,
            BasicConstraints {
                ca: false,
                path_len_constraint: None,
            },
        ),
        extension(true, KeyUsage(KeyUsages::DigitalSignature.into())),
        extension(false, ExtendedKeyUsage(vec![ID_KP_CODE_SIGNING])),
    ];
    for (oid, value) in fulcio {
        extensions.push(Extension {
            extn_id: oid,
            critical: false,
            extn_value: OctetString::new(der_utf8(value)).expect("cannot build OCTET STRING"),
        });
    }

    let signature_algorithm = AlgorithmIdentifierOwned {
        oid: ECDSA_WITH_SHA_256,
        parameters: None,
    };

    Certificate {
        tbs_certificate: TbsCertificate {
            version: Version::V3,
            serial_number: SerialNumber::new(&[0x01, 0x02, 0x03]).expect("valid serial"),
            signature: signature_algorithm.clone(),
            issuer: Name::from_str("CN=sigstore-intermediate,O=sigstore.dev").expect("valid name"),
            validity: Validity::from_now(Duration::from_secs(600)).expect("valid validity"),
            subject: Name::from_str("CN=sigstore.test,O=tests").expect("valid name"),
            subject_public_key_info: SubjectPublicKeyInfoOwned {
                algorithm: AlgorithmIdentifierOwned {
                    oid: ID_EC_PUBLIC_KEY,
                    parameters: None,
                },
                subject_public_key: BitString::from_bytes(&[0x04; 65]).expect("valid key"),
            },
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: Some(extensions),
        },
        signature_algorithm,
        signature: BitString::from_bytes(&[0x30, 0x00]).expect("valid signature"),
    }
}

pub fn good_leaf(run: &str) -> Certificate {
    fulcio_leaf(ISSUER, REPOSITORY_URI, run)
}

pub fn base64_der(cert: &Certificate) -> String {
    base64.encode(cert.to_der().expect("cannot encode certificate"))
}

pub fn base64_pem(cert: &Certificate) -> String {
    base64.encode(
        cert.to_pem(x509_cert::der::pem::LineEnding::LF)
            .expect("cannot encode certificate"),
    )
}

/// `GET /-/npm/v1/attestations/...` response with an npm publish
/// attestation followed by a provenance attestation signed by `leaf`.
pub fn attestations_response(predicate_type: &str, leaf: &Certificate) -> Value {
    json!({
        "attestations": [
            {
                "predicateType": "https://github.com/npm/attestation/tree/main/specs/publish/v0.1",
                "bundle": {
                    "mediaType": "application/vnd.dev.sigstore.bundle+json;version=0.2",
                    "verificationMaterial": {
                        "publicKey": {"hint": "SHA256:jl3bwswu80PjjokCgh0o2w5c2U4LhQAE57gj9cz1kzA"},
                        "tlogEntries": []
                    },
                    "dsseEnvelope": {"payload": "e30=", "payloadType": "application/vnd.in-toto+json", "signatures": []}
                }
            },
            {
                "predicateType": predicate_type,
                "bundle": {
                    "mediaType": "application/vnd.dev.sigstore.bundle+json;version=0.2",
                    "verificationMaterial": {
                        "x509CertificateChain": {"certificates": [{"rawBytes": base64_der(leaf)}]},
                        "tlogEntries": []
                    },
                    "dsseEnvelope": {
                        "payload": "e30=",
                        "payloadType": "application/vnd.in-toto+json",
                        "signatures": [{"sig": "c2ln", "keyid": ""}]
                    }
                }
            }
        ]
    })
}

fn log_entry(uuid: &str, body: Value) -> Value {
    let mut response = serde_json::Map::new();
    response.insert(
        uuid.to_owned(),
        json!({
            "body": base64.encode(body.to_string()),
            "integratedTime": 1700000000,
            "logID": "c0d23d6ad406973f9559f3ba2d1ca01f84147d8ffc5b8445c224f98b9591801d",
            "logIndex": 1234,
            "verification": {"signedEntryTimestamp": "MEUCIQ=="}
        }),
    );
    Value::Object(response)
}

/// `GET /api/v1/log/entries/{uuid}` response for a dsse entry signed by `cert`.
pub fn dsse_entry(uuid: &str, cert: &Certificate) -> Value {
    log_entry(
        uuid,
        json!({
            "apiVersion": "0.0.1",
            "kind": "dsse",
            "spec": {
                "envelopeHash": {"algorithm": "sha256", "value": "aa"},
                "payloadHash": {"algorithm": "sha256", "value": "bb"},
                "signatures": [{"signature": "c2ln", "verifier": base64_pem(cert)}]
            }
        }),
    )
}

/// Same for a hashedrekord entry; `None` leaves out `publicKey`.
pub fn hashedrekord_entry(uuid: &str, cert: Option<&Certificate>) -> Value {
    let mut signature = json!({"content": "c2ln"});
    if let Some(cert) = cert {
        signature["publicKey"] = json!({"content": base64_pem(cert)});
    }
    log_entry(
        uuid,
        json!({
            "apiVersion": "0.0.1",
            "kind": "hashedrekord",
            "spec": {
                "data": {"hash": {"algorithm": "sha256", "value": "cc"}},
                "signature": signature
            }
        }),
    )
}
