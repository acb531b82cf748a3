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

//! End-to-end verification against mocked registry, Rekor and CDN servers.

mod common;

use binary_provenance::errors::NetworkErrorKind;
use binary_provenance::registry::{PackageSpec, SLSA_PROVENANCE_V0_2, SLSA_PROVENANCE_V1};
use binary_provenance::{ProvenanceError, ProvenanceVerifier, VerifierConfig};
use common::*;
use httpmock::prelude::*;
use rstest::rstest;
use serde_json::json;
use sha2::{Digest, Sha256};
use x509_cert::Certificate;

const ARTIFACT: &[u8] = b"\x1f\x8b\x08\x00 pretend this is a gzipped binary";
const ARTIFACT_PATH: &str = "/releases/octo-bin-v1.0.0-linux-x64.tar.gz";
const ATTESTATIONS_PATH: &str = "/-/npm/v1/attestations/octo-bin@1.0.0";

fn artifact_digest() -> String {
    hex::encode(Sha256::digest(ARTIFACT))
}

fn config(server: &MockServer) -> VerifierConfig {
    VerifierConfig {
        registry_url: server.base_url(),
        rekor_url: server.base_url(),
        timeout_secs: 5,
        ..Default::default()
    }
}

fn package() -> PackageSpec {
    PackageSpec::new("octo-bin", "1.0.0").expect("valid package")
}

async fn serve_registry(server: &MockServer, predicate_type: &str, leaf: &Certificate) {
    let response = attestations_response(predicate_type, leaf);
    server
        .mock_async(|when, then| {
            when.method(GET).path(ATTESTATIONS_PATH);
            then.status(200).json_body(response);
        })
        .await;
}

async fn serve_artifact(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path(ARTIFACT_PATH);
            then.status(200).body(ARTIFACT);
        })
        .await;
}

async fn serve_log(server: &MockServer, entries: Vec<(&str, serde_json::Value)>) {
    let uuids: Vec<&str> = entries.iter().map(|(uuid, _)| *uuid).collect();
    let hash = format!("sha256:{}", artifact_digest());
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/index/retrieve")
                .json_body(json!({"hash": hash}));
            then.status(200).json_body(json!(uuids));
        })
        .await;

    for (uuid, entry) in entries {
        let path = format!("/api/v1/log/entries/{uuid}");
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(entry);
            })
            .await;
    }
}

async fn verify(server: &MockServer) -> binary_provenance::Result<binary_provenance::VerifiedArtifact> {
    let verifier = ProvenanceVerifier::builder()
        .with_config(config(server))
        .build()?;
    verifier
        .verify(&package(), REPOSITORY, &server.url(ARTIFACT_PATH))
        .await
}

#[rstest]
#[case::slsa_v1(SLSA_PROVENANCE_V1)]
#[case::slsa_v0_2(SLSA_PROVENANCE_V0_2)]
#[tokio::test]
async fn provenance_is_selected_over_other_attestations(#[case] predicate_type: &str) {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);

    serve_registry(&server, predicate_type, &leaf).await;
    serve_artifact(&server).await;
    serve_log(&server, vec![("entry-1", dsse_entry("entry-1", &leaf))]).await;

    let verified = verify(&server).await.expect("verification should succeed");
    assert_eq!(verified.bytes, ARTIFACT);
    assert_eq!(verified.digest, artifact_digest());
    assert_eq!(verified.log_entry_uuid, "entry-1");
    assert_eq!(verified.identity.issuer, ISSUER);
    assert_eq!(verified.identity.source_repository_uri, REPOSITORY_URI);
    assert_eq!(verified.identity.run_invocation_uri, RUN);
}

#[tokio::test]
async fn later_entry_from_the_same_run_is_accepted() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);
    let previous_build = good_leaf(OTHER_RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    serve_artifact(&server).await;
    serve_log(
        &server,
        vec![
            ("entry-1", dsse_entry("entry-1", &previous_build)),
            ("entry-2", hashedrekord_entry("entry-2", Some(&leaf))),
        ],
    )
    .await;

    let verified = verify(&server).await.expect("verification should succeed");
    assert_eq!(verified.log_entry_uuid, "entry-2");
}

#[tokio::test]
async fn hashedrekord_without_public_key_is_rejected() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    serve_artifact(&server).await;
    serve_log(&server, vec![("entry-1", hashedrekord_entry("entry-1", None))]).await;

    match verify(&server).await {
        Err(ProvenanceError::UnsupportedEntryKind { kind }) => assert!(kind.contains("publicKey")),
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn entry_from_another_run_only_is_a_mismatch() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    serve_artifact(&server).await;
    serve_log(&server, vec![("entry-1", dsse_entry("entry-1", &good_leaf(OTHER_RUN)))]).await;

    assert!(matches!(
        verify(&server).await,
        Err(ProvenanceError::RunMismatch { candidates: 1, .. })
    ));
}

#[tokio::test]
async fn entry_for_another_repository_is_not_a_match() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);
    let fork = fulcio_leaf(ISSUER, "https://github.com/mallory/octo-bin", RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    serve_artifact(&server).await;
    serve_log(&server, vec![("entry-1", dsse_entry("entry-1", &fork))]).await;

    assert!(matches!(
        verify(&server).await,
        Err(ProvenanceError::RunMismatch { .. })
    ));
}

#[tokio::test]
async fn unknown_digest_is_a_tampering_signal() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    serve_artifact(&server).await;
    serve_log(&server, vec![]).await;

    match verify(&server).await {
        Err(ProvenanceError::EmptyTransparencyLog { digest }) => {
            assert_eq!(digest, format!("sha256:{}", artifact_digest()));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn registry_issuer_mismatch_fails_before_download() {
    let server = MockServer::start_async().await;
    let leaf = fulcio_leaf("https://gitlab.com", REPOSITORY_URI, RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    let download = server
        .mock_async(|when, then| {
            when.method(GET).path(ARTIFACT_PATH);
            then.status(200).body(ARTIFACT);
        })
        .await;

    match verify(&server).await {
        Err(ProvenanceError::IdentityMismatch {
            field,
            expected,
            actual,
        }) => {
            assert_eq!(field, "issuer");
            assert_eq!(expected, ISSUER);
            assert_eq!(actual, "https://gitlab.com");
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(download.hits_async().await, 0);
}

#[tokio::test]
async fn failed_download_is_terminal() {
    let server = MockServer::start_async().await;
    let leaf = good_leaf(RUN);

    serve_registry(&server, SLSA_PROVENANCE_V1, &leaf).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(ARTIFACT_PATH);
            then.status(403);
        })
        .await;

    match verify(&server).await {
        Err(ProvenanceError::NetworkFailure {
            kind: NetworkErrorKind::Status(status),
            url,
        }) => {
            assert_eq!(status.as_u16(), 403);
            assert!(url.ends_with(ARTIFACT_PATH));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn fixture_leaf_reads_back_as_fulcio_identity() {
    use binary_provenance::crypto::{certificate, require_field, FulcioField};

    let leaf = good_leaf(RUN);
    assert_eq!(require_field(&leaf, FulcioField::Issuer).expect("issuer"), ISSUER);
    assert_eq!(
        require_field(&leaf, FulcioField::SourceRepositoryUri).expect("repository"),
        REPOSITORY_URI
    );
    assert_eq!(require_field(&leaf, FulcioField::RunInvocationUri).expect("run"), RUN);

    assert_eq!(certificate::from_base64_der(&base64_der(&leaf)).expect("der"), leaf);
    assert_eq!(certificate::from_base64_pem(&base64_pem(&leaf)).expect("pem"), leaf);
    assert_eq!(leaf.tbs_certificate.serial_number.as_bytes(), &[0x01, 0x02, 0x03]);
}
