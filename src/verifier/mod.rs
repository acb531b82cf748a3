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

//! End-to-end provenance verification.
//!
//! A [`ProvenanceVerifier`] ties a downloaded artifact to the CI run that
//! published its package:
//!
//! 1. the registry's provenance attestation names a run (its leaf
//!    certificate's run invocation URI) and must have been issued to the
//!    expected repository by the expected identity provider;
//! 2. the artifact's digest is looked up in the transparency log;
//! 3. some log entry for that digest must have been signed by a certificate
//!    naming the *same* run, issued to the same identity.
//!
//! Every failure is terminal and nothing is retried.

mod builder;
pub use builder::VerifierBuilder;

use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifact::{ArtifactFetcher, DownloadedArtifact};
use crate::bundle::BundleVerifier;
use crate::crypto::{field_value, FulcioField};
use crate::errors::{ProvenanceError, Result};
use crate::identity::{IdentityVerifier, RunIdentity};
use crate::registry::{select_provenance, AttestationSource, PackageSpec};
use crate::rekor::{resolve_certificate, TransparencyLog};

/// Progress of one verification. Failure is possible from every stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Init,
    FetchedAttestation,
    VerifiedRegistryIdentity,
    DownloadedArtifact,
    SearchedLog,
    MatchedEntry,
    Verified,
}

/// An artifact whose provenance has been established.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifiedArtifact {
    /// The artifact exactly as downloaded.
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// Hex SHA-256 of `bytes`.
    pub digest: String,
    /// Identity of the run that built and published the package.
    pub identity: RunIdentity,
    /// The transparency log entry that matched.
    pub log_entry_uuid: String,
}

pub struct ProvenanceVerifier {
    pub(crate) registry: Box<dyn AttestationSource>,
    pub(crate) transparency_log: Box<dyn TransparencyLog>,
    pub(crate) fetcher: Box<dyn ArtifactFetcher>,
    pub(crate) bundle_verifier: Box<dyn BundleVerifier>,
    pub(crate) identity: IdentityVerifier,
    pub(crate) concurrency: usize,
}

impl ProvenanceVerifier {
    pub fn builder() -> VerifierBuilder {
        VerifierBuilder::default()
    }

    /// Verifies that the artifact at `artifact_url` was produced by the run
    /// that published `package` from `expected_repository` (`owner/name`).
    ///
    /// On success the downloaded bytes are returned untouched; nothing is
    /// written anywhere.
    pub async fn verify(
        &self,
        package: &PackageSpec,
        expected_repository: &str,
        artifact_url: &str,
    ) -> Result<VerifiedArtifact> {
        let mut stage = Stage::Init;
        let result = self
            .run(&mut stage, package, expected_repository, artifact_url)
            .await;

        match &result {
            Ok(verified) => info!(
                %package,
                digest = %verified.digest,
                run = %verified.identity.run_invocation_uri,
                log_entry = %verified.log_entry_uuid,
                "artifact provenance verified"
            ),
            Err(err) => info!(%package, ?stage, error = %err, "artifact provenance verification failed"),
        }
        result
    }

    async fn run(
        &self,
        stage: &mut Stage,
        package: &PackageSpec,
        expected_repository: &str,
        artifact_url: &str,
    ) -> Result<VerifiedArtifact> {
        let attestations = self.registry.fetch_attestations(package).await?;
        let provenance = select_provenance(package, &attestations)?;
        let signer = provenance.signer()?;
        advance(stage, Stage::FetchedAttestation);

        self.bundle_verifier.verify(&provenance.bundle).await?;
        self.identity.verify(&signer.certificate, expected_repository)?;
        debug!(run = %signer.run_invocation_uri, "registry attestation identity verified");
        advance(stage, Stage::VerifiedRegistryIdentity);

        let artifact = self.fetcher.fetch(artifact_url).await?;
        advance(stage, Stage::DownloadedArtifact);

        let uuids = self.transparency_log.search_by_digest(&artifact.digest).await?;
        if uuids.is_empty() {
            return Err(ProvenanceError::EmptyTransparencyLog {
                digest: format!("sha256:{}", artifact.digest),
            });
        }
        advance(stage, Stage::SearchedLog);

        let (log_entry_uuid, identity) = self
            .find_matching_entry(uuids, &signer.run_invocation_uri, expected_repository)
            .await?;
        advance(stage, Stage::MatchedEntry);

        let DownloadedArtifact { bytes, digest } = artifact;
        advance(stage, Stage::Verified);

        Ok(VerifiedArtifact {
            bytes,
            digest,
            identity,
            log_entry_uuid,
        })
    }

    /// Inspects candidates in the order the log returned them, a few at a
    /// time, and returns the first one signed by the expected run.
    async fn find_matching_entry(
        &self,
        uuids: Vec<String>,
        expected_run: &str,
        expected_repository: &str,
    ) -> Result<(String, RunIdentity)> {
        let candidates = uuids.len();
        let mut inspections = stream::iter(uuids)
            .map(|uuid| self.inspect_candidate(uuid, expected_run, expected_repository))
            .buffered(self.concurrency);

        while let Some(inspection) = inspections.next().await {
            if let Some(matched) = inspection? {
                return Ok(matched);
            }
        }

        Err(ProvenanceError::RunMismatch {
            expected: expected_run.to_owned(),
            candidates,
        })
    }

    /// `Ok(None)` means the entry belongs to another run or identity and is
    /// skipped. Any other problem with the entry aborts the verification.
    async fn inspect_candidate(
        &self,
        uuid: String,
        expected_run: &str,
        expected_repository: &str,
    ) -> Result<Option<(String, RunIdentity)>> {
        let entry = self.transparency_log.get_entry(&uuid).await?;
        let cert = resolve_certificate(&entry)?;

        let run = field_value(&cert, FulcioField::RunInvocationUri);
        if run.as_deref() != Some(expected_run) {
            warn!(%uuid, run = run.as_deref().unwrap_or("<none>"), expected = %expected_run, "skipping log entry from another run");
            return Ok(None);
        }

        match self.identity.verify(&cert, expected_repository) {
            Ok(identity) => {
                debug!(%uuid, "log entry matches the registry run");
                Ok(Some((uuid, identity)))
            }
            Err(err) => {
                warn!(%uuid, error = %err, "skipping log entry: run matches but identity does not");
                Ok(None)
            }
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = ?stage, to = ?next, "verification stage");
    *stage = next;
}
