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

use tracing::info;

use super::ProvenanceVerifier;
use crate::artifact::{ArtifactFetcher, HttpArtifactFetcher};
use crate::bundle::{BundleVerifier, LeafProfileVerifier};
use crate::config::VerifierConfig;
use crate::errors::Result;
use crate::identity::IdentityVerifier;
use crate::registry::{AttestationSource, NpmRegistryClient};
use crate::rekor::{RekorV1Client, TransparencyLog};

/// A builder that generates [`ProvenanceVerifier`] objects.
///
/// ## Endpoints
///
/// Registry, Rekor instance, trusted issuer and timeouts come from a
/// [`VerifierConfig`]. The defaults target npmjs.org, the public-good Rekor
/// instance and GitHub Actions.
///
/// ## Bundle verification
///
/// Registry bundles are checked by a [`BundleVerifier`]. Unless one is
/// provided via [`VerifierBuilder::with_bundle_verifier`], only the
/// structural [`LeafProfileVerifier`] runs.
///
/// ## Custom clients
///
/// Each network component can be replaced, e.g. to go through a mirror or
/// to serve canned responses.
#[derive(Default)]
pub struct VerifierBuilder {
    config: VerifierConfig,
    registry: Option<Box<dyn AttestationSource>>,
    transparency_log: Option<Box<dyn TransparencyLog>>,
    fetcher: Option<Box<dyn ArtifactFetcher>>,
    bundle_verifier: Option<Box<dyn BundleVerifier>>,
}

impl VerifierBuilder {
    pub fn with_config(mut self, config: VerifierConfig) -> Self {
        self.config = config;
        self
    }

    /// Optional - where attestations are read from.
    pub fn with_attestation_source(mut self, registry: Box<dyn AttestationSource>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Optional - the log artifacts are looked up in.
    pub fn with_transparency_log(mut self, log: Box<dyn TransparencyLog>) -> Self {
        self.transparency_log = Some(log);
        self
    }

    /// Optional - how the artifact is downloaded.
    pub fn with_artifact_fetcher(mut self, fetcher: Box<dyn ArtifactFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Optional - cryptographic verification of registry bundles.
    pub fn with_bundle_verifier(mut self, verifier: Box<dyn BundleVerifier>) -> Self {
        self.bundle_verifier = Some(verifier);
        self
    }

    pub fn build(self) -> Result<ProvenanceVerifier> {
        let config = self.config;
        config.validate()?;
        let client = config.http_client()?;

        let registry = self.registry.unwrap_or_else(|| {
            Box::new(NpmRegistryClient::with_client(
                &config.registry_url,
                client.clone(),
            ))
        });
        let transparency_log = self.transparency_log.unwrap_or_else(|| {
            Box::new(RekorV1Client::with_client(&config.rekor_url, client.clone()))
        });
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Box::new(HttpArtifactFetcher::new(client)));
        let bundle_verifier = self.bundle_verifier.unwrap_or_else(|| {
            info!("No bundle verifier provided. Only the signing certificate profile is checked");
            Box::new(LeafProfileVerifier)
        });

        Ok(ProvenanceVerifier {
            registry,
            transparency_log,
            fetcher,
            bundle_verifier,
            identity: IdentityVerifier::from_config(&config),
            concurrency: config.concurrency(),
        })
    }
}
