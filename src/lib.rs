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

//! Verifies that a prebuilt binary was produced by the same CI run that
//! published its npm package.
//!
//! Packages published from GitHub Actions with `npm publish --provenance`
//! carry a [sigstore](https://sigstore.dev/) provenance attestation, signed
//! with a short-lived Fulcio certificate naming the exact workflow run.
//! When the same run also signs the native binaries it uploads to an object
//! store, those signatures land in the Rekor transparency log. This crate
//! checks both sides:
//!
//! * the registry attestation was issued by the expected identity provider
//!   to the expected source repository;
//! * the downloaded artifact's digest has a Rekor entry signed by a
//!   certificate for that *same* run and identity.
//!
//! Neither the download channel nor the registry has to be trusted.
//!
//! # Example
//!
//! ```no_run
//! use binary_provenance::{registry::PackageSpec, ProvenanceVerifier};
//!
//! # async fn run() -> binary_provenance::errors::Result<()> {
//! let verifier = ProvenanceVerifier::builder().build()?;
//! let package: PackageSpec = "@octo-org/octo-bin@1.4.2".parse()?;
//!
//! let verified = verifier
//!     .verify(
//!         &package,
//!         "octo-org/octo-bin",
//!         "https://cdn.example.com/octo-bin-v1.4.2-linux-x64.tar.gz",
//!     )
//!     .await?;
//! println!("built by {}", verified.identity.run_invocation_uri);
//! # Ok(())
//! # }
//! ```
//!
//! Any error means the artifact must not be installed.

pub mod artifact;
pub mod bundle;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod identity;
pub mod registry;
pub mod rekor;
pub mod verifier;

mod mock_client;

pub use config::VerifierConfig;
pub use errors::{ProvenanceError, Result};
pub use verifier::{ProvenanceVerifier, VerifiedArtifact, VerifierBuilder};
