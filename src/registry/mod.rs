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

//! Package registry access: finding the provenance attestation a package
//! version was published with.

pub mod models;
pub use models::*;

mod npm_client;
pub use npm_client::NpmRegistryClient;

mod package;
pub use package::PackageSpec;

use crate::errors::Result;

use async_trait::async_trait;

#[async_trait]
/// Capabilities that are expected to be provided by a registry client
pub trait AttestationSource: Send + Sync {
    /// Lists every attestation published for the exact package version.
    async fn fetch_attestations(&self, package: &PackageSpec) -> Result<Vec<Attestation>>;
}
