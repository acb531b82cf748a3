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

//! Deployment settings for a verification run.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::errors::{ProvenanceError, Result};

/// Default public npm registry.
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default public-good Rekor instance.
pub const REKOR_URL: &str = "https://rekor.sigstore.dev";

/// OIDC issuer of GitHub Actions workload identity tokens.
pub const GITHUB_ACTIONS_ISSUER: &str = "https://token.actions.githubusercontent.com";

/// Host that source repository URIs are expected to live on.
pub const GITHUB_HOST: &str = "github.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONCURRENT_ENTRIES: usize = 3;

/// Settings the verification engine trusts.
///
/// The defaults describe the public-good deployment: packages published to
/// npmjs.org from GitHub Actions and logged in the public Rekor instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    pub registry_url: String,
    pub rekor_url: String,
    /// Issuer URL certificates must carry, compared byte for byte.
    pub expected_issuer: String,
    pub source_host: String,
    pub timeout_secs: u64,
    pub max_concurrent_entries: usize,
    pub user_agent: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            registry_url: NPM_REGISTRY_URL.to_owned(),
            rekor_url: REKOR_URL.to_owned(),
            expected_issuer: GITHUB_ACTIONS_ISSUER.to_owned(),
            source_host: GITHUB_HOST.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent_entries: DEFAULT_MAX_CONCURRENT_ENTRIES,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl VerifierConfig {
    /// Parses a JSON configuration document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ProvenanceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every endpoint is a parseable URL and that requests can
    /// complete before timing out.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.registry_url)?;
        Url::parse(&self.rekor_url)?;
        if self.expected_issuer.is_empty() {
            return Err(ProvenanceError::InvalidConfig(
                "expected_issuer must not be empty".into(),
            ));
        }
        if self.source_host.is_empty() {
            return Err(ProvenanceError::InvalidConfig(
                "source_host must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ProvenanceError::InvalidConfig(
                "timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Candidate log entries inspected at once; never less than one.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_entries.max(1)
    }

    /// Builds the HTTP client shared by every network component.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout())
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| ProvenanceError::InvalidConfig(format!("cannot build HTTP client: {e}")))
    }
}
