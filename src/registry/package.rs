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

use std::fmt;
use std::str::FromStr;

use crate::errors::{ProvenanceError, Result};

/// An exact `name@version` pair published to the registry.
///
/// Scoped names (`@scope/name`) are supported. Version ranges and tags are
/// not: attestations exist for a concrete version only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    name: String,
    version: String,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        validate_name(&name)?;
        validate_version(&version)?;
        Ok(Self { name, version })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The name as it appears in registry URLs: the scope separator of a
    /// scoped package is percent-encoded.
    pub fn escaped_name(&self) -> String {
        match self.name.strip_prefix('@') {
            Some(scoped) => format!("@{}", scoped.replacen('/', "%2f", 1)),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

impl FromStr for PackageSpec {
    type Err = ProvenanceError;

    /// Parses `name@version` or `@scope/name@version`.
    fn from_str(s: &str) -> Result<Self> {
        match s.rfind('@') {
            Some(at) if at > 0 => PackageSpec::new(&s[..at], &s[at + 1..]),
            _ => Err(ProvenanceError::InvalidPackage(format!(
                "expected <name>@<version>, got {s:?}"
            ))),
        }
    }
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '+')
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Err(ProvenanceError::InvalidPackage(format!("{name:?}: {reason}")));

    let bare = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, bare)) if !scope.is_empty() && scope.chars().all(is_url_safe) => bare,
            _ => return invalid("scoped names must look like @scope/name"),
        },
        None => name,
    };

    if bare.is_empty() {
        return invalid("name must not be empty");
    }
    if bare.starts_with('.') || bare.starts_with('_') {
        return invalid("name must not start with '.' or '_'");
    }
    if !bare.chars().all(is_url_safe) {
        return invalid("name contains characters not allowed in a package name");
    }
    Ok(())
}

fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() || !version.chars().all(is_url_safe) {
        return Err(ProvenanceError::InvalidPackage(format!(
            "invalid version {version:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("left-pad", "left-pad")]
    #[case("@octo-org/octo-bin", "@octo-org%2focto-bin")]
    fn escapes_scoped_names(#[case] name: &str, #[case] escaped: &str) {
        let spec = PackageSpec::new(name, "1.2.3").expect("valid package");
        assert_eq!(spec.escaped_name(), escaped);
    }

    #[rstest]
    #[case("left-pad@1.3.0", "left-pad", "1.3.0")]
    #[case("@octo-org/octo-bin@2.0.0-beta.1", "@octo-org/octo-bin", "2.0.0-beta.1")]
    fn parses_name_at_version(#[case] input: &str, #[case] name: &str, #[case] version: &str) {
        let spec: PackageSpec = input.parse().expect("valid package");
        assert_eq!(spec.name(), name);
        assert_eq!(spec.version(), version);
        assert_eq!(spec.to_string(), input);
    }

    #[rstest]
    #[case::no_version("left-pad")]
    #[case::scoped_no_version("@octo-org/octo-bin")]
    #[case::empty_version("left-pad@")]
    #[case::path_traversal("../../etc@1.0.0")]
    #[case::missing_scope("@/pkg@1.0.0")]
    #[case::query("pkg?x=1@1.0.0")]
    #[case::whitespace("left pad@1.0.0")]
    fn rejects_invalid_specs(#[case] input: &str) {
        assert!(matches!(
            input.parse::<PackageSpec>(),
            Err(ProvenanceError::InvalidPackage(_))
        ));
    }
}
