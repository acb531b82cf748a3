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

//! Downloads a prebuilt binary and writes it out only if its provenance
//! checks out against the npm package it belongs to.
//!
//! The artifact is written exactly as downloaded; unpacking it is left to
//! the caller.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use binary_provenance::{registry::PackageSpec, ProvenanceVerifier, VerifierConfig};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "verify-provenance")]
#[command(about = "Verify that a prebuilt binary comes from the CI run that published its package", long_about = None)]
struct Cli {
    /// npm package name, e.g. @scope/name
    #[arg(long)]
    package: String,

    /// Exact package version
    #[arg(long)]
    version: String,

    /// Source repository the package must be built from, as owner/name
    #[arg(long)]
    repository: String,

    /// URL of the artifact to download
    #[arg(long)]
    url: String,

    /// Where to write the verified artifact
    #[arg(long)]
    output: PathBuf,

    /// JSON file overriding the default endpoints and trusted issuer
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the matched identity as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose mode
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // setup logging
    let level_filter = if cli.verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_filter));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("error reading config file {}", path.display()))?;
            VerifierConfig::from_json(&raw)?
        }
        None => VerifierConfig::default(),
    };

    let package = PackageSpec::new(cli.package, cli.version)?;
    let verifier = ProvenanceVerifier::builder().with_config(config).build()?;

    let verified = verifier
        .verify(&package, &cli.repository, &cli.url)
        .await
        .with_context(|| format!("refusing to install {package}"))?;

    fs::write(&cli.output, &verified.bytes)
        .with_context(|| format!("error writing {}", cli.output.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&verified)?);
    } else {
        println!(
            "Verified {} ({} bytes, sha256:{}) from {}",
            package,
            verified.bytes.len(),
            verified.digest,
            verified.identity.run_invocation_uri
        );
    }

    Ok(())
}
