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

//! Bundle verification capability.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::SignedBundle;
use crate::crypto::certificate::{is_leaf, is_root_ca};
use crate::errors::{ProvenanceError, Result};

/// Verifies a signed bundle before any certificate in it is trusted.
///
/// This is the seam for cryptographic verification (signature, chain to a
/// trust root, log inclusion). The verification engine itself only decides
/// which certificates to trust and which log entries to cross-reference.
#[async_trait]
pub trait BundleVerifier: Send + Sync {
    async fn verify(&self, bundle: &SignedBundle) -> Result<()>;
}

/// Checks that a bundle is shaped like one Sigstore issues for a CI
/// workload: a signature is present, the leaf fits the Fulcio signing
/// profile and no root CA is bundled along.
///
/// No signature is checked. Pair it with a cryptographic verifier where
/// one is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeafProfileVerifier;

#[async_trait]
impl BundleVerifier for LeafProfileVerifier {
    async fn verify(&self, bundle: &SignedBundle) -> Result<()> {
        if !(bundle.content.contains_key("dsseEnvelope")
            || bundle.content.contains_key("messageSignature"))
        {
            return Err(ProvenanceError::BundleVerification(
                "bundle carries neither a DSSE envelope nor a message signature".to_owned(),
            ));
        }

        let certs = bundle.certificate_chain()?;
        let [leaf, chain @ ..] = &certs[..] else {
            return Err(ProvenanceError::BundleVerification(
                "bundle does not contain any certificates".to_owned(),
            ));
        };

        is_leaf(leaf).map_err(|e| ProvenanceError::BundleVerification(e.to_string()))?;

        for cert in chain {
            if is_root_ca(cert).map_err(|e| ProvenanceError::BundleVerification(e.to_string()))? {
                return Err(ProvenanceError::BundleVerification(
                    "bundle must not contain a root CA".to_owned(),
                ));
            }
        }

        debug!(chain_len = certs.len(), "bundle matches the signing profile");
        Ok(())
    }
}

/// Accepts every bundle.
pub struct UnsafeNoOpVerifier;

#[async_trait]
impl BundleVerifier for UnsafeNoOpVerifier {
    async fn verify(&self, _bundle: &SignedBundle) -> Result<()> {
        warn!("unsafe (no-op) bundle verifier used! no verification performed!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::tests::*;

    use serde_json::{json, Value};

    fn bundle(certs: &[&x509_cert::Certificate], envelope: bool) -> SignedBundle {
        let raw: Vec<Value> = certs
            .iter()
            .map(|c| json!({"rawBytes": to_base64_der(c)}))
            .collect();
        let mut value = json!({
            "mediaType": "application/vnd.dev.sigstore.bundle+json;version=0.1",
            "verificationMaterial": {"x509CertificateChain": {"certificates": raw}}
        });
        if envelope {
            value["dsseEnvelope"] = json!({"payload": "e30=", "payloadType": "application/vnd.in-toto+json", "signatures": []});
        }
        serde_json::from_value(value).expect("valid bundle")
    }

    #[tokio::test]
    async fn accepts_fulcio_shaped_bundle() {
        let leaf = generate_certificate(CertGenerationOptions::default());
        assert!(LeafProfileVerifier.verify(&bundle(&[&leaf], true)).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_bundle_without_signature() {
        let leaf = generate_certificate(CertGenerationOptions::default());
        assert!(matches!(
            LeafProfileVerifier.verify(&bundle(&[&leaf], false)).await,
            Err(ProvenanceError::BundleVerification(_))
        ));
    }

    #[tokio::test]
    async fn rejects_ca_as_leaf() {
        let ca = generate_certificate(CertGenerationOptions {
            ca: true,
            ..Default::default()
        });
        assert!(matches!(
            LeafProfileVerifier.verify(&bundle(&[&ca], true)).await,
            Err(ProvenanceError::BundleVerification(_))
        ));
    }

    #[tokio::test]
    async fn rejects_bundled_root() {
        let leaf = generate_certificate(CertGenerationOptions::default());
        let root = generate_certificate(CertGenerationOptions {
            ca: true,
            ..Default::default()
        });
        let err = LeafProfileVerifier
            .verify(&bundle(&[&leaf, &root], true))
            .await
            .expect_err("root CA must be rejected");
        assert!(err.to_string().contains("root CA"));
    }

    #[tokio::test]
    async fn no_op_accepts_anything() {
        let ca = generate_certificate(CertGenerationOptions {
            ca: true,
            ..Default::default()
        });
        assert!(UnsafeNoOpVerifier.verify(&bundle(&[&ca], false)).await.is_ok());
    }
}
