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

//! Reading Fulcio's custom extensions out of a signing certificate.
//!
//! Fulcio encoded the first generation of its extensions as raw ASCII bytes
//! and moved to DER-encoded strings later. Both are still found in the wild,
//! so every lookup tries the structured decoding first and falls back to the
//! raw bytes.
//!
//! <https://github.com/sigstore/fulcio/blob/main/docs/oid-info.md#extension-values>

use const_oid::ObjectIdentifier;
use tracing::warn;
use x509_cert::{
    der::{
        asn1::{AnyRef, Ia5StringRef, PrintableStringRef, Utf8StringRef},
        Decode, SliceReader, Tag, Tagged,
    },
    Certificate,
};

use crate::errors::{ProvenanceError, Result};

macro_rules! oids {
    ($($(#[$meta:meta])* $name:ident = $value:literal),+ $(,)?) => {
        $($(#[$meta])* pub const $name: ObjectIdentifier = ObjectIdentifier::new_unwrap($value);)+
    };
}

oids! {
    /// Issuer, raw ASCII (deprecated).
    OIDC_ISSUER_OID = "1.3.6.1.4.1.57264.1.1",
    /// Issuer, DER-encoded UTF8String.
    OIDC_ISSUER_V2_OID = "1.3.6.1.4.1.57264.1.8",
    SOURCE_REPOSITORY_URI_OID = "1.3.6.1.4.1.57264.1.12",
    RUN_INVOCATION_URI_OID = "1.3.6.1.4.1.57264.1.21",
}

/// The certificate facts trust decisions are made on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FulcioField {
    Issuer,
    SourceRepositoryUri,
    RunInvocationUri,
}

impl FulcioField {
    /// OIDs carrying this field, most recent first.
    pub fn oids(self) -> &'static [ObjectIdentifier] {
        match self {
            FulcioField::Issuer => &[OIDC_ISSUER_V2_OID, OIDC_ISSUER_OID],
            FulcioField::SourceRepositoryUri => &[SOURCE_REPOSITORY_URI_OID],
            FulcioField::RunInvocationUri => &[RUN_INVOCATION_URI_OID],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FulcioField::Issuer => "issuer",
            FulcioField::SourceRepositoryUri => "source repository URI",
            FulcioField::RunInvocationUri => "run invocation URI",
        }
    }
}

type ExtensionDecoder = fn(&[u8]) -> Option<String>;

/// Value decodings, tried in order.
const DECODERS: [ExtensionDecoder; 2] = [decode_der_string, decode_raw_ascii];

/// Returns the decoded value of the extension identified by `oid`.
///
/// `None` means the extension is absent, appears more than once, or holds
/// no non-empty string in either known encoding.
pub fn extension_value(cert: &Certificate, oid: &ObjectIdentifier) -> Option<String> {
    let extensions = cert.tbs_certificate.extensions.as_deref().unwrap_or(&[]);
    let mut matching = extensions.iter().filter(|ext| ext.extn_id == *oid);

    let ext = match (matching.next(), matching.next()) {
        (Some(ext), None) => ext,
        (Some(_), Some(_)) => {
            warn!(%oid, "certificate carries the extension more than once, ignoring it");
            return None;
        }
        _ => return None,
    };

    let raw = ext.extn_value.as_bytes();
    DECODERS.iter().find_map(|decode| decode(raw))
}

/// Returns the first value found for `field` across its OIDs.
pub fn field_value(cert: &Certificate, field: FulcioField) -> Option<String> {
    field
        .oids()
        .iter()
        .find_map(|oid| extension_value(cert, oid))
}

/// Like [`field_value`], but absence is an error.
pub fn require_field(cert: &Certificate, field: FulcioField) -> Result<String> {
    field_value(cert, field).ok_or_else(|| ProvenanceError::MissingExtension {
        field: field.name().to_owned(),
        oids: field
            .oids()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn decode_der_string(bytes: &[u8]) -> Option<String> {
    let any = AnyRef::from_der(bytes).ok()?;
    let value = match any.tag() {
        Tag::Sequence => {
            let mut reader = SliceReader::new(any.value()).ok()?;
            let first = AnyRef::decode(&mut reader).ok()?;
            any_to_string(first)?
        }
        _ => any_to_string(any)?,
    };
    (!value.is_empty()).then_some(value)
}

fn any_to_string(any: AnyRef<'_>) -> Option<String> {
    match any.tag() {
        Tag::Utf8String => Utf8StringRef::try_from(any).ok().map(|s| s.to_string()),
        Tag::Ia5String => Ia5StringRef::try_from(any).ok().map(|s| s.to_string()),
        Tag::PrintableString => PrintableStringRef::try_from(any).ok().map(|s| s.to_string()),
        _ => None,
    }
}

fn decode_raw_ascii(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || !bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        return None;
    }
    std::str::from_utf8(bytes).ok().map(str::to_owned)
}
