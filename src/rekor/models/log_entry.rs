use serde::{Deserialize, Serialize};

/// A log entry as returned by `GET /api/v1/log/entries/{entryUUID}`.
///
/// Rekor answers with a single-key map from UUID to entry; the UUID is
/// moved into the entry once the map is unwrapped.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub uuid: String,
    /// Base64-encoded canonical JSON of the entry, see [`LogEntryBody`](crate::rekor::resolver::LogEntryBody).
    pub body: String,
    #[serde(default)]
    pub integrated_time: i64,
    #[serde(default)]
    pub log_i_d: String,
    #[serde(default)]
    pub log_index: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

/// Stores the signature over the artifact's logID, logIndex, body and integratedTime.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusion_proof: Option<InclusionProof>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_entry_timestamp: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionProof {
    pub hashes: Vec<String>,
    pub log_index: i64,
    pub root_hash: String,
    pub tree_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<String>,
}
