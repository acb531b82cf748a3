/*
 * Rekor
 *
 * Rekor is a cryptographically secure, immutable transparency log for signed software releases.
 *
 * The version of the OpenAPI document: 1.0.0
 *
 * Generated by: https://openapi-generator.tech
 */

use std::collections::HashMap;

use serde::{de::Error as _, Deserialize, Serialize};

use super::{configuration, Error, ResponseContent};
use crate::rekor::models::{self, log_entry::LogEntry};

/// struct for typed errors of method [`get_log_entry_by_uuid`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetLogEntryByUuidError {
    Status404(),
    DefaultResponse(models::Error),
    UnknownValue(serde_json::Value),
}

pub fn log_entry_uri(configuration: &configuration::Configuration, entry_uuid: &str) -> String {
    format!(
        "{}/api/v1/log/entries/{entryUUID}",
        configuration.base_path,
        entryUUID = super::urlencode(entry_uuid)
    )
}

/// Returns the entry identified by `entry_uuid`, with its `uuid` field set.
pub async fn get_log_entry_by_uuid(
    configuration: &configuration::Configuration,
    entry_uuid: &str,
) -> Result<LogEntry, Error<GetLogEntryByUuidError>> {
    let local_var_configuration = configuration;

    let local_var_client = &local_var_configuration.client;

    let local_var_uri_str = log_entry_uri(local_var_configuration, entry_uuid);
    let mut local_var_req_builder =
        local_var_client.request(reqwest::Method::GET, local_var_uri_str.as_str());

    if let Some(ref local_var_user_agent) = local_var_configuration.user_agent {
        local_var_req_builder =
            local_var_req_builder.header(reqwest::header::USER_AGENT, local_var_user_agent.clone());
    }

    let local_var_req = local_var_req_builder.build()?;
    let local_var_resp = local_var_client.execute(local_var_req).await?;

    let local_var_status = local_var_resp.status();
    let local_var_content = local_var_resp.text().await?;

    if local_var_status.is_success() {
        let entries: HashMap<String, LogEntry> = serde_json::from_str(&local_var_content)?;
        unwrap_single_entry(entries).map_err(Error::from)
    } else {
        let local_var_entity: Option<GetLogEntryByUuidError> =
            serde_json::from_str(&local_var_content).ok();
        let local_var_error = ResponseContent {
            status: local_var_status,
            content: local_var_content,
            entity: local_var_entity,
        };
        Err(Error::ResponseError(local_var_error))
    }
}

fn unwrap_single_entry(entries: HashMap<String, LogEntry>) -> Result<LogEntry, serde_json::Error> {
    if entries.len() != 1 {
        return Err(serde_json::Error::custom(format!(
            "expected exactly one entry, got {}",
            entries.len()
        )));
    }
    entries
        .into_iter()
        .next()
        .map(|(uuid, entry)| LogEntry { uuid, ..entry })
        .ok_or_else(|| serde_json::Error::custom("empty response"))
}
