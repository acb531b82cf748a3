/*
 * Rekor
 *
 * Rekor is a cryptographically secure, immutable transparency log for signed software releases.
 *
 * The version of the OpenAPI document: 1.0.0
 *
 * Generated by: https://openapi-generator.tech
 */

#[derive(Debug, Clone)]
pub struct Configuration {
    pub base_path: String,
    pub user_agent: Option<String>,
    pub client: reqwest::Client,
}

impl Configuration {
    /// Targets `base_path` with an already configured client.
    pub fn with_client(base_path: &str, client: reqwest::Client) -> Configuration {
        Configuration {
            base_path: base_path.trim_end_matches('/').to_owned(),
            user_agent: None,
            client,
        }
    }
}
