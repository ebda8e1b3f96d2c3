use crate::config::DiscordConfig;
use crate::domain::model::{MessageGroup, Query, SearchMessage};
use crate::domain::ports::MessageSource;
use crate::utils::error::{ResolverError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const SERVICE: &str = "Discord search";

/// The API may send `null` for the list, a group or a record.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    messages: Option<Vec<Option<Vec<Option<SearchMessage>>>>>,
}

impl SearchResponse {
    /// Null groups become empty and null records keep their slot without
    /// content, so the first record of a group stays first.
    fn into_groups(self) -> Vec<MessageGroup> {
        self.messages
            .unwrap_or_default()
            .into_iter()
            .map(|group| {
                group
                    .unwrap_or_default()
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect()
            })
            .collect()
    }
}

/// Guild message search, one request per lookup and no retries.
pub struct DiscordSearchClient {
    client: Client,
    search_url: String,
    authorization: String,
    user_agent: String,
}

impl DiscordSearchClient {
    pub fn new(config: &DiscordConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| ResolverError::ConfigError {
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            search_url: config.search_url(),
            authorization: config.authorization.clone(),
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait]
impl MessageSource for DiscordSearchClient {
    async fn search(&self, query: &Query) -> Result<Vec<MessageGroup>> {
        tracing::debug!("Making search request to: {}", self.search_url);

        let response = self
            .client
            .get(&self.search_url)
            .header(AUTHORIZATION, &self.authorization)
            .header(USER_AGENT, &self.user_agent)
            .query(&[("content", query.as_str())])
            .send()
            .await
            .map_err(|e| upstream_error(e, "request failed"))?;

        let status = response.status();
        tracing::debug!("Search response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("❌ {} returned {}: {}", SERVICE, status, body);
            return Err(ResolverError::upstream(SERVICE, format!("HTTP {}", status)));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| upstream_error(e, "unreadable response body"))?;

        Ok(parsed.into_groups())
    }
}

fn upstream_error(err: reqwest::Error, context: &str) -> ResolverError {
    let reason = if err.is_timeout() { "timed out" } else { context };
    ResolverError::upstream(SERVICE, format!("{}: {}", reason, err.without_url()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups_from(body: serde_json::Value) -> Vec<MessageGroup> {
        serde_json::from_value::<SearchResponse>(body)
            .unwrap()
            .into_groups()
    }

    #[test]
    fn test_null_messages_is_empty() {
        assert!(groups_from(serde_json::json!({"messages": null})).is_empty());
        assert!(groups_from(serde_json::json!({})).is_empty());
    }

    #[test]
    fn test_null_groups_and_records_keep_position() {
        let groups = groups_from(serde_json::json!({
            "messages": [
                null,
                [null, {"content": "dark blade 999 wl"}],
                [{"content": "dark blade 150 wl"}]
            ]
        }));

        assert_eq!(groups.len(), 3);
        assert!(groups[0].is_empty());
        assert_eq!(groups[1].len(), 2);
        assert!(groups[1][0].content.is_none());
        assert_eq!(groups[2][0].content.as_deref(), Some("dark blade 150 wl"));
    }
}
