#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::filter::DEFAULT_FUZZY_THRESHOLD;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_secret,
    validate_snowflake, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v9";
pub const DEFAULT_GUILD_ID: &str = "571992648190263317";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide settings. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub discord: DiscordConfig,
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
    #[serde(default = "default_guild_id")]
    pub guild_id: String,
    /// Sent verbatim as the `Authorization` header.
    pub authorization: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_discord_api_base() -> String {
    DEFAULT_DISCORD_API_BASE.to_string()
}

fn default_guild_id() -> String {
    DEFAULT_GUILD_ID.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_gemini_api_base() -> String {
    DEFAULT_GEMINI_API_BASE.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_fuzzy_threshold() -> u8 {
    DEFAULT_FUZZY_THRESHOLD
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl DiscordConfig {
    pub fn new(authorization: impl Into<String>) -> Self {
        Self {
            api_base: default_discord_api_base(),
            guild_id: default_guild_id(),
            authorization: authorization.into(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }

    pub fn search_url(&self) -> String {
        format!(
            "{}/guilds/{}/messages/search",
            self.api_base.trim_end_matches('/'),
            self.guild_id
        )
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: default_gemini_api_base(),
            api_key: api_key.into(),
            model: default_gemini_model(),
            timeout_seconds: None,
        }
    }

    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ResolverConfig {
    fn validate(&self) -> Result<()> {
        validate_url("discord.api_base", &self.discord.api_base)?;
        validate_snowflake("discord.guild_id", &self.discord.guild_id)?;
        validate_secret("discord.authorization", &self.discord.authorization)?;
        validate_non_empty_string("discord.user_agent", &self.discord.user_agent)?;
        if let Some(timeout) = self.discord.timeout_seconds {
            validate_positive_number("discord.timeout_seconds", timeout, 1)?;
        }

        validate_url("gemini.api_base", &self.gemini.api_base)?;
        validate_secret("gemini.api_key", &self.gemini.api_key)?;
        validate_non_empty_string("gemini.model", &self.gemini.model)?;
        if let Some(timeout) = self.gemini.timeout_seconds {
            validate_positive_number("gemini.timeout_seconds", timeout, 1)?;
        }

        validate_range("filter.fuzzy_threshold", self.filter.fuzzy_threshold, 0, 100)?;

        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", u64::from(self.server.port), 1)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolverConfig {
        ResolverConfig {
            discord: DiscordConfig::new("token"),
            gemini: GeminiConfig::new("key"),
            filter: FilterConfig::default(),
            server: ServerConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_urls() {
        let mut config = sample();
        config.discord.api_base = "http://127.0.0.1:9000/".to_string();
        config.discord.guild_id = "42".to_string();
        assert_eq!(
            config.discord.search_url(),
            "http://127.0.0.1:9000/guilds/42/messages/search"
        );
        assert_eq!(
            config.gemini.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validation_failures() {
        let mut config = sample();
        config.filter.fuzzy_threshold = 150;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.gemini.api_key = String::new();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
