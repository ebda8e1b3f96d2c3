use crate::config::{
    DiscordConfig, FilterConfig, GeminiConfig, ResolverConfig, ServerConfig,
};
use crate::utils::error::{ResolverError, Result};
use std::collections::HashMap;
use std::str::FromStr;

impl ResolverConfig {
    /// 從環境變數載入（先讀取 .env）
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(&std::env::vars().collect())
    }

    /// Builds the config from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).filter(|v| !v.trim().is_empty()).cloned();
        let required = |key: &str| {
            get(key).ok_or_else(|| ResolverError::MissingConfigError {
                field: key.to_string(),
            })
        };

        let mut discord = DiscordConfig::new(required("DISCORD_AUTHORIZATION")?);
        if let Some(v) = get("DISCORD_API_BASE") {
            discord.api_base = v;
        }
        if let Some(v) = get("DISCORD_GUILD_ID") {
            discord.guild_id = v;
        }
        if let Some(v) = get("DISCORD_USER_AGENT") {
            discord.user_agent = v;
        }

        let mut gemini = GeminiConfig::new(required("GENAI_API_KEY")?);
        if let Some(v) = get("GENAI_API_BASE") {
            gemini.api_base = v;
        }
        if let Some(v) = get("GENAI_MODEL") {
            gemini.model = v;
        }

        let timeout = parse_optional::<u64>("UPSTREAM_TIMEOUT_SECS", get("UPSTREAM_TIMEOUT_SECS"))?;
        discord.timeout_seconds = timeout;
        gemini.timeout_seconds = timeout;

        let mut filter = FilterConfig::default();
        if let Some(threshold) = parse_optional::<u8>("FUZZY_THRESHOLD", get("FUZZY_THRESHOLD"))? {
            filter.fuzzy_threshold = threshold;
        }

        let mut server = ServerConfig::default();
        if let Some(v) = get("HOST") {
            server.host = v;
        }
        if let Some(port) = parse_optional::<u16>("PORT", get("PORT"))? {
            server.port = port;
        }

        Ok(Self {
            discord,
            gemini,
            filter,
            server,
        })
    }
}

fn parse_optional<T: FromStr>(field: &str, raw: Option<String>) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ResolverError::InvalidConfigValueError {
                field: field.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })
    })
    .transpose()
}
