use crate::adapters::{DiscordSearchClient, GeminiClient};
use crate::config::ResolverConfig;
use crate::core::filter::LineFilter;
use crate::core::interpreter::{PriceInterpreter, SYSTEM_INSTRUCTION};
use crate::core::normalizer::normalize_response;
use crate::domain::model::{PriceResponse, Query};
use crate::domain::ports::{MessageSource, TextGenerator};
use crate::utils::error::Result;
use std::sync::Arc;

/// Search → filter → model → normalise. Holds only read-only collaborators,
/// so one instance serves concurrent requests.
pub struct PriceResolver {
    source: Arc<dyn MessageSource>,
    filter: LineFilter,
    interpreter: PriceInterpreter,
}

impl PriceResolver {
    pub fn new(
        source: Arc<dyn MessageSource>,
        generator: Arc<dyn TextGenerator>,
        filter: LineFilter,
    ) -> Self {
        Self {
            source,
            filter,
            interpreter: PriceInterpreter::new(generator),
        }
    }

    /// Wires the Discord and Gemini clients from startup configuration.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        let source = Arc::new(DiscordSearchClient::new(&config.discord)?);
        let generator = Arc::new(GeminiClient::new(&config.gemini, SYSTEM_INSTRUCTION)?);
        let filter = LineFilter::new(config.filter.fuzzy_threshold);
        tracing::info!(
            "⚙️ Resolver ready (guild {}, model {}, fuzzy threshold {})",
            config.discord.guild_id,
            config.gemini.model,
            filter.threshold()
        );
        Ok(Self::new(source, generator, filter))
    }

    pub async fn resolve(&self, item_name: &str) -> Result<PriceResponse> {
        let query = Query::new(item_name)?;
        tracing::info!("🔍 Resolving price for '{}'", query);

        let groups = self.source.search(&query).await?;
        tracing::debug!("Search returned {} message groups", groups.len());

        let lines = self.filter.filter(&query, &groups)?;
        tracing::debug!("Kept {} candidate lines", lines.len());

        let raw = self.interpreter.interpret(&query, &lines).await?;
        tracing::debug!("Model replied with {} bytes", raw.len());

        let response = normalize_response(&raw).inspect_err(|e| {
            tracing::warn!("⚠️ Model output rejected for '{}': {}", query, e);
        })?;

        tracing::info!(
            "✅ Resolved '{}' at {} WL ({:?})",
            response.item_name,
            response.item_price,
            response.price_type
        );
        Ok(response)
    }
}
