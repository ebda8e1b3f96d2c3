#[cfg(feature = "lambda")]
use gt_price_resolver::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use gt_price_resolver::{PriceResolver, PriceResponse, ResolverConfig};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::Deserialize;
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub item: Option<String>,
}

#[cfg(feature = "lambda")]
async fn function_handler(
    resolver: Arc<PriceResolver>,
    event: LambdaEvent<Request>,
) -> Result<PriceResponse, Error> {
    let item = event.payload.item.unwrap_or_default();

    resolver.resolve(&item).await.map_err(|e| {
        if e.is_recoverable() {
            tracing::warn!(kind = e.kind().as_str(), "Price lookup failed: {}", e);
        } else {
            tracing::error!(kind = e.kind().as_str(), "❌ Price lookup failed: {}", e);
        }
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後所有呼叫共用
    let config = ResolverConfig::from_env()?;
    config.validate()?;
    let resolver = Arc::new(PriceResolver::from_config(&config)?);

    run(service_fn(move |event| {
        let resolver = resolver.clone();
        async move { function_handler(resolver, event).await }
    }))
    .await
}
