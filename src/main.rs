use clap::Parser;
use gt_price_resolver::config::cli::{load_config, ServerArgs};
use gt_price_resolver::utils::{logger, validation::Validate};
use gt_price_resolver::{server, PriceResolver};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting gt-price-resolver");

    let mut config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Some(port) = args.port {
        config.server.port = port;
        tracing::info!("🔧 Port overridden to: {}", port);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let resolver = Arc::new(PriceResolver::from_config(&config)?);
    server::serve(&config.server.bind_address(), resolver).await?;

    Ok(())
}
