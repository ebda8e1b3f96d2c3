use clap::Parser;
use gt_price_resolver::config::cli::{load_config, CheckArgs};
use gt_price_resolver::utils::{logger, validation::Validate};
use gt_price_resolver::{ErrorKind, PriceResolver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CheckArgs::parse();

    logger::init_cli_logger(args.verbose);

    let config = load_config(args.config.as_ref())?;
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let resolver = PriceResolver::from_config(&config)?;

    match resolver.resolve(&args.item).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Err(e) => {
            tracing::error!("❌ Lookup failed: {} (kind: {})", e, e.kind().as_str());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 依錯誤類別決定退出碼
            let exit_code = match e.kind() {
                ErrorKind::NoMatch => 2,
                ErrorKind::InvalidInput => 64,
                ErrorKind::Upstream | ErrorKind::MalformedResponse => 1,
                ErrorKind::Config => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
