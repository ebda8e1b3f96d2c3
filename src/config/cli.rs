use crate::config::ResolverConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "gt-price-resolver")]
#[command(about = "HTTP service that estimates item prices from trade chat")]
pub struct ServerArgs {
    /// TOML config file; environment variables are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listening port
    #[arg(short, long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "price_check")]
#[command(about = "Resolve a single item price and print it as JSON")]
pub struct CheckArgs {
    /// Item name to look up
    pub item: String,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Loads from `path` when given, otherwise from the environment.
pub fn load_config(path: Option<&PathBuf>) -> Result<ResolverConfig> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            ResolverConfig::from_file(path)
        }
        None => {
            tracing::info!("📁 Loading configuration from environment");
            ResolverConfig::from_env()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_args() {
        let args = ServerArgs::parse_from(["gt-price-resolver", "--port", "8080", "-v"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_check_args() {
        let args = CheckArgs::parse_from(["price_check", "Dark Blade", "--config", "prices.toml"]);
        assert_eq!(args.item, "Dark Blade");
        assert_eq!(args.config, Some(PathBuf::from("prices.toml")));
    }
}
