pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::ResolverConfig;
pub use core::resolver::PriceResolver;
pub use domain::model::{PriceResponse, PriceType};
pub use utils::error::{ErrorKind, ResolverError, Result};
