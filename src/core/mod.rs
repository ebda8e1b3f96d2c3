pub mod filter;
pub mod interpreter;
pub mod normalizer;
pub mod resolver;

pub use crate::domain::model::{CandidateLines, MessageGroup, PriceResponse, PriceType, Query};
pub use crate::domain::ports::{MessageSource, TextGenerator};
pub use crate::utils::error::Result;
