use crate::domain::model::{MessageGroup, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Searches the chat platform's message history.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn search(&self, query: &Query) -> Result<Vec<MessageGroup>>;
}

/// A generative-text model bound to a fixed system instruction.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
