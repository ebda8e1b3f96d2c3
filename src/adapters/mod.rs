// Adapters layer: reqwest implementations of the domain ports.

pub mod discord;
pub mod gemini;

pub use discord::DiscordSearchClient;
pub use gemini::GeminiClient;
