pub mod anthropic;
pub mod deepseek;
pub mod models;
pub mod openai;
mod reply;

// Re-export common types and traits from models
pub use models::{BaseProvider, Generation, Message, Provider, ProviderType, Role, Sampling};

pub use anthropic::AnthropicProvider;
pub use deepseek::DeepSeekProvider;
pub use openai::OpenAiProvider;
