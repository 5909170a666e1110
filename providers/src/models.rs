use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::anthropic::AnthropicProvider;
use crate::deepseek::DeepSeekProvider;
use crate::openai::OpenAiProvider;

/// Represents the role of the message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

/// A single `{role, content}` pair in a chat request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Sampling {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// The normalized outcome of one generation call.
///
/// Transport failures are not represented here; they surface as the `Err`
/// side of [`BaseProvider::generate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    /// The provider answered with a 2xx status
    Success { text: String },
    /// The provider answered with any other status
    Failure { status: u16, error: String },
}

/// The closed set of supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    DeepSeek,
    OpenAi,
    Anthropic,
}

impl ProviderType {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::DeepSeek => "deepseek-chat",
            ProviderType::OpenAi => "gpt-4",
            ProviderType::Anthropic => "claude-3-opus-20240229",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderType::DeepSeek => "https://api.deepseek.com",
            ProviderType::OpenAi => "https://api.openai.com",
            ProviderType::Anthropic => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::DeepSeek => write!(f, "deepseek"),
            ProviderType::OpenAi => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(ProviderType::DeepSeek),
            "openai" => Ok(ProviderType::OpenAi),
            "anthropic" | "claude" => Ok(ProviderType::Anthropic),
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", value)),
        }
    }
}

/// A trait for LLM providers
pub trait BaseProvider {
    /// Send a system and a user instruction and normalize the reply
    fn generate(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> impl std::future::Future<Output = Result<Generation>> + Send;
}

/// A provider factory that creates and manages specific LLM provider implementations
#[derive(Clone)]
pub enum Provider {
    DeepSeek(DeepSeekProvider),
    OpenAi(OpenAiProvider),
    Anthropic(AnthropicProvider),
}

impl Provider {
    /// Create the provider selected by `provider_type`.
    /// `model` and `base_url` fall back to the provider's defaults.
    pub fn new(
        provider_type: ProviderType,
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        sampling: Sampling,
    ) -> Result<Self> {
        let model = model.unwrap_or_else(|| provider_type.default_model().to_string());
        let base_url = base_url.unwrap_or_else(|| provider_type.default_base_url().to_string());

        Ok(match provider_type {
            ProviderType::DeepSeek => {
                Provider::DeepSeek(DeepSeekProvider::new(api_key, model, base_url, sampling)?)
            }
            ProviderType::OpenAi => {
                Provider::OpenAi(OpenAiProvider::new(api_key, model, base_url, sampling)?)
            }
            ProviderType::Anthropic => {
                Provider::Anthropic(AnthropicProvider::new(api_key, model, base_url, sampling)?)
            }
        })
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::DeepSeek(_) => ProviderType::DeepSeek,
            Provider::OpenAi(_) => ProviderType::OpenAi,
            Provider::Anthropic(_) => ProviderType::Anthropic,
        }
    }
}

impl BaseProvider for Provider {
    async fn generate(&self, system_message: &str, user_message: &str) -> Result<Generation> {
        match self {
            Provider::DeepSeek(provider) => provider.generate(system_message, user_message).await,
            Provider::OpenAi(provider) => provider.generate(system_message, user_message).await,
            Provider::Anthropic(provider) => provider.generate(system_message, user_message).await,
        }
    }
}
