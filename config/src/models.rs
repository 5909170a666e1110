use crate::ConfigError;
use providers::{Provider, ProviderType, Sampling};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

/// Connection settings for the graph store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GraphConfig {
    #[serde(default = "default_db_type")]
    pub db_type: String,
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            db_type: default_db_type(),
            uri: None,
            user: None,
            password: None,
            database: default_database(),
        }
    }
}

/// Provider selection and one credential per supported provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    pub deepseek_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            provider: None,
            model: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            deepseek_api_key: None,
            openai_api_key: None,
            claude_api_key: None,
        }
    }
}

impl LlmConfig {
    /// The credential configured for `provider`, ignoring blank values.
    pub fn api_key_for(&self, provider: ProviderType) -> Option<&str> {
        let key = match provider {
            ProviderType::DeepSeek => self.deepseek_api_key.as_deref(),
            ProviderType::OpenAi => self.openai_api_key.as_deref(),
            ProviderType::Anthropic => self.claude_api_key.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn provider_type(&self) -> Result<ProviderType, ConfigError> {
        let name = self
            .provider
            .as_deref()
            .ok_or(ConfigError::Missing("LLM_PROVIDER"))?;
        name.parse()
            .map_err(|_| ConfigError::UnsupportedProvider(name.to_string()))
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct WalkConfig {
    /// Upper bound on agents visited in one walk. Unbounded when absent.
    pub max_hops: Option<usize>,
}

fn default_db_type() -> String {
    "neo4j".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

impl TryFrom<&Config> for Provider {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        let llm = &config.llm;
        let provider_type = llm.provider_type()?;
        let api_key = llm
            .api_key_for(provider_type)
            .ok_or_else(|| ConfigError::MissingCredential(provider_type.to_string()))?;

        Provider::new(
            provider_type,
            api_key.to_string(),
            llm.model.clone(),
            llm.base_url.clone(),
            Sampling {
                temperature: llm.temperature,
                max_tokens: llm.max_tokens,
            },
        )
        .map_err(ConfigError::ProviderInit)
    }
}
