mod models;

pub use models::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicRole};

use crate::models::{BaseProvider, Generation, Sampling};
use crate::reply::{endpoint, into_generation};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    base_url: String,
    sampling: Sampling,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String, base_url: String, sampling: Sampling) -> Result<Self> {
        Ok(AnthropicProvider {
            api_key,
            model,
            base_url,
            sampling,
            client: reqwest::Client::builder()
                .build()
                .context("Failed to build HTTP client")?,
        })
    }
}

impl BaseProvider for AnthropicProvider {
    async fn generate(&self, system_message: &str, user_message: &str) -> Result<Generation> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).context("API key is not a valid header value")?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let request = AnthropicRequest {
            model: self.model.clone(),
            system: system_message.to_string(),
            messages: vec![AnthropicMessage {
                role: AnthropicRole::User,
                content: user_message.to_string(),
            }],
            max_tokens: self.sampling.max_tokens,
            temperature: Some(self.sampling.temperature),
        };

        let url = endpoint(&self.base_url, MESSAGES_PATH);
        debug!(model = %self.model, url = %url, "sending Anthropic messages request");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Claude API")?;

        into_generation("Claude", response, AnthropicResponse::into_text).await
    }
}
