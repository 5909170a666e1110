mod models;

pub(crate) use models::{ChatCompletionRequest, ChatCompletionResponse};

use crate::models::{BaseProvider, Generation, Message, Sampling};
use crate::reply::{endpoint, into_generation};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    sampling: Sampling,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: String, sampling: Sampling) -> Result<Self> {
        Ok(OpenAiProvider {
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

impl BaseProvider for OpenAiProvider {
    async fn generate(&self, system_message: &str, user_message: &str) -> Result<Generation> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_message), Message::user(user_message)],
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            stream: None,
        };

        chat_completion(
            "OpenAI",
            &self.client,
            &endpoint(&self.base_url, CHAT_COMPLETIONS_PATH),
            &self.api_key,
            &request,
        )
        .await
    }
}

/// POSTs a chat completion request with bearer auth and reads
/// `choices[0].message.content` from the reply.
pub(crate) async fn chat_completion(
    provider: &str,
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    request: &ChatCompletionRequest,
) -> Result<Generation> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("API key is not a valid header value")?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    debug!(provider, model = %request.model, url, "sending chat completion request");

    let response = client
        .post(url)
        .headers(headers)
        .json(request)
        .send()
        .await
        .with_context(|| format!("Failed to send request to {} API", provider))?;

    into_generation(provider, response, ChatCompletionResponse::into_text).await
}
