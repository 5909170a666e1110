use crate::models::{BaseProvider, Generation, Message, Sampling};
use crate::openai::{chat_completion, ChatCompletionRequest};
use crate::reply::endpoint;
use anyhow::{Context, Result};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// DeepSeek speaks the OpenAI chat completions dialect; only the endpoint,
/// default model and the explicit `stream: false` differ.
#[derive(Clone)]
pub struct DeepSeekProvider {
    api_key: String,
    model: String,
    base_url: String,
    sampling: Sampling,
    client: reqwest::Client,
}

impl DeepSeekProvider {
    pub fn new(api_key: String, model: String, base_url: String, sampling: Sampling) -> Result<Self> {
        Ok(DeepSeekProvider {
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

impl BaseProvider for DeepSeekProvider {
    async fn generate(&self, system_message: &str, user_message: &str) -> Result<Generation> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system_message), Message::user(user_message)],
            temperature: self.sampling.temperature,
            max_tokens: self.sampling.max_tokens,
            stream: Some(false),
        };

        chat_completion(
            "DeepSeek",
            &self.client,
            &endpoint(&self.base_url, CHAT_COMPLETIONS_PATH),
            &self.api_key,
            &request,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::test_support::serve_once;

    fn provider(base_url: String) -> DeepSeekProvider {
        DeepSeekProvider::new(
            "sk-deepseek".to_string(),
            "deepseek-chat".to_string(),
            format!("{}/", base_url),
            Sampling::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn success_reply_is_normalized() {
        let (base_url, server) = serve_once(
            200,
            r#"{"choices":[{"message":{"content":"DeepSeek Test Response"}}]}"#,
        )
        .await;

        let generation = provider(base_url)
            .generate("System Message", "User Message")
            .await
            .unwrap();
        assert_eq!(
            generation,
            Generation::Success {
                text: "DeepSeek Test Response".to_string()
            }
        );

        let captured = server.await.unwrap();
        assert!(captured.head.starts_with("POST /v1/chat/completions "));
        assert_eq!(captured.body["model"], "deepseek-chat");
        assert_eq!(captured.body["stream"], false);
        assert_eq!(captured.body["messages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn server_error_becomes_failure() {
        let (base_url, server) = serve_once(500, "Internal Server Error").await;

        let generation = provider(base_url).generate("s", "u").await.unwrap();
        assert_eq!(
            generation,
            Generation::Failure {
                status: 500,
                error: "Internal Server Error".to_string()
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn success_without_choices_is_an_error() {
        let (base_url, server) = serve_once(200, r#"{"choices":[]}"#).await;

        let result = provider(base_url).generate("s", "u").await;
        assert!(result.is_err());
        server.await.unwrap();
    }
}
