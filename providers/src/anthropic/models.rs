use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The system instruction travels in the top-level `system` field, so a
/// request only ever carries the user turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnthropicRole {
    #[serde(rename = "user")]
    User,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub system: String,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
}

impl AnthropicResponse {
    /// `content[0].text`
    pub fn into_text(self) -> Result<String> {
        match self.content.into_iter().next() {
            Some(AnthropicContentBlock::Text { text }) => Ok(text),
            Some(AnthropicContentBlock::Other) => Err(anyhow::anyhow!(
                "First content block in Anthropic response is not text"
            )),
            None => Err(anyhow::anyhow!("Empty content array in Anthropic response")),
        }
    }
}
