use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationError, ProposalGenerator, build_prompt, parse_proposal_input};
use crate::config::GenerationConfig;
use crate::models::proposal::ProposalInput;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API client that asks for a JSON proposal.
pub struct ClaudeGenerator {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl ClaudeGenerator {
    pub fn new(api_key: &str, config: &GenerationConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Text of the first content block, or empty if it is not a text block.
fn first_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .next()
        .filter(|block| block.kind == "text")
        .and_then(|block| block.text)
        .unwrap_or_default()
}

#[async_trait]
impl ProposalGenerator for ClaudeGenerator {
    async fn generate(&self, context: &str) -> Result<ProposalInput, GenerationError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: build_prompt(context),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let data: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(format!("invalid response body: {e}")))?;

        let text = first_text(data);
        log::debug!("Generation reply ({} chars) from {}", text.len(), self.model);
        parse_proposal_input(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_takes_leading_text_block() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"text","text":"{\"title\":\"a\"}"},{"type":"text","text":"later"}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(response), r#"{"title":"a"}"#);
    }

    #[test]
    fn first_text_ignores_non_text_block() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"x","name":"y","input":{}}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(response), "");
    }

    #[test]
    fn request_body_shape() {
        let body = MessagesRequest {
            model: "m",
            max_tokens: 1000,
            messages: vec![Message { role: "user", content: "hi".to_string() }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }
}
