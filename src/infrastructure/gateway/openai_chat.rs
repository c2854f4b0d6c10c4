use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::{ChatGateway, ChatMessage};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GATEWAY_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-completions client for any OpenAI-compatible gateway.
pub struct OpenAiChatGateway {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

impl OpenAiChatGateway {
    pub fn new(api_key: String, endpoint: Option<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl ChatGateway for OpenAiChatGateway {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, DomainError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
                temperature: 0.7,
            })
            .send()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => DomainError::Gateway("Rate limit exceeded. Please try again later.".into()),
                402 => DomainError::Gateway("Payment required on the AI gateway.".into()),
                _ => DomainError::Gateway(format!("AI gateway {status}: {body}")),
            });
        }

        let result: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))?;
        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| DomainError::Gateway("AI gateway returned no choices".into()))
    }
}
