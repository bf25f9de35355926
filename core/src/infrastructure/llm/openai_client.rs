use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    food_safety::{
        ports::LLMClient,
        value_objects::{ChatMessage, Completion, CompletionRequest},
    },
};

#[derive(Debug, Clone)]
pub struct OpenAILLMClient {
    api_key: Option<String>,
    model_name: String,
    api_url: String,
    max_tokens: u32,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAILLMClient {
    pub fn new(config: &LLMConfig) -> Self {
        Self {
            api_key: config
                .openai_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            model_name: config.openai_model.clone(),
            api_url: config.openai_api_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            client: Client::new(),
        }
    }

    async fn call_openai_api(
        &self,
        api_key: &str,
        request: ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, CoreError> {
        let url = format!("{}/chat/completions", self.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenAI API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenAI response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })
    }
}

impl LLMClient for OpenAILLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CoreError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("OpenAI API key is not configured");
            CoreError::Configuration
        })?;

        let response = self
            .call_openai_api(
                api_key,
                ChatCompletionRequest {
                    model: &self.model_name,
                    messages: &request.messages,
                    max_tokens: self.max_tokens,
                },
            )
            .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))?;

        Ok(Completion {
            text,
            model: response
                .model
                .unwrap_or_else(|| self.model_name.clone()),
        })
    }
}
