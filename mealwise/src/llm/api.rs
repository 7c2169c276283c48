use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{MealPlanError, Result},
};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

const APP_REFERER: &str = "http://localhost:3000";
const APP_TITLE: &str = "Recipe Generator";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// What the gateway returned for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// Holds only the credential and transport settings. Every call is a single
/// attempt; retrying is left to the caller.
#[derive(Clone)]
pub struct LlmApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(MealPlanError::Configuration(
                "OpenRouter API key is required. Please configure it in settings or contact the administrator."
                    .to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| {
                MealPlanError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        Ok(Self {
            http,
            base_url: resolve_base_url(config).trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST one chat completion request.
    pub async fn send(&self, request: &ChatRequest) -> Result<Completion> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            max_tokens = ?request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await
            .map_err(|error| {
                tracing::warn!(error = %error, "Chat completion transport failure");
                MealPlanError::gateway(error.status().map(|s| s.as_u16()), &error.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body_len = body.len(), "Gateway rejected request");
            return Err(MealPlanError::gateway(Some(status.as_u16()), &body));
        }

        let body: ChatResponse = response.json().await.map_err(|error| {
            MealPlanError::gateway(
                Some(status.as_u16()),
                &format!("Failed to parse LLM response: {error}"),
            )
        })?;

        Self::extract_content(body)
    }

    /// Check whether the credential is accepted by listing models.
    pub async fn validate_key(&self) -> Result<bool> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|error| {
                MealPlanError::gateway(error.status().map(|s| s.as_u16()), &error.to_string())
            })?;

        Ok(response.status().is_success())
    }

    fn extract_content(response: ChatResponse) -> Result<Completion> {
        let usage = response.usage;
        let choice = response.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let content = choice
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(MealPlanError::Gateway {
                status: None,
                message: "No content returned from API".to_string(),
            });
        }

        if finish_reason.as_deref() == Some("length") {
            tracing::warn!("Completion stopped at the output token limit");
        }

        Ok(Completion {
            content,
            finish_reason,
            usage,
        })
    }
}

fn resolve_base_url(config: &LlmConfig) -> String {
    if let Some(base_url) = &config.base_url {
        return base_url.clone();
    }
    let (provider, _) = parse_llm_provider_model(&config.model);
    default_base_url(provider).to_string()
}

pub fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENROUTER_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_wire_shape() {
        let request = ChatRequest {
            model: "z-ai/glm-4.6".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: Some(1.0),
            max_tokens: Some(50_000),
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "model": "z-ai/glm-4.6",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 1.0,
                "max_tokens": 50000
            })
        );
    }

    #[test]
    fn missing_api_key_is_configuration_error() {
        let result = LlmApiClient::new(&LlmConfig::default(), "  ");
        assert!(matches!(result, Err(MealPlanError::Configuration(_))));
    }

    #[test]
    fn base_url_follows_provider_prefix() {
        let mut config = LlmConfig::default();
        let client = LlmApiClient::new(&config, "k").expect("client");
        assert_eq!(client.base_url(), OPENROUTER_BASE_URL);

        config.model = "openai/gpt-4o-mini".to_string();
        let client = LlmApiClient::new(&config, "k").expect("client");
        assert_eq!(client.base_url(), OPENROUTER_BASE_URL);

        config.model = "ollama/llama3.2".to_string();
        let client = LlmApiClient::new(&config, "k").expect("client");
        assert_eq!(client.base_url(), OLLAMA_BASE_URL);

        config.base_url = Some("http://gateway.local/v1/".to_string());
        let client = LlmApiClient::new(&config, "k").expect("client");
        assert_eq!(client.base_url(), "http://gateway.local/v1");
    }

    #[test]
    fn empty_content_is_rejected() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": ""}}]
        }))
        .expect("deserialize");

        let result = LlmApiClient::extract_content(response);
        assert!(matches!(result, Err(MealPlanError::Gateway { status: None, .. })));
    }

    #[test]
    fn content_and_usage_are_extracted() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "[]"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }))
        .expect("deserialize");

        let completion = LlmApiClient::extract_content(response).expect("content");
        assert_eq!(completion.content, "[]");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(12));
    }
}
