use std::sync::Arc;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::Result;
use crate::llm::api::LlmApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
}

/// Resolves model identifiers to a backend and hands out per-credential
/// clients. Credentials come from the caller, so nothing here is cached.
#[derive(Debug, Clone)]
pub struct LlmProvider {
    config: Arc<LlmConfig>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn default_model(&self) -> &str {
        &self.config.model
    }

    /// The credential configured on the server, if any.
    pub fn server_api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    pub fn backend_for(&self, model: &str) -> LlmBackend {
        if let Some(base_url) = &self.config.base_url {
            return LlmBackend::OpenAICompatible {
                base_url: base_url.clone(),
            };
        }

        let (provider, _) = parse_llm_provider_model(model);
        match provider.to_lowercase().as_str() {
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => LlmBackend::OpenRouter,
        }
    }

    /// Model name as the backend expects it. Only local prefixes are removed;
    /// OpenRouter slugs go out unchanged.
    pub fn wire_model<'m>(&self, model: &'m str) -> &'m str {
        parse_llm_provider_model(model).1
    }

    pub fn client(&self, model: &str, api_key: &str) -> Result<LlmApiClient> {
        let config = LlmConfig {
            model: model.to_string(),
            ..(*self.config).clone()
        };
        LlmApiClient::new(&config, api_key)
    }
}
