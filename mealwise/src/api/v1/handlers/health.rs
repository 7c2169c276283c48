use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::llm::LlmBackend;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub database: DatabaseStatus,
    pub llm: LlmStatus,
    pub generating: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatus {
    pub provider: String,
    pub model: String,
    pub server_key: bool,
}

/// `GET /api/v1/health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let database = match state.db.ping().await {
        Ok(()) => DatabaseStatus {
            status: "ok".to_string(),
        },
        Err(error) => {
            tracing::warn!(error = %error, "Database health check failed");
            DatabaseStatus {
                status: "error".to_string(),
            }
        }
    };

    let model = state.llm.default_model().to_string();
    let provider = match state.llm.backend_for(&model) {
        LlmBackend::OpenRouter => "openrouter",
        LlmBackend::Ollama => "ollama",
        LlmBackend::LmStudio => "lmstudio",
        LlmBackend::OpenAICompatible { .. } => "openai-compatible",
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        llm: LlmStatus {
            provider: provider.to_string(),
            model,
            server_key: state.llm.server_api_key().is_some(),
        },
        generating: state.planner.is_generating(),
    })
}
