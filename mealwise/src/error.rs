use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::RecoveryError;

#[derive(Error, Debug)]
pub enum MealPlanError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing credential or preferences; generation was never attempted.
    #[error("{0}")]
    Configuration(String),

    #[error("A meal plan is already being generated")]
    GenerationInProgress,

    #[error("{message}")]
    Gateway {
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl MealPlanError {
    /// Builds a gateway error from an upstream status and body, mapping the
    /// statuses users can act on to friendly copy.
    pub fn gateway(status: Option<u16>, body: &str) -> Self {
        let lowered = body.to_lowercase();
        let message = match status {
            Some(401) => {
                "Invalid API key. Please check your OpenRouter API key in settings.".to_string()
            }
            Some(429) => "Rate limit exceeded. Please wait a moment and try again.".to_string(),
            Some(402) => {
                "Insufficient credits. Please add credits to your OpenRouter account.".to_string()
            }
            _ if lowered.contains("insufficient") => {
                "Insufficient credits. Please add credits to your OpenRouter account.".to_string()
            }
            _ if lowered.contains("rate limit") => {
                "Rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            _ => format!("OpenRouter API error: {body}"),
        };

        MealPlanError::Gateway { status, message }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            MealPlanError::NotFound(_) => StatusCode::NOT_FOUND,
            MealPlanError::Validation(_) | MealPlanError::Configuration(_) => {
                StatusCode::BAD_REQUEST
            }
            MealPlanError::GenerationInProgress => StatusCode::CONFLICT,
            MealPlanError::Database(_)
            | MealPlanError::Gateway { .. }
            | MealPlanError::Recovery(_)
            | MealPlanError::Http(_)
            | MealPlanError::Json(_)
            | MealPlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MealPlanError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MealPlanError>;
