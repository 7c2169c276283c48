//! v1 settings handlers.

use axum::extract::State;
use axum::Json;
use validator::Validate;

use crate::api::v1::dto::{
    SettingsResponse, UpdateSettingsRequest, ValidateKeyRequest, ValidateKeyResponse,
};
use crate::api::{AppJson, AppState};
use crate::error::{MealPlanError, Result};

fn settings_response(state: &AppState, settings: crate::models::AppSettings) -> SettingsResponse {
    SettingsResponse::new(
        settings,
        state.llm.default_model(),
        state.llm.server_api_key().is_some(),
    )
}

/// `GET /api/v1/settings`
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let settings = state.store.settings().await;
    Json(settings_response(&state, settings))
}

/// `PUT /api/v1/settings`
pub async fn update_settings(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>> {
    if let Some(preferences) = &req.user_preferences {
        preferences
            .validate()
            .map_err(|errors| MealPlanError::Validation(errors.to_string()))?;
    }

    let settings = state
        .store
        .update_settings(|settings| {
            if let Some(key) = req.open_router_api_key {
                let key = key.trim().to_string();
                settings.open_router_api_key = (!key.is_empty()).then_some(key);
            }
            if let Some(preferences) = req.user_preferences {
                settings.user_preferences = Some(preferences);
            }
            if let Some(model) = req.ai_model {
                let model = model.trim().to_string();
                settings.ai_model = (!model.is_empty()).then_some(model);
            }
        })
        .await;

    tracing::info!(
        api_key = settings.open_router_api_key.is_some(),
        preferences = settings.user_preferences.is_some(),
        "Settings updated"
    );

    Ok(Json(settings_response(&state, settings)))
}

/// `POST /api/v1/settings:validate-key`
pub async fn validate_key(
    State(state): State<AppState>,
    AppJson(req): AppJson<ValidateKeyRequest>,
) -> Result<Json<ValidateKeyResponse>> {
    let api_key = match req.api_key.filter(|key| !key.trim().is_empty()) {
        Some(key) => key,
        None => state.store.api_key().await.ok_or_else(|| {
            MealPlanError::Configuration("No API key to validate".to_string())
        })?,
    };

    let valid = state.planner.validate_key(&api_key).await?;
    Ok(Json(ValidateKeyResponse { valid }))
}
