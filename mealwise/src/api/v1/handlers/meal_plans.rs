//! v1 meal plan handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::v1::dto::MealPlanResponse;
use crate::api::{AppJson, AppState};
use crate::error::Result;
use crate::services::GenerateRequest;

/// `POST /api/v1/meal-plans`
///
/// Generates a batch and stores it as the current batch.
pub async fn generate_meal_plan(
    State(state): State<AppState>,
    AppJson(req): AppJson<GenerateRequest>,
) -> Result<Json<MealPlanResponse>> {
    let recipes = state.planner.generate(req).await?;
    Ok(Json(MealPlanResponse { recipes }))
}

/// `GET /api/v1/meal-plans/current`
pub async fn get_current_meal_plan(State(state): State<AppState>) -> Json<MealPlanResponse> {
    Json(MealPlanResponse {
        recipes: state.store.current_batch().await,
    })
}

/// `DELETE /api/v1/meal-plans/current`
pub async fn clear_current_meal_plan(State(state): State<AppState>) -> StatusCode {
    state.store.clear_current_batch().await;
    StatusCode::NO_CONTENT
}
