//! v1 calendar handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::v1::dto::{AssignSlotRequest, AutoAssignRequest};
use crate::api::v1::handlers::{parse_day, parse_meal_type};
use crate::api::{AppJson, AppState};
use crate::error::{MealPlanError, Result};
use crate::models::{Recipe, WeeklyMealPlan};

/// `GET /api/v1/calendar`
pub async fn get_calendar(State(state): State<AppState>) -> Json<WeeklyMealPlan> {
    Json(state.calendar.current().await)
}

/// `DELETE /api/v1/calendar`
pub async fn clear_calendar(State(state): State<AppState>) -> StatusCode {
    state.calendar.clear().await;
    StatusCode::NO_CONTENT
}

/// `POST /api/v1/calendar:auto-assign`
pub async fn auto_assign(
    State(state): State<AppState>,
    AppJson(req): AppJson<AutoAssignRequest>,
) -> Json<WeeklyMealPlan> {
    let recipes = match req.recipes {
        Some(recipes) => recipes,
        None => state.store.current_batch().await,
    };
    Json(state.calendar.auto_assign(&recipes).await)
}

/// `PUT /api/v1/calendar/days/{day}/{mealType}`
pub async fn assign_slot(
    State(state): State<AppState>,
    Path((day, meal_type)): Path<(String, String)>,
    AppJson(req): AppJson<AssignSlotRequest>,
) -> Result<Json<WeeklyMealPlan>> {
    let day = parse_day(&day)?;
    let meal_type = parse_meal_type(&meal_type)?;
    let recipe = resolve_recipe(&state, req).await?;

    let plan = state.calendar.assign(day, meal_type, recipe).await?;
    Ok(Json(plan))
}

/// `DELETE /api/v1/calendar/days/{day}/{mealType}`
pub async fn remove_slot(
    State(state): State<AppState>,
    Path((day, meal_type)): Path<(String, String)>,
) -> Result<Json<WeeklyMealPlan>> {
    let day = parse_day(&day)?;
    let meal_type = parse_meal_type(&meal_type)?;

    let plan = state.calendar.remove(day, meal_type).await?;
    Ok(Json(plan))
}

async fn resolve_recipe(state: &AppState, req: AssignSlotRequest) -> Result<Recipe> {
    if let Some(recipe) = req.recipe {
        return Ok(recipe);
    }

    let id = req.recipe_id.ok_or_else(|| {
        MealPlanError::Validation("Either recipe or recipeId is required".to_string())
    })?;

    let library = state.store.library().await;
    let batch = state.store.current_batch().await;
    library
        .into_iter()
        .chain(batch)
        .find(|recipe| recipe.id == id)
        .ok_or_else(|| MealPlanError::NotFound(format!("Recipe {id}")))
}
