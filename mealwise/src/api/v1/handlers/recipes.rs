//! v1 recipe library handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::v1::dto::{ListRecipesQuery, RecipeListResponse};
use crate::api::v1::handlers::parse_meal_type;
use crate::api::{AppJson, AppQuery, AppState};
use crate::error::{MealPlanError, Result};
use crate::models::Recipe;

/// `GET /api/v1/recipes`
pub async fn list_recipes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListRecipesQuery>,
) -> Result<Json<RecipeListResponse>> {
    let meal_type = query
        .meal_type
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_meal_type)
        .transpose()?;

    let recipes: Vec<Recipe> = state
        .store
        .search(query.q.as_deref().unwrap_or_default())
        .await
        .into_iter()
        .filter(|recipe| meal_type.is_none() || recipe.meal_type == meal_type)
        .collect();

    Ok(Json(recipes.into()))
}

/// `POST /api/v1/recipes`
///
/// Saves into the library, replacing any recipe with the same id.
pub async fn save_recipe(
    State(state): State<AppState>,
    AppJson(recipe): AppJson<Recipe>,
) -> Result<(StatusCode, Json<Recipe>)> {
    if recipe.id.trim().is_empty() {
        return Err(MealPlanError::Validation("Recipe id cannot be empty".to_string()));
    }
    if recipe.name.trim().is_empty() {
        return Err(MealPlanError::Validation("Recipe name cannot be empty".to_string()));
    }

    let saved = state.store.save(&recipe).await;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `DELETE /api/v1/recipes/{id}`
pub async fn delete_recipe(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if !state.store.delete(&id).await {
        tracing::debug!(recipe_id = %id, "Delete of unknown recipe ignored");
    }
    StatusCode::NO_CONTENT
}
