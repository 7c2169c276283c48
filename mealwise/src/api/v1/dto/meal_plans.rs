use serde::Serialize;

use crate::models::Recipe;

/// Response for `POST /v1/meal-plans` and `GET /v1/meal-plans/current`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub recipes: Vec<Recipe>,
}
