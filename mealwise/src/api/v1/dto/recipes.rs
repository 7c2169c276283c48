use serde::{Deserialize, Serialize};

use crate::models::Recipe;

/// Query for `GET /v1/recipes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesQuery {
    /// Case-insensitive text filter.
    pub q: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListResponse {
    pub recipes: Vec<Recipe>,
    pub total: usize,
}

impl From<Vec<Recipe>> for RecipeListResponse {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self {
            total: recipes.len(),
            recipes,
        }
    }
}
