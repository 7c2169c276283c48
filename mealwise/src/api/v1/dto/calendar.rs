use serde::Deserialize;

use crate::models::Recipe;

/// Request body for `PUT /v1/calendar/days/{day}/{mealType}`.
///
/// Either a full recipe, or the id of one in the library or current batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSlotRequest {
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub recipe_id: Option<String>,
}

/// Request body for `POST /v1/calendar:auto-assign`. Defaults to the
/// current batch when `recipes` is omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignRequest {
    #[serde(default)]
    pub recipes: Option<Vec<Recipe>>,
}
