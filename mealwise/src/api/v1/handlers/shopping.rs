//! v1 shopping list handlers.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::v1::dto::{ShoppingListQuery, ShoppingListResponse};
use crate::api::v1::handlers::parse_day;
use crate::api::{AppQuery, AppState};
use crate::error::Result;
use crate::models::Recipe;
use crate::services::ShoppingListAggregator;

fn render(recipes: &[Recipe], query: &ShoppingListQuery) -> Response {
    let list = ShoppingListAggregator::shopping_list(recipes);
    if query.wants_text() {
        return list.to_text().into_response();
    }
    Json(ShoppingListResponse::from(list)).into_response()
}

/// `GET /api/v1/shopping-list`
///
/// Built from every recipe on the calendar.
pub async fn get_shopping_list(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ShoppingListQuery>,
) -> Response {
    let recipes = state.calendar.assigned_recipes().await;
    render(&recipes, &query)
}

/// `GET /api/v1/calendar/days/{day}/shopping-list`
pub async fn get_day_shopping_list(
    State(state): State<AppState>,
    Path(day): Path<String>,
    AppQuery(query): AppQuery<ShoppingListQuery>,
) -> Result<Response> {
    let day = parse_day(&day)?;
    let recipes = state.calendar.day_recipes(day).await?;
    Ok(render(&recipes, &query))
}
