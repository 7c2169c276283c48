use axum::{
    routing::{get, post, put},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let meal_plans = Router::new()
        .route("/", post(handlers::meal_plans::generate_meal_plan))
        .route(
            "/current",
            get(handlers::meal_plans::get_current_meal_plan)
                .delete(handlers::meal_plans::clear_current_meal_plan),
        );

    let recipes = Router::new()
        .route(
            "/",
            get(handlers::recipes::list_recipes).post(handlers::recipes::save_recipe),
        )
        .route("/{id}", axum::routing::delete(handlers::recipes::delete_recipe));

    let calendar = Router::new()
        .route(
            "/",
            get(handlers::calendar::get_calendar).delete(handlers::calendar::clear_calendar),
        )
        .route(
            "/days/{day}/{mealType}",
            put(handlers::calendar::assign_slot).delete(handlers::calendar::remove_slot),
        )
        .route(
            "/days/{day}/shopping-list",
            get(handlers::shopping::get_day_shopping_list),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/settings:validate-key", post(handlers::settings::validate_key))
        .route("/calendar:auto-assign", post(handlers::calendar::auto_assign))
        .route("/shopping-list", get(handlers::shopping::get_shopping_list))
        .nest("/meal-plans", meal_plans)
        .nest("/recipes", recipes)
        .nest("/calendar", calendar)
}
