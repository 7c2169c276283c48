mod calendar;
mod generation;
mod shopping;
mod store;

pub use calendar::CalendarAssigner;
pub use generation::{GenerateRequest, MealPlanService, MAX_PLAN_DAYS, MIN_PLAN_DAYS};
pub use shopping::ShoppingListAggregator;
pub use store::RecipeStore;
