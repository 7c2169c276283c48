pub mod calendar;
pub(crate) mod health;
pub mod meal_plans;
pub mod recipes;
pub mod settings;
pub mod shopping;

pub use health::health_check;

use crate::error::{MealPlanError, Result};
use crate::models::MealType;

pub(crate) fn parse_meal_type(raw: &str) -> Result<MealType> {
    raw.parse()
        .map_err(|_| MealPlanError::Validation(format!("Unknown meal type: {raw}")))
}

pub(crate) fn parse_day(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| MealPlanError::Validation(format!("Invalid day index: {raw}")))
}
