//! v1 API Data Transfer Objects.
//!
//! Request and response bodies that are not domain models themselves.
//! Recipes, calendars and shopping lists go over the wire in their model shape.

pub mod calendar;
pub mod meal_plans;
pub mod recipes;
pub mod settings;
pub mod shopping;

pub use calendar::*;
pub use meal_plans::*;
pub use recipes::*;
pub use settings::*;
pub use shopping::*;
