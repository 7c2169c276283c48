use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{MealType, Recipe};

pub const CALENDAR_HORIZON_DAYS: usize = 4;

/// Meal types that own a calendar slot. Snacks are never placed on the calendar.
pub const SLOT_MEAL_TYPES: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

/// One breakfast/lunch/dinner position. `recipe_id` is set iff `recipe` is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredMealSlot")]
pub struct MealSlot {
    recipe_id: Option<String>,
    recipe: Option<Recipe>,
}

/// A slot as found in storage. A stored `recipeId` is ignored and rederived
/// from the recipe.
#[derive(Deserialize)]
struct StoredMealSlot {
    #[serde(default)]
    recipe: Option<Recipe>,
}

impl From<StoredMealSlot> for MealSlot {
    fn from(stored: StoredMealSlot) -> Self {
        match stored.recipe {
            Some(recipe) => MealSlot::filled(recipe),
            None => MealSlot::empty(),
        }
    }
}

impl MealSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn filled(recipe: Recipe) -> Self {
        Self {
            recipe_id: Some(recipe.id.clone()),
            recipe: Some(recipe),
        }
    }

    pub fn recipe_id(&self) -> Option<&str> {
        self.recipe_id.as_deref()
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.recipe.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMeals {
    pub date: DateTime<Utc>,
    pub breakfast: MealSlot,
    pub lunch: MealSlot,
    pub dinner: MealSlot,
}

impl DayMeals {
    pub fn empty(date: DateTime<Utc>) -> Self {
        Self {
            date,
            breakfast: MealSlot::empty(),
            lunch: MealSlot::empty(),
            dinner: MealSlot::empty(),
        }
    }

    pub fn slot(&self, meal_type: MealType) -> Option<&MealSlot> {
        match meal_type {
            MealType::Breakfast => Some(&self.breakfast),
            MealType::Lunch => Some(&self.lunch),
            MealType::Dinner => Some(&self.dinner),
            MealType::Snack => None,
        }
    }

    pub fn slot_mut(&mut self, meal_type: MealType) -> Option<&mut MealSlot> {
        match meal_type {
            MealType::Breakfast => Some(&mut self.breakfast),
            MealType::Lunch => Some(&mut self.lunch),
            MealType::Dinner => Some(&mut self.dinner),
            MealType::Snack => None,
        }
    }

    /// Assigned recipes in breakfast, lunch, dinner order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .filter_map(MealSlot::recipe)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealPlan {
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub days: Vec<DayMeals>,
    pub created_at: DateTime<Utc>,
}

impl WeeklyMealPlan {
    /// A fresh plan anchored at `start` with every slot empty.
    pub fn starting_at(start: DateTime<Utc>, horizon: usize) -> Self {
        Self {
            id: format!("calendar-{}", start.timestamp_millis()),
            start_date: start,
            days: (0..horizon)
                .map(|offset| DayMeals::empty(start + Duration::days(offset as i64)))
                .collect(),
            created_at: start,
        }
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.days.iter().flat_map(DayMeals::recipes)
    }
}
