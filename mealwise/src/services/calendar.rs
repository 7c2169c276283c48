use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::{MealPlanError, Result};
use crate::models::{
    MealSlot, MealType, Recipe, WeeklyMealPlan, CALENDAR_HORIZON_DAYS, SLOT_MEAL_TYPES,
};
use crate::services::RecipeStore;

/// Owns the persisted calendar: lazy creation, slot edits and auto-fill.
#[derive(Clone)]
pub struct CalendarAssigner {
    store: RecipeStore,
    horizon: usize,
    lock: Arc<Mutex<()>>,
}

impl CalendarAssigner {
    pub fn new(store: RecipeStore) -> Self {
        Self::with_horizon(store, CALENDAR_HORIZON_DAYS)
    }

    pub fn with_horizon(store: RecipeStore, horizon: usize) -> Self {
        Self {
            store,
            horizon,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// The stored calendar, creating an empty one anchored now if none exists.
    pub async fn current(&self) -> WeeklyMealPlan {
        let _guard = self.lock.lock().await;
        self.load_or_init().await
    }

    async fn load_or_init(&self) -> WeeklyMealPlan {
        if let Some(plan) = self.store.calendar().await {
            return plan;
        }

        let plan = WeeklyMealPlan::starting_at(Utc::now(), self.horizon);
        tracing::info!(calendar_id = %plan.id, days = plan.days.len(), "Initialized meal calendar");
        self.store.save_calendar(&plan).await;
        plan
    }

    /// Place `recipe` in a slot, replacing whatever was there.
    pub async fn assign(
        &self,
        day: usize,
        meal_type: MealType,
        recipe: Recipe,
    ) -> Result<WeeklyMealPlan> {
        let _guard = self.lock.lock().await;
        let mut plan = self.load_or_init().await;

        *slot_mut(&mut plan, day, meal_type)? = MealSlot::filled(recipe);

        self.store.save_calendar(&plan).await;
        Ok(plan)
    }

    pub async fn remove(&self, day: usize, meal_type: MealType) -> Result<WeeklyMealPlan> {
        let _guard = self.lock.lock().await;
        let mut plan = self.load_or_init().await;

        *slot_mut(&mut plan, day, meal_type)? = MealSlot::empty();

        self.store.save_calendar(&plan).await;
        Ok(plan)
    }

    /// Puts the i-th recipe of each meal type on day i. Days past the end of
    /// a meal type's recipes keep their current slot; extra recipes are dropped.
    pub async fn auto_assign(&self, recipes: &[Recipe]) -> WeeklyMealPlan {
        let _guard = self.lock.lock().await;
        let mut plan = self.load_or_init().await;

        let mut placed = 0usize;
        for meal_type in SLOT_MEAL_TYPES {
            let matching = recipes
                .iter()
                .filter(|recipe| recipe.meal_type == Some(meal_type));

            for (day, recipe) in plan.days.iter_mut().zip(matching) {
                if let Some(slot) = day.slot_mut(meal_type) {
                    *slot = MealSlot::filled(recipe.clone());
                    placed += 1;
                }
            }
        }

        tracing::info!(placed, recipes = recipes.len(), "Auto-assigned recipes to calendar");
        self.store.save_calendar(&plan).await;
        plan
    }

    /// Drop the calendar. The next access starts a new one anchored at that time.
    pub async fn clear(&self) {
        let _guard = self.lock.lock().await;
        self.store.clear_calendar().await;
    }

    pub async fn day_recipes(&self, day: usize) -> Result<Vec<Recipe>> {
        let plan = self.current().await;
        let meals = plan
            .days
            .get(day)
            .ok_or_else(|| day_out_of_range(day, plan.days.len()))?;
        Ok(meals.recipes().cloned().collect())
    }

    pub async fn assigned_recipes(&self) -> Vec<Recipe> {
        self.current().await.recipes().cloned().collect()
    }
}

fn slot_mut(plan: &mut WeeklyMealPlan, day: usize, meal_type: MealType) -> Result<&mut MealSlot> {
    let days = plan.days.len();
    let meals = plan
        .days
        .get_mut(day)
        .ok_or_else(|| day_out_of_range(day, days))?;

    meals.slot_mut(meal_type).ok_or_else(|| {
        MealPlanError::Validation(format!(
            "{meal_type} recipes cannot be placed on the calendar"
        ))
    })
}

fn day_out_of_range(day: usize, days: usize) -> MealPlanError {
    MealPlanError::Validation(format!(
        "Day {day} is outside the calendar (0..{days})"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::{Database, LibSqlBackend};

    async fn assigner() -> CalendarAssigner {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let db = Database::new(&config).await.unwrap();
        CalendarAssigner::new(RecipeStore::new(Arc::new(LibSqlBackend::new(db))))
    }

    fn recipe(id: &str, meal_type: &str) -> Recipe {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": id,
            "mealType": meal_type
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_current_is_created_once() {
        let calendar = assigner().await;
        let first = calendar.current().await;
        let second = calendar.current().await;

        assert_eq!(first, second);
        assert_eq!(first.days.len(), CALENDAR_HORIZON_DAYS);
        assert!(first.id.starts_with("calendar-"));
        assert!(first.recipes().next().is_none());
    }

    #[tokio::test]
    async fn test_assign_then_remove_empties_slot() {
        let calendar = assigner().await;
        let plan = calendar
            .assign(1, MealType::Lunch, recipe("r1", "lunch"))
            .await
            .unwrap();
        assert_eq!(plan.days[1].lunch.recipe_id(), Some("r1"));

        let plan = calendar.remove(1, MealType::Lunch).await.unwrap();
        assert_eq!(plan.days[1].lunch, MealSlot::empty());
        assert_eq!(plan.days[1].lunch.recipe_id(), None);
    }

    #[tokio::test]
    async fn test_assign_last_write_wins() {
        let calendar = assigner().await;
        calendar
            .assign(0, MealType::Dinner, recipe("a", "dinner"))
            .await
            .unwrap();
        let plan = calendar
            .assign(0, MealType::Dinner, recipe("b", "lunch"))
            .await
            .unwrap();
        assert_eq!(plan.days[0].dinner.recipe_id(), Some("b"));
    }

    #[tokio::test]
    async fn test_assign_rejects_snack_and_bad_day() {
        let calendar = assigner().await;
        let snack = calendar
            .assign(0, MealType::Snack, recipe("s", "snack"))
            .await;
        assert!(matches!(snack, Err(MealPlanError::Validation(_))));

        let late = calendar
            .assign(CALENDAR_HORIZON_DAYS, MealType::Lunch, recipe("l", "lunch"))
            .await;
        assert!(matches!(late, Err(MealPlanError::Validation(_))));
        assert!(calendar.day_recipes(99).await.is_err());
    }

    #[tokio::test]
    async fn test_auto_assign_by_index_per_type() {
        let calendar = assigner().await;
        calendar
            .assign(3, MealType::Breakfast, recipe("kept", "breakfast"))
            .await
            .unwrap();

        let recipes = vec![
            recipe("b0", "breakfast"),
            recipe("d0", "dinner"),
            recipe("b1", "breakfast"),
            recipe("x", "snack"),
            recipe("l0", "lunch"),
        ];
        let plan = calendar.auto_assign(&recipes).await;

        assert_eq!(plan.days[0].breakfast.recipe_id(), Some("b0"));
        assert_eq!(plan.days[1].breakfast.recipe_id(), Some("b1"));
        assert_eq!(plan.days[0].lunch.recipe_id(), Some("l0"));
        assert_eq!(plan.days[0].dinner.recipe_id(), Some("d0"));
        assert!(plan.days[1].dinner.is_empty());
        assert_eq!(plan.days[3].breakfast.recipe_id(), Some("kept"));

        let day0: Vec<String> = calendar
            .day_recipes(0)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(day0, vec!["b0", "l0", "d0"]);
        assert_eq!(calendar.assigned_recipes().await.len(), 5);
    }

    #[tokio::test]
    async fn test_custom_horizon() {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let db = Database::new(&config).await.unwrap();
        let store = RecipeStore::new(Arc::new(LibSqlBackend::new(db)));
        let calendar = CalendarAssigner::with_horizon(store, 3);

        assert_eq!(calendar.current().await.days.len(), 3);
        assert!(calendar
            .assign(3, MealType::Dinner, recipe("d", "dinner"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_clear_reinitializes() {
        let calendar = assigner().await;
        calendar
            .assign(0, MealType::Dinner, recipe("a", "dinner"))
            .await
            .unwrap();
        calendar.clear().await;

        let fresh = calendar.current().await;
        assert!(fresh.recipes().next().is_none());
    }
}
