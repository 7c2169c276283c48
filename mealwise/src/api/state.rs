use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::LlmProvider;
use crate::services::{CalendarAssigner, MealPlanService, RecipeStore};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseBackend>,
    pub llm: LlmProvider,
    pub store: RecipeStore,
    pub calendar: CalendarAssigner,
    pub planner: MealPlanService,
}

impl AppState {
    pub fn new<B>(config: Config, backend: Arc<B>, llm: LlmProvider) -> Self
    where
        B: DatabaseBackend + 'static,
    {
        let store = RecipeStore::new(backend.clone());
        let db: Arc<dyn DatabaseBackend> = backend;
        let calendar = CalendarAssigner::new(store.clone());
        let planner = MealPlanService::new(llm.clone(), store.clone(), config.planner.default_days);

        Self {
            db,
            llm,
            store,
            calendar,
            planner,
        }
    }
}
