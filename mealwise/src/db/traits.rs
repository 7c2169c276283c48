use async_trait::async_trait;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Collection keys
// ---------------------------------------------------------------------------

/// The four independent top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Settings,
    RecipeLibrary,
    WeeklyCalendar,
    CurrentBatch,
}

impl Collection {
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Settings => "recipe-generator-settings",
            Collection::RecipeLibrary => "recipe-generator-library",
            Collection::WeeklyCalendar => "recipe-generator-weekly-calendar",
            Collection::CurrentBatch => "recipe-generator-current-meal-plan",
        }
    }
}

// ---------------------------------------------------------------------------
// Store traits
// ---------------------------------------------------------------------------

/// Keyed JSON-text storage, one value per collection.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn get(&self, collection: Collection) -> Result<Option<String>>;
    async fn set(&self, collection: Collection, value: &str) -> Result<()>;
    /// Remove the collection. Returns whether anything was stored.
    async fn remove(&self, collection: Collection) -> Result<bool>;
}

/// A complete database backend: collection storage plus a liveness check.
#[async_trait]
pub trait DatabaseBackend: CollectionStore {
    /// Fails when the store cannot be queried.
    async fn ping(&self) -> Result<()>;
}
