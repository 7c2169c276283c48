use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::db::{Collection, CollectionStore};
use crate::models::{AppSettings, MealType, PreferenceProfile, Recipe, WeeklyMealPlan};

/// Typed access to the four persisted collections.
///
/// Storage problems never reach the caller: with no backend, or when the
/// backend fails, reads come back empty and writes are dropped with a warning.
#[derive(Clone)]
pub struct RecipeStore {
    backend: Option<Arc<dyn CollectionStore>>,
    write_lock: Arc<Mutex<()>>,
}

impl RecipeStore {
    pub fn new(backend: Arc<dyn CollectionStore>) -> Self {
        Self {
            backend: Some(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store with nothing behind it. Every read is empty.
    pub fn detached() -> Self {
        Self {
            backend: None,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.backend.is_some()
    }

    async fn load<T: DeserializeOwned>(&self, collection: Collection) -> Option<T> {
        let backend = self.backend.as_ref()?;
        let raw = match backend.get(collection).await {
            Ok(raw) => raw?,
            Err(error) => {
                tracing::warn!(key = collection.key(), error = %error, "Failed to read collection");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(key = collection.key(), error = %error, "Discarding unreadable collection");
                None
            }
        }
    }

    async fn persist<T: Serialize + ?Sized>(&self, collection: Collection, value: &T) {
        let Some(backend) = self.backend.as_ref() else {
            tracing::debug!(key = collection.key(), "No backing store, skipping write");
            return;
        };

        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(key = collection.key(), error = %error, "Failed to encode collection");
                return;
            }
        };

        if let Err(error) = backend.set(collection, &raw).await {
            tracing::warn!(key = collection.key(), error = %error, "Failed to write collection");
        }
    }

    async fn discard(&self, collection: Collection) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(error) = backend.remove(collection).await {
            tracing::warn!(key = collection.key(), error = %error, "Failed to remove collection");
        }
    }

    // Settings

    pub async fn settings(&self) -> AppSettings {
        self.load(Collection::Settings).await.unwrap_or_default()
    }

    pub async fn save_settings(&self, settings: &AppSettings) {
        let _guard = self.write_lock.lock().await;
        self.persist(Collection::Settings, settings).await;
    }

    /// The stored gateway credential, ignoring blank values.
    pub async fn api_key(&self) -> Option<String> {
        self.settings()
            .await
            .open_router_api_key
            .filter(|key| !key.trim().is_empty())
    }

    /// Read, change and write the settings under the write lock. Returns
    /// the settings as stored.
    pub async fn update_settings<F>(&self, change: F) -> AppSettings
    where
        F: FnOnce(&mut AppSettings),
    {
        let _guard = self.write_lock.lock().await;
        let mut settings = self.settings().await;
        change(&mut settings);
        self.persist(Collection::Settings, &settings).await;
        settings
    }

    pub async fn save_api_key(&self, api_key: &str) {
        let api_key = api_key.trim().to_string();
        self.update_settings(|settings| settings.open_router_api_key = Some(api_key))
            .await;
    }

    pub async fn preferences(&self) -> Option<PreferenceProfile> {
        self.settings().await.user_preferences
    }

    pub async fn save_preferences(&self, preferences: &PreferenceProfile) {
        let preferences = preferences.clone();
        self.update_settings(|settings| settings.user_preferences = Some(preferences))
            .await;
    }

    // Recipe library

    pub async fn library(&self) -> Vec<Recipe> {
        self.load(Collection::RecipeLibrary).await.unwrap_or_default()
    }

    /// Insert or replace by id, stamping `savedAt`. Returns the stored recipe.
    pub async fn save(&self, recipe: &Recipe) -> Recipe {
        let _guard = self.write_lock.lock().await;
        let mut library = self.library().await;

        let mut saved = recipe.clone();
        saved.saved_at = Some(Utc::now());

        match library.iter_mut().find(|existing| existing.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => library.push(saved.clone()),
        }

        self.persist(Collection::RecipeLibrary, &library).await;
        tracing::debug!(recipe_id = %saved.id, library = library.len(), "Recipe saved");
        saved
    }

    /// Remove by id. Returns whether the recipe was in the library.
    pub async fn delete(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let mut library = self.library().await;
        let before = library.len();
        library.retain(|recipe| recipe.id != id);

        if library.len() == before {
            return false;
        }
        self.persist(Collection::RecipeLibrary, &library).await;
        true
    }

    /// Case-insensitive match over name, description, tags and ingredient
    /// names, in library order. A blank query returns everything.
    pub async fn search(&self, query: &str) -> Vec<Recipe> {
        let query = query.trim();
        let library = self.library().await;
        if query.is_empty() {
            return library;
        }
        library.into_iter().filter(|recipe| recipe.matches(query)).collect()
    }

    pub async fn by_meal_type(&self, meal_type: MealType) -> Vec<Recipe> {
        self.library()
            .await
            .into_iter()
            .filter(|recipe| recipe.meal_type == Some(meal_type))
            .collect()
    }

    pub async fn is_saved(&self, id: &str) -> bool {
        self.library().await.iter().any(|recipe| recipe.id == id)
    }

    // Current batch

    pub async fn current_batch(&self) -> Vec<Recipe> {
        self.load(Collection::CurrentBatch).await.unwrap_or_default()
    }

    pub async fn save_current_batch(&self, recipes: &[Recipe]) {
        let _guard = self.write_lock.lock().await;
        self.persist(Collection::CurrentBatch, recipes).await;
    }

    pub async fn clear_current_batch(&self) {
        let _guard = self.write_lock.lock().await;
        self.discard(Collection::CurrentBatch).await;
    }

    // Calendar

    pub async fn calendar(&self) -> Option<WeeklyMealPlan> {
        self.load(Collection::WeeklyCalendar).await
    }

    pub async fn save_calendar(&self, plan: &WeeklyMealPlan) {
        let _guard = self.write_lock.lock().await;
        self.persist(Collection::WeeklyCalendar, plan).await;
    }

    pub async fn clear_calendar(&self) {
        let _guard = self.write_lock.lock().await;
        self.discard(Collection::WeeklyCalendar).await;
    }
}
