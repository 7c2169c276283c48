use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::error::{MealPlanError, Result};
use crate::llm::{recover_recipes, LlmProvider, MealPlanRequestBuilder, RecoveryError};
use crate::models::{decode_generated, PreferenceProfile, Recipe};
use crate::services::RecipeStore;

pub const MIN_PLAN_DAYS: u32 = 1;
pub const MAX_PLAN_DAYS: u32 = 14;

/// Inputs for one generation attempt. Anything left out falls back to the
/// stored settings, then to server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub preferences: Option<PreferenceProfile>,
    #[serde(default)]
    pub number_of_days: Option<u32>,
    #[serde(default)]
    pub ai_model: Option<String>,
}

#[derive(Clone)]
pub struct MealPlanService {
    llm: LlmProvider,
    store: RecipeStore,
    default_days: u32,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag however the attempt ends.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MealPlanError::GenerationInProgress)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MealPlanService {
    pub fn new(llm: LlmProvider, store: RecipeStore, default_days: u32) -> Self {
        Self {
            llm,
            store,
            default_days,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generate a fresh batch and store it as the current batch.
    ///
    /// One attempt, no retries. A second call while one is running fails with
    /// [`MealPlanError::GenerationInProgress`].
    pub async fn generate(&self, request: GenerateRequest) -> Result<Vec<Recipe>> {
        let settings = self.store.settings().await;

        let api_key = non_blank(request.api_key)
            .or_else(|| non_blank(settings.open_router_api_key.clone()))
            .or_else(|| non_blank(self.llm.server_api_key().map(str::to_string)))
            .ok_or_else(|| {
                MealPlanError::Configuration(
                    "OpenRouter API key is required. Please configure it in settings or contact the administrator."
                        .to_string(),
                )
            })?;

        let preferences = request
            .preferences
            .or(settings.user_preferences)
            .ok_or_else(|| {
                MealPlanError::Configuration(
                    "Please set your meal preferences before generating a meal plan.".to_string(),
                )
            })?;
        preferences
            .validate()
            .map_err(|errors| MealPlanError::Validation(errors.to_string()))?;

        let days = request.number_of_days.unwrap_or(self.default_days);
        if !(MIN_PLAN_DAYS..=MAX_PLAN_DAYS).contains(&days) {
            return Err(MealPlanError::Validation(format!(
                "numberOfDays must be between {MIN_PLAN_DAYS} and {MAX_PLAN_DAYS}"
            )));
        }

        let model = non_blank(request.ai_model)
            .or_else(|| non_blank(settings.ai_model))
            .unwrap_or_else(|| self.llm.default_model().to_string());

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let config = self.llm.config();
        let builder = MealPlanRequestBuilder::new(&preferences, self.llm.wire_model(&model))
            .days(days)
            .temperature(config.temperature)
            .max_tokens(config.max_tokens);
        let chat_request = builder.build();

        tracing::info!(
            model = %model,
            days,
            total_meals = builder.total_meals(),
            diet = %preferences.diet_type,
            "Generating meal plan"
        );

        let client = self.llm.client(&model, &api_key)?;
        let completion = client.send(&chat_request).await?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Gateway usage"
            );
        }

        let recovered = recover_recipes(&completion.content)?;
        let recipes = decode_generated(&recovered.items);
        if recipes.is_empty() {
            return Err(RecoveryError::NoJsonArray.into());
        }

        self.store.save_current_batch(&recipes).await;

        tracing::info!(
            recipes = recipes.len(),
            requested = builder.total_meals(),
            repaired = recovered.repaired,
            "Meal plan generated"
        );
        Ok(recipes)
    }

    /// Ask the gateway whether `api_key` is accepted.
    pub async fn validate_key(&self, api_key: &str) -> Result<bool> {
        let client = self.llm.client(self.llm.default_model(), api_key)?;
        client.validate_key().await
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
