//! Prompt construction for meal plan generation.
//!
//! The builder only shapes the ask. Nothing here can make the generator
//! return the requested number of recipes or the requested fields; see
//! [`crate::llm::recovery`] for how replies are read back.

use chrono::Utc;
use nanoid::nanoid;

use crate::llm::api::{ChatMessage, ChatRequest};
use crate::models::PreferenceProfile;

/// Meals per day that the generator is asked for (breakfast, lunch, dinner).
pub const MEALS_PER_DAY: u32 = 3;

pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 50_000;

/// Upper bound on instruction steps requested per recipe.
pub const MAX_INSTRUCTION_STEPS: u32 = 6;

const NONCE_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug, Clone)]
pub struct MealPlanRequestBuilder<'a> {
    profile: &'a PreferenceProfile,
    number_of_days: u32,
    model: String,
    temperature: f32,
    max_tokens: u32,
    nonce: Option<String>,
}

impl<'a> MealPlanRequestBuilder<'a> {
    pub fn new(profile: &'a PreferenceProfile, model: impl Into<String>) -> Self {
        Self {
            profile,
            number_of_days: crate::config::DEFAULT_PLAN_DAYS,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            nonce: None,
        }
    }

    pub fn days(mut self, number_of_days: u32) -> Self {
        self.number_of_days = number_of_days;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Fix the uniqueness nonce instead of deriving one from the clock.
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn number_of_days(&self) -> u32 {
        self.number_of_days
    }

    /// Breakfast, lunch and dinner for every day; snacks are not requested.
    pub fn total_meals(&self) -> u32 {
        self.number_of_days * MEALS_PER_DAY
    }

    pub fn system_prompt(&self) -> String {
        meal_plan_system_prompt(self.profile.serving_size)
    }

    pub fn user_prompt(&self) -> String {
        let nonce = self.nonce.clone().unwrap_or_else(request_nonce);
        meal_plan_user_prompt(self.profile, self.number_of_days, self.total_meals(), &nonce)
    }

    pub fn build(&self) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt()),
                ChatMessage::user(self.user_prompt()),
            ],
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
        }
    }
}

/// `<unix millis>-<random token>`, so repeated asks are not served from a cache.
pub fn request_nonce() -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        nanoid!(7, &NONCE_ALPHABET)
    )
}

/// Output contract for the generator: a bare JSON array of recipe objects.
pub fn meal_plan_system_prompt(serving_size: u32) -> String {
    format!(
        r#"Generate meal plan recipes as valid JSON ONLY. NO other text.

CRITICAL: Every recipe MUST include mealType field.

Structure:
[{{
  "id": "unique-id",
  "name": "Recipe Name",
  "description": "One sentence",
  "mealType": "dinner",
  "ingredients": [{{"name": "item", "amount": "1", "unit": "cup", "category": "produce"}}],
  "instructions": ["Step 1", "Step 2", "Step 3", "Step 4", "Step 5"],
  "prepTime": 15,
  "cookTime": 30,
  "servings": {serving_size},
  "nutritionInfo": {{"calories": 450, "protein": 30, "carbs": 40, "fat": 15}},
  "tags": ["tag1", "tag2"]
}}]

mealType: "breakfast", "lunch", "dinner", or "snack"
category: "protein", "produce", "dairy", "pantry", or "other"
5-{MAX_INSTRUCTION_STEPS} steps max. Brief descriptions."#
    )
}

pub fn meal_plan_user_prompt(
    profile: &PreferenceProfile,
    number_of_days: u32,
    total_meals: u32,
    nonce: &str,
) -> String {
    let restrictions: Vec<&str> = profile
        .restrictions
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect();
    let avoid = if restrictions.is_empty() {
        String::new()
    } else {
        format!("Avoid: {}", restrictions.join(", "))
    };

    let location = match profile.location.trim() {
        "" => "USA",
        other => other,
    };

    format!(
        r#"Create {total_meals} UNIQUE {diet} recipes for {servings} people for a {number_of_days}-day meal plan.
EXACTLY {number_of_days} breakfast recipes, {number_of_days} lunch recipes, {number_of_days} dinner recipes.
{avoid}
Location: {location}

IMPORTANT: Generate completely NEW and DIFFERENT recipes each time. Be creative and diverse. Don't repeat common dishes.
Use seasonal ingredients, international cuisines, and varied cooking methods.
Request ID: {nonce}

CRITICAL: Include "mealType" field in EVERY recipe.
Return ONLY JSON array. No markdown, no extra text."#,
        diet = profile.diet_type,
        servings = profile.serving_size,
    )
}
