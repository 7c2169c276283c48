use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    Carnivore,
    Mediterranean,
    Keto,
    Paleo,
    Vegan,
    Vegetarian,
    Pescatarian,
    Whole30,
    GlutenFree,
    LowCarb,
    Balanced,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Carnivore => "carnivore",
            DietType::Mediterranean => "mediterranean",
            DietType::Keto => "keto",
            DietType::Paleo => "paleo",
            DietType::Vegan => "vegan",
            DietType::Vegetarian => "vegetarian",
            DietType::Pescatarian => "pescatarian",
            DietType::Whole30 => "whole30",
            DietType::GlutenFree => "gluten-free",
            DietType::LowCarb => "low-carb",
            DietType::Balanced => "balanced",
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Yokes,
    Safeway,
    Walmart,
    Target,
    Costco,
}

/// The user's diet configuration driving generation.
///
/// Overwritten wholesale on save; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    pub diet_type: DietType,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 1, message = "servingSize must be at least 1"))]
    pub serving_size: u32,
    #[serde(default)]
    pub preferred_stores: BTreeSet<Store>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl PreferenceProfile {
    pub fn new(diet_type: DietType, serving_size: u32) -> Self {
        Self {
            diet_type,
            location: String::new(),
            serving_size,
            preferred_stores: BTreeSet::new(),
            restrictions: Vec::new(),
            budget: None,
        }
    }
}

/// The persisted Settings collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_router_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<PreferenceProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
}
