use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("Unknown meal type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Produce,
    Dairy,
    Pantry,
    #[default]
    Other,
}

impl IngredientCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Produce => "produce",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Pantry => "pantry",
            IngredientCategory::Other => "other",
        }
    }

    /// Unrecognised categories fall into `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "protein" => IngredientCategory::Protein,
            "produce" => IngredientCategory::Produce,
            "dairy" => IngredientCategory::Dairy,
            "pantry" => IngredientCategory::Pantry,
            _ => IngredientCategory::Other,
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
    #[serde(default)]
    pub category: IngredientCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` when the generator produced a meal type outside the closed set.
    #[serde(default)]
    pub meal_type: Option<MealType>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<NutritionInfo>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

fn default_servings() -> u32 {
    1
}

impl Recipe {
    /// Searchable fields: name, description, any tag, any ingredient name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.name.to_lowercase().contains(&query))
    }
}

// ---------------------------------------------------------------------------
// Decoding of generator output
// ---------------------------------------------------------------------------

/// Convert recovered generator elements into recipes.
///
/// Nothing past the structural parse is trusted: every field is read
/// defensively, non-object elements are skipped, and missing or repeated ids
/// are replaced so ids stay unique within the batch.
pub fn decode_generated(items: &[Value]) -> Vec<Recipe> {
    let mut seen = HashSet::new();
    let mut recipes = Vec::with_capacity(items.len());

    for item in items {
        let Some(obj) = item.as_object() else {
            tracing::debug!("Skipping non-object element in generated recipes");
            continue;
        };

        let mut recipe = decode_recipe(obj);
        if recipe.id.is_empty() || !seen.insert(recipe.id.clone()) {
            recipe.id = nanoid!();
            seen.insert(recipe.id.clone());
        }
        recipes.push(recipe);
    }

    recipes
}

fn decode_recipe(obj: &Map<String, Value>) -> Recipe {
    let servings = number_field(obj, "servings")
        .map(|n| n.max(0.0) as u32)
        .filter(|n| *n > 0)
        .unwrap_or_else(default_servings);

    Recipe {
        id: string_field(obj, "id"),
        name: string_field(obj, "name"),
        description: string_field(obj, "description"),
        meal_type: obj
            .get("mealType")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        ingredients: obj
            .get("ingredients")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(decode_ingredient)
                    .collect()
            })
            .unwrap_or_default(),
        instructions: string_list(obj, "instructions"),
        prep_time: minutes_field(obj, "prepTime"),
        cook_time: minutes_field(obj, "cookTime"),
        servings,
        nutrition_info: obj
            .get("nutritionInfo")
            .and_then(Value::as_object)
            .map(|info| NutritionInfo {
                calories: number_field(info, "calories").unwrap_or(0.0),
                protein: number_field(info, "protein").unwrap_or(0.0),
                carbs: number_field(info, "carbs").unwrap_or(0.0),
                fat: number_field(info, "fat").unwrap_or(0.0),
            }),
        tags: string_list(obj, "tags"),
        saved_at: None,
    }
}

fn decode_ingredient(obj: &Map<String, Value>) -> Ingredient {
    Ingredient {
        name: string_field(obj, "name"),
        amount: string_field(obj, "amount"),
        unit: string_field(obj, "unit"),
        category: obj
            .get("category")
            .and_then(Value::as_str)
            .map(IngredientCategory::parse_lenient)
            .unwrap_or_default(),
    }
}

/// Strings pass through; numbers and booleans are rendered (amounts are often
/// emitted as bare numbers).
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn minutes_field(obj: &Map<String, Value>, key: &str) -> u32 {
    number_field(obj, key)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.round() as u32)
        .unwrap_or(0)
}
