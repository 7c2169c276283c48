use serde::{Deserialize, Serialize};

use super::{Ingredient, IngredientCategory};

/// Ingredients of one category, merged by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    pub category: IngredientCategory,
    pub ingredients: Vec<Ingredient>,
}

/// A merged ingredient annotated with the recipe that first contributed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub name: String,
    pub amount: String,
    pub unit: String,
    pub category: IngredientCategory,
    pub recipe_id: String,
    pub recipe_name: String,
    /// UI-only; starts false every time the list is rebuilt.
    pub checked: bool,
}

impl ShoppingListItem {
    pub fn from_ingredient(ingredient: &Ingredient, recipe_id: &str, recipe_name: &str) -> Self {
        Self {
            name: ingredient.name.clone(),
            amount: ingredient.amount.clone(),
            unit: ingredient.unit.clone(),
            category: ingredient.category,
            recipe_id: recipe_id.to_string(),
            recipe_name: recipe_name.to_string(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingGroup {
    pub category: IngredientCategory,
    pub items: Vec<ShoppingListItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub groups: Vec<ShoppingGroup>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|group| group.items.is_empty())
    }

    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    /// Flip the checked flag of the `index`-th item in `category`.
    /// Returns the new state, or `None` when there is no such item.
    pub fn toggle(&mut self, category: IngredientCategory, index: usize) -> Option<bool> {
        let item = self
            .groups
            .iter_mut()
            .find(|group| group.category == category)?
            .items
            .get_mut(index)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    /// Plain-text export used for copying the list to the clipboard.
    pub fn to_text(&self) -> String {
        let mut text = String::from("📋 Shopping List\n\n");
        for group in &self.groups {
            text.push_str(&group.category.as_str().to_uppercase());
            text.push('\n');
            for item in &group.items {
                text.push_str(&format!("☐ {} {} {}\n", item.amount, item.unit, item.name));
            }
            text.push('\n');
        }
        text
    }
}
