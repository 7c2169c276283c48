use serde::{Deserialize, Serialize};

use crate::models::{ShoppingGroup, ShoppingList};

/// Query for the shopping list endpoints. `format=text` selects the
/// clipboard export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListQuery {
    pub format: Option<String>,
}

impl ShoppingListQuery {
    pub fn wants_text(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("text"))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListResponse {
    pub groups: Vec<ShoppingGroup>,
    pub item_count: usize,
}

impl From<ShoppingList> for ShoppingListResponse {
    fn from(list: ShoppingList) -> Self {
        Self {
            item_count: list.item_count(),
            groups: list.groups,
        }
    }
}
