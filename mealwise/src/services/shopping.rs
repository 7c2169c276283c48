use crate::models::{
    Ingredient, IngredientGroup, Recipe, ShoppingGroup, ShoppingList, ShoppingListItem,
};

const AMOUNT_SEPARATOR: &str = " + ";

/// Merges ingredients across recipes into category groups.
///
/// Categories keep first-seen order. Inside a category, names match
/// case-insensitively; the first occurrence keeps its name, unit and
/// provenance and later amounts are appended with `" + "`.
pub struct ShoppingListAggregator;

impl ShoppingListAggregator {
    pub fn aggregate(recipes: &[Recipe]) -> Vec<IngredientGroup> {
        Self::merge(recipes)
            .into_iter()
            .map(|group| IngredientGroup {
                category: group.category,
                ingredients: group
                    .items
                    .into_iter()
                    .map(|item| Ingredient {
                        name: item.name,
                        amount: item.amount,
                        unit: item.unit,
                        category: item.category,
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn shopping_list(recipes: &[Recipe]) -> ShoppingList {
        ShoppingList {
            groups: Self::merge(recipes),
        }
    }

    fn merge(recipes: &[Recipe]) -> Vec<ShoppingGroup> {
        let mut groups: Vec<ShoppingGroup> = Vec::new();

        for recipe in recipes {
            for ingredient in &recipe.ingredients {
                let index = match groups
                    .iter()
                    .position(|group| group.category == ingredient.category)
                {
                    Some(index) => index,
                    None => {
                        groups.push(ShoppingGroup {
                            category: ingredient.category,
                            items: Vec::new(),
                        });
                        groups.len() - 1
                    }
                };

                let key = ingredient.name.to_lowercase();
                let items = &mut groups[index].items;
                match items
                    .iter_mut()
                    .find(|item| item.name.to_lowercase() == key)
                {
                    Some(existing) => {
                        existing.amount.push_str(AMOUNT_SEPARATOR);
                        existing.amount.push_str(&ingredient.amount);
                    }
                    None => items.push(ShoppingListItem::from_ingredient(
                        ingredient,
                        &recipe.id,
                        &recipe.name,
                    )),
                }
            }
        }

        tracing::debug!(
            recipes = recipes.len(),
            categories = groups.len(),
            "Aggregated shopping list"
        );
        groups
    }
}
