mod common;

use pretty_assertions::assert_eq;
use serde_json::Value;

use mealwise::llm::{recover_recipes, RecoveryError};
use mealwise::models::{decode_generated, MealType};

fn render_array(items: &[Value]) -> String {
    let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(","))
}

#[test]
fn test_truncated_last_recipe_keeps_complete_ones() {
    common::init_test_logger();

    for complete in 1..=5 {
        let batch = common::recipe_batch(complete + 1);
        let full = render_array(&batch);
        let last_start = full.len() - 1 - batch[complete].to_string().len();
        let last = &full[last_start..full.len() - 1];

        let cuts: Vec<usize> = last
            .char_indices()
            .filter(|(_, c)| *c == ']')
            .map(|(i, _)| last_start + i + 1)
            .collect();
        assert!(!cuts.is_empty());

        for cut in cuts {
            // Anything after the last `]` falls outside the bracket span.
            let content = format!("```json\n{},\"nutritionInfo\":{{\"calo", &full[..cut]);
            let recovered = recover_recipes(&content)
                .unwrap_or_else(|e| panic!("complete={complete} cut={cut}: {e}"));

            assert!(recovered.repaired);
            assert_eq!(recovered.items.len(), complete + 1);
            assert_eq!(&recovered.items[..complete], &batch[..complete]);
        }
    }
}

#[test]
fn test_balanced_input_is_not_altered() {
    let batch = common::recipe_batch(3);
    let content = format!("Sure! Here you go:\n{}\nBon appétit.", render_array(&batch));

    let recovered = recover_recipes(&content).expect("recover");
    assert!(!recovered.repaired);
    assert_eq!(recovered.items, batch);
}

#[test]
fn test_twelve_recipe_vegan_reply_round_trips() {
    let batch = common::recipe_batch(12);
    let content = format!("```json\n{}\n```", serde_json::to_string_pretty(&batch).unwrap());

    let recovered = recover_recipes(&content).expect("recover");
    let recipes = decode_generated(&recovered.items);

    assert_eq!(recipes.len(), 12);
    for (i, recipe) in recipes.iter().enumerate() {
        assert_eq!(recipe.id, format!("recipe-{i}"));
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.tags.contains(&"vegan".to_string()));
    }
    let dinners = recipes
        .iter()
        .filter(|r| r.meal_type == Some(MealType::Dinner))
        .count();
    assert_eq!(dinners, 4);
}

#[test]
fn test_three_unmatched_braces_are_closed() {
    let content = r#"[{"id":"a","meta":{"source":{"tags":["x"]"#;
    let recovered = recover_recipes(content).expect("recover");

    assert!(recovered.repaired);
    assert_eq!(recovered.items.len(), 1);
    assert_eq!(recovered.items[0]["id"], "a");
    assert_eq!(recovered.items[0]["meta"]["source"]["tags"][0], "x");
}

#[test]
fn test_cut_inside_string_is_reported_as_truncated() {
    let content = r#"[{"id":"a","name":"Pasta [v2] with sa"#;
    assert_eq!(recover_recipes(content), Err(RecoveryError::Truncated));
}

#[test]
fn test_prose_only_reply_has_no_array() {
    assert_eq!(
        recover_recipes("I'm sorry, I can't plan meals today."),
        Err(RecoveryError::NoJsonArray)
    );
}
