// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Once};

use serde_json::{json, Value};

use mealwise::config::{Config, LlmConfig};
use mealwise::db::{Database, LibSqlBackend};
use mealwise::llm::LlmProvider;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn llm_config_with_base_url(base_url: String) -> LlmConfig {
    LlmConfig {
        base_url: Some(base_url),
        timeout_secs: 5,
        ..LlmConfig::default()
    }
}

/// A chat completion reply in the gateway's success shape.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "gen-test",
        "object": "chat.completion",
        "created": 1,
        "model": "z-ai/glm-4.6",
        "choices": [
            {
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    })
}

pub fn recipe_json(index: usize, meal_type: &str) -> Value {
    json!({
        "id": format!("recipe-{index}"),
        "name": format!("Vegan {meal_type} {index}"),
        "description": "Plant-based and quick.",
        "mealType": meal_type,
        "ingredients": [
            {"name": "Chickpeas", "amount": "1", "unit": "can", "category": "pantry"},
            {"name": "Spinach", "amount": "2", "unit": "cups", "category": "produce"}
        ],
        "instructions": ["Rinse.", "Cook.", "Serve."],
        "prepTime": 10,
        "cookTime": 15,
        "servings": 2,
        "nutritionInfo": {"calories": 420, "protein": 18, "carbs": 50, "fat": 12},
        "tags": ["vegan"]
    })
}

/// `count` recipes cycling breakfast, lunch, dinner.
pub fn recipe_batch(count: usize) -> Vec<Value> {
    let meal_types = ["breakfast", "lunch", "dinner"];
    (0..count)
        .map(|i| recipe_json(i, meal_types[i % meal_types.len()]))
        .collect()
}

pub fn vegan_preferences() -> Value {
    json!({
        "dietType": "vegan",
        "location": "Portland, OR",
        "servingSize": 2,
        "preferredStores": ["safeway"],
        "restrictions": []
    })
}

pub async fn memory_backend() -> Arc<LibSqlBackend> {
    let config = Config::ephemeral();
    let raw_db = Database::new(&config.database)
        .await
        .expect("in-memory database");
    Arc::new(LibSqlBackend::new(raw_db))
}

pub fn provider_for(base_url: String) -> LlmProvider {
    LlmProvider::new(&llm_config_with_base_url(base_url))
}

// Re-export commonly used crates for convenience
pub use serial_test::serial;
pub use tempfile;
pub use wiremock;
