mod api;
pub mod prompts;
mod provider;
pub mod recovery;

pub use api::{default_base_url, ChatMessage, ChatRequest, Completion, LlmApiClient, Usage};
pub use prompts::MealPlanRequestBuilder;
pub use provider::{LlmBackend, LlmProvider};
pub use recovery::{recover_recipes, Recovered, RecoveryError};
