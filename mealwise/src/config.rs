use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub const DEFAULT_MODEL: &str = "z-ai/glm-4.6";
pub const DEFAULT_PLAN_DAYS: u32 = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub busy_timeout_ms: u64,
    pub journal_mode: String,
    pub synchronous: String,
}

/// Gateway configuration for the chat completion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Model used when neither the request nor stored settings name one.
    pub model: String,
    /// Server-side credential, used when the caller supplies none.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    pub default_days: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 120,
            max_tokens: 50_000,
            temperature: 1.0,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "file:mealwise.db".to_string(),
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
            synchronous: "NORMAL".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let llm_defaults = LlmConfig::default();
        let db_defaults = DatabaseConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("MEALWISE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("MEALWISE_PORT", 3000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(db_defaults.url),
                busy_timeout_ms: parse_env_or(
                    "DATABASE_BUSY_TIMEOUT_MS",
                    db_defaults.busy_timeout_ms,
                ),
                journal_mode: env::var("DATABASE_JOURNAL_MODE")
                    .unwrap_or(db_defaults.journal_mode),
                synchronous: env::var("DATABASE_SYNCHRONOUS").unwrap_or(db_defaults.synchronous),
            },
            llm: LlmConfig {
                model: non_empty_env("LLM_MODEL").unwrap_or(llm_defaults.model),
                api_key: non_empty_env("OPENROUTER_API_KEY"),
                base_url: non_empty_env("LLM_BASE_URL"),
                timeout_secs: parse_env_or("LLM_TIMEOUT", llm_defaults.timeout_secs),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", llm_defaults.max_tokens),
                temperature: parse_env_or("LLM_TEMPERATURE", llm_defaults.temperature),
            },
            planner: PlannerConfig {
                default_days: parse_env_or("MEAL_PLAN_DAYS", DEFAULT_PLAN_DAYS),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// In-memory database and no server-side credential. Used by tests.
    pub fn ephemeral() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                ..DatabaseConfig::default()
            },
            llm: LlmConfig::default(),
            planner: PlannerConfig {
                default_days: DEFAULT_PLAN_DAYS,
            },
        }
    }
}

/// Prefixes that name a local OpenAI-compatible server rather than an
/// OpenRouter model slug. `openai/...` and `openrouter/...` are real OpenRouter
/// slugs and are never treated as routing hints.
pub const LOCAL_LLM_PROVIDERS: &[&str] = &["ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
///
/// Only local prefixes are split off. Anything else is an OpenRouter model
/// slug and is passed through whole.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if LOCAL_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    ("openrouter", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_llm_config_defaults() {
        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_TOKENS");
        std::env::remove_var("OPENROUTER_API_KEY");

        let config = Config::default();
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.max_tokens, 50_000);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.planner.default_days, 4);
    }

    #[test]
    #[serial]
    fn test_llm_config_from_env() {
        std::env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
        std::env::set_var("LLM_MAX_TOKENS", "8000");
        std::env::set_var("OPENROUTER_API_KEY", "sk-or-server");

        let config = Config::default();
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 8000);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-or-server"));

        std::env::remove_var("LLM_MODEL");
        std::env::remove_var("LLM_MAX_TOKENS");
        std::env::remove_var("OPENROUTER_API_KEY");
    }

    #[test]
    #[serial]
    fn test_blank_api_key_is_ignored() {
        std::env::set_var("OPENROUTER_API_KEY", "   ");
        let config = Config::default();
        assert!(config.llm.api_key.is_none());
        std::env::remove_var("OPENROUTER_API_KEY");
    }

    #[test]
    #[serial]
    fn test_parse_env_or_invalid_value_falls_back() {
        std::env::set_var("__TEST_PARSE_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_PARSE_PORT", 3000);
        assert_eq!(result, 3000);
        std::env::remove_var("__TEST_PARSE_PORT");
    }

    #[test]
    fn test_parse_llm_provider_model() {
        assert_eq!(
            parse_llm_provider_model("openai/gpt-4o-mini"),
            ("openrouter", "openai/gpt-4o-mini")
        );
        assert_eq!(
            parse_llm_provider_model("z-ai/glm-4.6"),
            ("openrouter", "z-ai/glm-4.6")
        );
        assert_eq!(
            parse_llm_provider_model("openrouter/auto"),
            ("openrouter", "openrouter/auto")
        );
        assert_eq!(
            parse_llm_provider_model("ollama/llama3.2"),
            ("ollama", "llama3.2")
        );
        assert_eq!(
            parse_llm_provider_model("LMStudio/qwen"),
            ("LMStudio", "qwen")
        );
    }
}
