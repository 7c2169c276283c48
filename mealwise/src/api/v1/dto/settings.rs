use serde::{Deserialize, Serialize};

use crate::models::{AppSettings, PreferenceProfile};

/// Settings as reported to clients. The stored key itself is never echoed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub api_key_configured: bool,
    /// Last four characters of the stored key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_hint: Option<String>,
    /// Whether the server has its own fallback key.
    pub server_key_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<PreferenceProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_model: Option<String>,
    pub default_model: String,
}

impl SettingsResponse {
    pub fn new(settings: AppSettings, default_model: &str, server_key_available: bool) -> Self {
        let key = settings
            .open_router_api_key
            .filter(|key| !key.trim().is_empty());
        let api_key_hint = key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("…{tail}")
        });

        Self {
            api_key_configured: key.is_some(),
            api_key_hint,
            server_key_available,
            user_preferences: settings.user_preferences,
            ai_model: settings.ai_model,
            default_model: default_model.to_string(),
        }
    }
}

/// Request body for `PUT /v1/settings`. Omitted fields keep their stored
/// value; an empty `openRouterApiKey` or `aiModel` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub open_router_api_key: Option<String>,
    #[serde(default)]
    pub user_preferences: Option<PreferenceProfile>,
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// Request body for `POST /v1/settings:validate-key`. Without a key the
/// stored one is checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyResponse {
    pub valid: bool,
}
