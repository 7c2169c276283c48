use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::MealPlanError;

/// `axum::Json` whose rejections render as `{error, code}`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(MealPlanError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejections render as `{error, code}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(MealPlanError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for MealPlanError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

impl From<QueryRejection> for MealPlanError {
    fn from(rejection: QueryRejection) -> Self {
        MealPlanError::Validation(rejection.body_text())
    }
}

fn map_json_rejection(rejection: JsonRejection) -> MealPlanError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                MealPlanError::Validation(format!("Missing required field: {field}"))
            } else {
                MealPlanError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            MealPlanError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => MealPlanError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            MealPlanError::Internal("Failed to read request body".to_string())
        }
        _ => MealPlanError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_missing_field() {
        assert_eq!(
            extract_missing_field("Failed to deserialize: missing field `name` at line 1"),
            Some("name")
        );
        assert_eq!(extract_missing_field("expected a string"), None);
    }
}
