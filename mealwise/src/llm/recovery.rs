//! Recovery of recipe arrays from raw generator output.
//!
//! Generators wrap the array in prose or markdown fences and, when they hit
//! their output-length limit, stop mid-object. [`recover_recipes`] locates the
//! array, parses it strictly, and on failure applies an append-only
//! bracket-closing repair before parsing once more.
//!
//! The bracket span is naive: it runs from the first `[` to the last `]`
//! anywhere in the text, so a stray array elsewhere in the reply is selected
//! along with the recipes.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Failed to parse meal plan response. The AI did not return valid JSON.")]
    NoJsonArray,

    #[error("Response was truncated. Try requesting fewer meals or try again.")]
    Truncated,
}

/// Successfully recovered array elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub items: Vec<Value>,
    /// True when the bracket repair was needed to parse the text.
    pub repaired: bool,
}

/// Parse (and if needed repair) the recipe array in `content`.
///
/// No field-level validation happens here. A trailing element that only
/// parsed because of the repair is returned like any other.
pub fn recover_recipes(content: &str) -> Result<Recovered, RecoveryError> {
    let candidate = bracket_span(content).ok_or(RecoveryError::NoJsonArray)?;

    if let Some(items) = parse_array(candidate) {
        if !items.is_empty() {
            return Ok(Recovered {
                items,
                repaired: false,
            });
        }
    }

    let repaired = repair_truncated(candidate);
    tracing::warn!(
        candidate_len = candidate.len(),
        appended = repaired.len() - candidate.len(),
        "Generator output did not parse, attempting truncation repair"
    );

    match parse_array(&repaired) {
        Some(items) if !items.is_empty() => {
            tracing::info!(
                recipes = items.len(),
                "Recovered recipes from truncated response"
            );
            Ok(Recovered {
                items,
                repaired: true,
            })
        }
        _ => Err(RecoveryError::Truncated),
    }
}

/// The substring from the first `[` through the last `]`.
pub fn bracket_span(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Close unbalanced objects and the outer array. Only ever appends.
pub fn repair_truncated(candidate: &str) -> String {
    let opens = candidate.matches('{').count();
    let closes = candidate.matches('}').count();

    let mut repaired = candidate.to_string();
    if opens > closes {
        repaired.push_str(&"}".repeat(opens - closes));
    }
    if !repaired.ends_with(']') {
        repaired.push(']');
    }
    repaired
}

fn parse_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(items),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "Strict JSON parse failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_array_from_surrounding_prose() {
        let content = "Here are your recipes:\n```json\n[{\"id\":\"a\"},{\"id\":\"b\"}]\n```\nEnjoy!";
        let recovered = recover_recipes(content).expect("recover");
        assert_eq!(recovered.items, vec![json!({"id": "a"}), json!({"id": "b"})]);
        assert!(!recovered.repaired);
    }

    #[test]
    fn missing_array_is_an_error() {
        assert_eq!(
            recover_recipes("I cannot help with that."),
            Err(RecoveryError::NoJsonArray)
        );
        assert_eq!(recover_recipes("] backwards ["), Err(RecoveryError::NoJsonArray));
    }

    #[test]
    fn repair_appends_braces_then_bracket() {
        let candidate = r#"[{"a":{"b":{"c":["x"]"#;
        assert_eq!(repair_truncated(candidate), candidate.to_string() + "}}}]");
    }

    #[test]
    fn repair_never_removes_when_balanced() {
        let candidate = r#"[{"a":1}},"#;
        let repaired = repair_truncated(candidate);
        assert!(repaired.starts_with(candidate));
        assert_eq!(repaired, format!("{candidate}]"));

        let balanced = r#"[{"a":1}]"#;
        assert_eq!(repair_truncated(balanced), balanced);
    }

    #[test]
    fn truncated_recipe_with_closed_inner_array_is_kept() {
        let content = r#"[{"id":"1","name":"Oats","tags":["quick"]},{"id":"2","name":"Soup","instructions":["Boil","Stir"]"#;
        let recovered = recover_recipes(content).expect("recover");
        assert!(recovered.repaired);
        assert_eq!(recovered.items.len(), 2);
        assert_eq!(recovered.items[0]["name"], "Oats");
        assert_eq!(recovered.items[1]["instructions"], json!(["Boil", "Stir"]));
    }

    #[test]
    fn unrepairable_output_is_truncated_error() {
        let content = r#"[{"id":"1","name":"Oat"#;
        // No closing bracket at all: the span cannot be located.
        assert_eq!(recover_recipes(content), Err(RecoveryError::NoJsonArray));

        // The span ends inside a string literal, so closing braces cannot help.
        let content = r#"[{"id":"1","note":"see [1] and more"#;
        assert_eq!(recover_recipes(content), Err(RecoveryError::Truncated));
    }

    #[test]
    fn empty_array_is_treated_as_unrecoverable() {
        assert_eq!(recover_recipes("[]"), Err(RecoveryError::Truncated));
    }

    #[test]
    fn stray_array_inside_object_is_selected() {
        assert_eq!(
            recover_recipes(r#"{"recipes": [1, 2]} trailing"#),
            Ok(Recovered {
                items: vec![json!(1), json!(2)],
                repaired: false,
            })
        );
    }
}
