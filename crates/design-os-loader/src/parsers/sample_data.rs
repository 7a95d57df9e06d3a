//! Sample data `_meta` validation
//!
//! A section's `data.json` carries arbitrary top-level data plus a `_meta`
//! block describing it:
//!
//! ```json
//! {
//!   "_meta": {
//!     "models": { "invoice": "A bill sent to a customer" },
//!     "relationships": ["Invoice belongs to Customer"]
//!   },
//!   "invoices": []
//! }
//! ```
//!
//! Every model name must correspond to a top-level data key. Matching is
//! tried in order: exact, case-insensitive, `name + "s"`, case-insensitive
//! `name + "s"`. Irregular plurals (`company`/`companies`) are not matched.

use super::design_system::json_kind;
use crate::error::{DesignOsError, ErrorCategory, LoadResult, RecoveryAction};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const META_KEY: &str = "_meta";
const COMPONENT: &str = "data.json";

/// Validated `_meta` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDataMeta {
    /// Model name to description, in document order
    pub models: IndexMap<String, String>,
    /// Relationship statements
    pub relationships: Vec<String>,
}

/// Find the data key a model name refers to
///
/// Returns the first key matched by the highest-priority rule.
#[must_use]
pub fn model_matches_key<'k, S: AsRef<str>>(model: &str, keys: &'k [S]) -> Option<&'k str> {
    let plural = format!("{model}s");
    let rules: [&dyn Fn(&str) -> bool; 4] = [
        &|key: &str| key == model,
        &|key: &str| key.eq_ignore_ascii_case(model),
        &|key: &str| key == plural,
        &|key: &str| key.eq_ignore_ascii_case(&plural),
    ];
    rules.iter().find_map(|rule| {
        keys.iter()
            .map(AsRef::as_ref)
            .find(|&key| rule(key))
    })
}

fn meta_recovery() -> RecoveryAction {
    RecoveryAction::new("Update the _meta structure.").with_command("/sample-data")
}

/// Validate a section's sample data
///
/// Errors: data not an object, `_meta` missing or not an object,
/// `_meta.models` missing or not an object. Warnings: orphaned model names,
/// non-string model descriptions, missing or malformed
/// `_meta.relationships` (defaulted to empty).
#[must_use]
pub fn validate_sample_data(data: &Value) -> LoadResult<SampleDataMeta> {
    let Value::Object(root) = data else {
        return LoadResult::failure(
            vec![DesignOsError::new(
                ErrorCategory::TypeMismatch,
                COMPONENT,
                format!("Sample data must be an object (got {})", json_kind(data)),
            )
            .with_recovery(meta_recovery())],
            Vec::new(),
        );
    };

    let meta = match root.get(META_KEY) {
        None => {
            return LoadResult::failure(
                vec![DesignOsError::meta_validation(
                    "Missing _meta",
                    Some("Add a _meta object with models and relationships".to_string()),
                )],
                Vec::new(),
            )
        }
        Some(Value::Object(meta)) => meta,
        Some(other) => {
            return LoadResult::failure(
                vec![DesignOsError::meta_validation(
                    format!("_meta must be an object (got {})", json_kind(other)),
                    None,
                )],
                Vec::new(),
            )
        }
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let models: Option<IndexMap<String, String>> = match meta.get("models") {
        None => {
            errors.push(DesignOsError::meta_validation(
                "Missing _meta.models",
                Some("Describe each top-level data key in _meta.models".to_string()),
            ));
            None
        }
        Some(Value::Object(models)) => Some(
            models
                .iter()
                .map(|(name, description)| {
                    let description = match description {
                        Value::String(text) => text.clone(),
                        other => {
                            warnings.push(
                                DesignOsError::warning(
                                    ErrorCategory::TypeMismatch,
                                    COMPONENT,
                                    format!(
                                        "_meta.models.{name} should be a string description (got {})",
                                        json_kind(other)
                                    ),
                                )
                                .with_recovery(meta_recovery()),
                            );
                            String::new()
                        }
                    };
                    (name.clone(), description)
                })
                .collect(),
        ),
        Some(other) => {
            errors.push(DesignOsError::meta_validation(
                format!("_meta.models must be an object (got {})", json_kind(other)),
                None,
            ));
            None
        }
    };

    if let Some(models) = &models {
        let data_keys: Vec<&str> = root
            .keys()
            .map(String::as_str)
            .filter(|key| *key != META_KEY)
            .collect();
        for name in models.keys() {
            if model_matches_key(name, &data_keys).is_none() {
                warnings.push(
                    DesignOsError::warning(
                        ErrorCategory::ValidationError,
                        COMPONENT,
                        format!("Model \"{name}\" in _meta.models has no matching data key"),
                    )
                    .with_details(format!("Data keys: {}", data_keys.join(", ")))
                    .with_recovery(meta_recovery()),
                );
            }
        }
    }

    let relationships = match meta.get("relationships") {
        None => {
            warnings.push(
                DesignOsError::warning(
                    ErrorCategory::StructureError,
                    COMPONENT,
                    "Missing _meta.relationships, defaulting to none",
                )
                .with_recovery(meta_recovery()),
            );
            Vec::new()
        }
        Some(Value::Array(items)) => {
            let strings: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect();
            if strings.len() != items.len() {
                warnings.push(
                    DesignOsError::warning(
                        ErrorCategory::TypeMismatch,
                        COMPONENT,
                        format!(
                            "_meta.relationships has {} non-string entries, ignoring them",
                            items.len() - strings.len()
                        ),
                    )
                    .with_recovery(meta_recovery()),
                );
            }
            strings
        }
        Some(other) => {
            warnings.push(
                DesignOsError::warning(
                    ErrorCategory::TypeMismatch,
                    COMPONENT,
                    format!(
                        "_meta.relationships must be an array (got {}), defaulting to none",
                        json_kind(other)
                    ),
                )
                .with_recovery(meta_recovery()),
            );
            Vec::new()
        }
    };

    let meta = models.map(|models| SampleDataMeta {
        models,
        relationships,
    });
    LoadResult::from_parts(meta, errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_priority() {
        let keys = ["Invoices", "invoice", "invoices"];
        assert_eq!(model_matches_key("invoice", &keys), Some("invoice"));
        assert_eq!(model_matches_key("INVOICE", &keys), Some("invoice"));
        assert_eq!(model_matches_key("Invoice", &["invoices", "Invoices"]), Some("Invoices"));
        assert_eq!(model_matches_key("invoice", &["Invoices", "invoices"]), Some("invoices"));
        assert_eq!(model_matches_key("INVOICE", &["invoices"]), Some("invoices"));
    }

    #[test]
    fn irregular_plurals_do_not_match() {
        assert_eq!(model_matches_key("company", &["companies"]), None);
    }

    #[test]
    fn pluralized_model_matches_without_warnings() {
        let result = validate_sample_data(&json!({
            "_meta": {"models": {"invoice": "desc"}, "relationships": []},
            "invoices": [{"id": 1}]
        }));
        assert!(!result.has_issues(), "{:?}", result.warnings());
        assert_eq!(result.data().unwrap().models["invoice"], "desc");
    }

    #[test]
    fn orphan_model_warns_once() {
        let result = validate_sample_data(&json!({
            "_meta": {"models": {"customer": "desc"}, "relationships": []},
            "invoices": []
        }));
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].message.contains("\"customer\""));
        assert!(result.data().is_some());
    }

    #[test]
    fn models_and_orphans_keep_document_order() {
        let data: Value = serde_json::from_str(
            r#"{"_meta": {"models": {"zeta": "z", "alpha": "a", "invoice": "i"}, "relationships": []}, "invoices": []}"#,
        )
        .unwrap();
        let result = validate_sample_data(&data);
        let names: Vec<&str> = result.data().unwrap().models.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha", "invoice"]);
        let messages: Vec<&str> = result.warnings().iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Model \"zeta\" in _meta.models has no matching data key",
                "Model \"alpha\" in _meta.models has no matching data key",
            ]
        );
    }

    #[test]
    fn meta_key_is_not_a_data_key() {
        let result = validate_sample_data(&json!({
            "_meta": {"models": {"_meta": "self"}, "relationships": []}
        }));
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn missing_meta_is_error() {
        let result = validate_sample_data(&json!({"invoices": []}));
        assert!(result.data().is_none());
        assert_eq!(result.errors()[0].category, ErrorCategory::StructureError);
        assert_eq!(result.errors()[0].message, "Missing _meta");
    }

    #[test]
    fn malformed_models_is_error() {
        let result = validate_sample_data(&json!({
            "_meta": {"models": ["invoice"], "relationships": []}
        }));
        assert!(result.data().is_none());
        assert!(result.errors()[0].message.contains("must be an object"));
    }

    #[test]
    fn missing_models_is_error() {
        let result = validate_sample_data(&json!({"_meta": {"relationships": []}}));
        assert_eq!(result.errors()[0].message, "Missing _meta.models");
    }

    #[test]
    fn relationships_default_with_warning() {
        let missing = validate_sample_data(&json!({"_meta": {"models": {}}}));
        assert_eq!(missing.warnings().len(), 1);
        assert!(missing.data().unwrap().relationships.is_empty());

        let malformed = validate_sample_data(&json!({"_meta": {"models": {}, "relationships": "x"}}));
        assert_eq!(malformed.warnings().len(), 1);
        assert!(malformed.data().unwrap().relationships.is_empty());

        let mixed = validate_sample_data(&json!({"_meta": {"models": {}, "relationships": ["a", 1]}}));
        assert_eq!(mixed.data().unwrap().relationships, vec!["a"]);
        assert_eq!(mixed.warnings().len(), 1);
    }

    #[test]
    fn data_must_be_object() {
        let result = validate_sample_data(&json!([1, 2]));
        assert_eq!(result.errors()[0].category, ErrorCategory::TypeMismatch);
    }

    #[test]
    fn non_string_model_description_warns() {
        let result = validate_sample_data(&json!({
            "_meta": {"models": {"invoice": 3}, "relationships": []},
            "invoice": {}
        }));
        assert_eq!(result.warnings().len(), 1);
        assert_eq!(result.data().unwrap().models["invoice"], "");
    }
}
