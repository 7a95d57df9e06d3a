//! Design token validation
//!
//! `colors.json` and `typography.json` are validated structurally before they
//! are trusted. Palette names outside [`PALETTE`] are accepted with a warning
//! under [`ColorPolicy::Lenient`] so custom theme tokens keep working; the
//! strict policy rejects them.

use crate::config::ColorPolicy;
use crate::error::{DesignOsError, ErrorCategory, LoadResult, RecoveryAction, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recognized palette names
pub const PALETTE: [&str; 22] = [
    "slate", "gray", "zinc", "neutral", "stone", "red", "orange", "amber", "yellow", "lime",
    "green", "emerald", "teal", "cyan", "sky", "blue", "indigo", "violet", "purple", "fuchsia",
    "pink", "rose",
];

const COLOR_FIELDS: [&str; 3] = ["primary", "secondary", "neutral"];

/// Color tokens from `colors.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTokens {
    /// Primary palette
    pub primary: String,
    /// Secondary palette
    pub secondary: String,
    /// Neutral palette
    pub neutral: String,
}

/// Typography tokens from `typography.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypographyTokens {
    /// Heading font
    pub heading: String,
    /// Body font
    pub body: String,
    /// Monospace font
    pub mono: String,
}

/// Combined design tokens; each half independently optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignSystem {
    /// Colors, if valid
    pub colors: Option<ColorTokens>,
    /// Typography, if valid
    pub typography: Option<TypographyTokens>,
}

impl DesignSystem {
    /// Combine halves; `None` when both are absent
    #[must_use]
    pub fn from_parts(
        colors: Option<ColorTokens>,
        typography: Option<TypographyTokens>,
    ) -> Option<Self> {
        if colors.is_none() && typography.is_none() {
            None
        } else {
            Some(Self { colors, typography })
        }
    }
}

/// Whether `name` is a palette color, ignoring case
#[must_use]
pub fn is_palette_color(name: &str) -> bool {
    PALETTE.iter().any(|color| color.eq_ignore_ascii_case(name))
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn tokens_recovery() -> RecoveryAction {
    RecoveryAction::new("Update the design tokens.").with_command("/design-tokens")
}

/// Validate the contents of `colors.json`
///
/// `component` labels the issues (usually the file name).
#[must_use]
pub fn validate_color_tokens(
    value: &Value,
    component: &str,
    policy: ColorPolicy,
) -> LoadResult<ColorTokens> {
    let Value::Object(map) = value else {
        return LoadResult::failure(
            vec![DesignOsError::new(
                ErrorCategory::TypeMismatch,
                component,
                format!("Colors must be an object (got {})", json_kind(value)),
            )
            .with_recovery(tokens_recovery())],
            Vec::new(),
        );
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut resolved: Vec<String> = Vec::with_capacity(COLOR_FIELDS.len());

    for field in COLOR_FIELDS {
        match map.get(field) {
            None | Some(Value::Null) => errors.push(
                DesignOsError::new(
                    ErrorCategory::ValidationError,
                    component,
                    format!("Missing required color \"{field}\" (primary, secondary, neutral)"),
                )
                .with_recovery(tokens_recovery()),
            ),
            Some(Value::String(name)) if name.trim().is_empty() => errors.push(
                DesignOsError::new(
                    ErrorCategory::ValidationError,
                    component,
                    format!("Color \"{field}\" is empty"),
                )
                .with_recovery(tokens_recovery()),
            ),
            Some(Value::String(raw)) => {
                let name = raw.trim();
                if is_palette_color(name) {
                    resolved.push(name.to_lowercase());
                } else {
                    let (severity, target) = match policy {
                        ColorPolicy::Lenient => (Severity::Warning, &mut warnings),
                        ColorPolicy::Strict => (Severity::Error, &mut errors),
                    };
                    target.push(
                        DesignOsError::with_severity(
                            severity,
                            ErrorCategory::ValidationError,
                            component,
                            format!("Color \"{field}: {name}\" is not a palette color"),
                        )
                        .with_details(format!("Valid colors: {}", PALETTE.join(", ")))
                        .with_recovery(tokens_recovery()),
                    );
                    resolved.push(name.to_string());
                }
            }
            Some(other) => errors.push(
                DesignOsError::new(
                    ErrorCategory::TypeMismatch,
                    component,
                    format!("Color \"{field}\" must be a string (got {})", json_kind(other)),
                )
                .with_recovery(tokens_recovery()),
            ),
        }
    }

    let tokens = match resolved.as_slice() {
        [primary, secondary, neutral] => Some(ColorTokens {
            primary: primary.clone(),
            secondary: secondary.clone(),
            neutral: neutral.clone(),
        }),
        _ => None,
    };
    LoadResult::from_parts(tokens, errors, warnings)
}

/// Validate the contents of `typography.json`
///
/// `mono` falls back to `mono_fallback` when absent or empty.
#[must_use]
pub fn validate_typography_tokens(
    value: &Value,
    component: &str,
    mono_fallback: &str,
) -> LoadResult<TypographyTokens> {
    let Value::Object(map) = value else {
        return LoadResult::failure(
            vec![DesignOsError::new(
                ErrorCategory::TypeMismatch,
                component,
                format!("Typography must be an object (got {})", json_kind(value)),
            )
            .with_recovery(tokens_recovery())],
            Vec::new(),
        );
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut required = |field: &str| -> Option<String> {
        match map.get(field) {
            Some(Value::String(font)) if !font.trim().is_empty() => Some(font.trim().to_string()),
            None | Some(Value::String(_) | Value::Null) => {
                errors.push(
                    DesignOsError::new(
                        ErrorCategory::ValidationError,
                        component,
                        format!("Missing required font \"{field}\" (heading, body)"),
                    )
                    .with_recovery(tokens_recovery()),
                );
                None
            }
            Some(other) => {
                errors.push(
                    DesignOsError::new(
                        ErrorCategory::TypeMismatch,
                        component,
                        format!("Font \"{field}\" must be a string (got {})", json_kind(other)),
                    )
                    .with_recovery(tokens_recovery()),
                );
                None
            }
        }
    };
    let heading = required("heading");
    let body = required("body");

    let mono = match map.get("mono") {
        Some(Value::String(font)) if !font.trim().is_empty() => font.trim().to_string(),
        None | Some(Value::Null | Value::String(_)) => mono_fallback.to_string(),
        Some(other) => {
            warnings.push(DesignOsError::warning(
                ErrorCategory::TypeMismatch,
                component,
                format!(
                    "Font \"mono\" must be a string (got {}), using {mono_fallback}",
                    json_kind(other)
                ),
            ));
            mono_fallback.to_string()
        }
    };

    let tokens = match (heading, body) {
        (Some(heading), Some(body)) => Some(TypographyTokens { heading, body, mono }),
        _ => None,
    };
    LoadResult::from_parts(tokens, errors, warnings)
}
