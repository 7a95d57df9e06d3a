//! Export readiness validation
//!
//! Pure aggregation over already-loaded data. No artifact is re-read here.

use crate::error::Severity;
use crate::loader::ProductData;
use crate::parsers::SectionData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Area an issue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Product overview or roadmap
    Product,
    /// The set of sections
    Sections,
    /// Design tokens
    Design,
    /// Application shell
    Shell,
    /// Data model
    Data,
    /// A single section
    Section,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Product => "Product",
            Self::Sections => "Sections",
            Self::Design => "Design",
            Self::Shell => "Shell",
            Self::Data => "Data",
            Self::Section => "Section",
        };
        f.write_str(name)
    }
}

/// One readiness finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// How serious it is
    pub severity: Severity,
    /// Area
    pub category: IssueCategory,
    /// What is wrong
    pub message: String,
    /// Command that fixes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    fn new(severity: Severity, category: IssueCategory, message: impl Into<String>, suggestion: &str) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Issue counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Blocking issues
    pub errors: usize,
    /// Recommended fixes
    pub warnings: usize,
    /// Suggestions
    pub info: usize,
}

/// Outcome of [`validate_for_export`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// No error-severity issue
    pub is_valid: bool,
    /// Issues in rule order
    pub issues: Vec<ValidationIssue>,
    /// Counts
    pub summary: ValidationSummary,
}

/// Check whether the product is ready for export
///
/// Only sections with `exists == true` are considered.
#[must_use]
pub fn validate_for_export(product: &ProductData, sections: &[SectionData]) -> ValidationResult {
    use IssueCategory as C;
    use Severity::{Error, Info, Warning};

    let mut issues = Vec::new();
    let existing: Vec<&SectionData> = sections.iter().filter(|s| s.exists).collect();

    if product.overview.is_none() {
        issues.push(ValidationIssue::new(
            Error,
            C::Product,
            "Product overview is missing",
            "Run /product-vision to create the product overview",
        ));
    }
    if existing.is_empty() {
        issues.push(ValidationIssue::new(
            Error,
            C::Sections,
            "No sections have been defined",
            "Run /shape-section to create at least one section",
        ));
    }

    let design = product.design_system.as_ref();
    if design.and_then(|d| d.colors.as_ref()).is_none() {
        issues.push(ValidationIssue::new(
            Warning,
            C::Design,
            "Color tokens not defined",
            "Run /design-tokens to define your color palette",
        ));
    }
    if design.and_then(|d| d.typography.as_ref()).is_none() {
        issues.push(ValidationIssue::new(
            Warning,
            C::Design,
            "Typography tokens not defined",
            "Run /design-tokens to define your fonts",
        ));
    }
    if !product.shell.as_ref().is_some_and(|shell| shell.has_components) {
        issues.push(ValidationIssue::new(
            Warning,
            C::Shell,
            "Shell components not created",
            "Run /design-shell to create the application shell",
        ));
    }
    if product.data_model.is_none() {
        issues.push(ValidationIssue::new(
            Warning,
            C::Data,
            "Data model not defined",
            "Run /data-model to define your entities",
        ));
    }

    for section in &existing {
        let id = &section.section_id;
        if section.spec.is_none() {
            issues.push(ValidationIssue::new(
                Warning,
                C::Section,
                format!("Section \"{id}\" has no specification"),
                "Run /shape-section to define the spec",
            ));
        }
        if section.data.is_none() {
            issues.push(ValidationIssue::new(
                Warning,
                C::Section,
                format!("Section \"{id}\" has no sample data"),
                "Run /sample-data to create sample data",
            ));
        }
        if section.screen_designs.is_empty() {
            issues.push(ValidationIssue::new(
                Warning,
                C::Section,
                format!("Section \"{id}\" has no screen designs"),
                "Run /design-screen to create screen designs",
            ));
        }
    }

    for section in &existing {
        if !section.screen_designs.is_empty() && section.screenshots.is_empty() {
            issues.push(ValidationIssue::new(
                Info,
                C::Section,
                format!("Section \"{}\" has screen designs but no screenshots", section.section_id),
                "Run /screenshot-design to capture screenshots",
            ));
        }
    }

    if product.roadmap.is_none() {
        issues.push(ValidationIssue::new(
            Info,
            C::Product,
            "Product roadmap not defined",
            "Run /product-roadmap to plan your sections",
        ));
    }

    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    let summary = ValidationSummary {
        errors: count(Error),
        warnings: count(Warning),
        info: count(Info),
    };

    ValidationResult {
        is_valid: summary.errors == 0,
        issues,
        summary,
    }
}

/// One-line summary of a validation result
#[must_use]
pub fn format_validation_result(result: &ValidationResult) -> String {
    if result.issues.is_empty() {
        return "All checks passed. Ready for export.".to_string();
    }

    let ValidationSummary {
        errors,
        warnings,
        info,
    } = result.summary;
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} error(s) - must fix before export"));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} warning(s) - recommended to fix"));
    }
    if info > 0 {
        parts.push(format!("{info} suggestion(s)"));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{
        ColorTokens, DataModel, DesignSystem, ProductOverview, ProductRoadmap, ScreenDesignInfo,
        ShellInfo, TypographyTokens,
    };
    use serde_json::Map;

    fn complete_product() -> ProductData {
        ProductData {
            overview: Some(ProductOverview {
                name: "P".into(),
                description: "D".into(),
                problems: vec![],
                features: vec![],
            }),
            roadmap: Some(ProductRoadmap { sections: vec![] }),
            data_model: Some(DataModel {
                entities: vec![],
                relationships: vec!["A has B".into()],
            }),
            design_system: DesignSystem::from_parts(
                Some(ColorTokens {
                    primary: "blue".into(),
                    secondary: "lime".into(),
                    neutral: "stone".into(),
                }),
                Some(TypographyTokens {
                    heading: "A".into(),
                    body: "B".into(),
                    mono: "C".into(),
                }),
            ),
            shell: ShellInfo::from_parts(None, true),
        }
    }

    fn design(name: &str) -> ScreenDesignInfo {
        ScreenDesignInfo {
            name: name.into(),
            path: format!("src/sections/x/{name}.tsx"),
            component_name: name.into(),
        }
    }

    #[test]
    fn empty_product_is_not_valid() {
        let result = validate_for_export(&ProductData::default(), &[]);
        assert!(!result.is_valid);
        assert!(result.summary.errors >= 2);
        assert_eq!(result.summary.warnings, 4);
        assert_eq!(result.summary.info, 1);
    }

    #[test]
    fn non_existing_sections_do_not_count() {
        let ghost = SectionData::new("ghost", None, None, vec![], vec![]);
        let result = validate_for_export(&complete_product(), &[ghost]);
        assert!(!result.is_valid);
        assert_eq!(result.issues[0].category, IssueCategory::Sections);
    }

    #[test]
    fn complete_product_passes() {
        let mut data = Map::new();
        data.insert("x".into(), serde_json::Value::Null);
        let mut section = SectionData::new("x", Some("# X\n".into()), Some(data), vec![design("List")], vec![]);
        section.screenshots.push(crate::parsers::ScreenshotInfo {
            name: "list".into(),
            path: "product/sections/x/list.png".into(),
            url: "/product/sections/x/list.png".into(),
        });
        let result = validate_for_export(&complete_product(), &[section]);
        assert!(result.issues.is_empty(), "{:?}", result.issues);
        assert_eq!(format_validation_result(&result), "All checks passed. Ready for export.");
    }

    #[test]
    fn incomplete_section_warnings_and_screenshot_info() {
        let section = SectionData::new("x", None, None, vec![design("List")], vec![]);
        let result = validate_for_export(&complete_product(), &[section]);
        assert!(result.is_valid);
        let messages: Vec<&str> = result.issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Section \"x\" has no specification",
                "Section \"x\" has no sample data",
                "Section \"x\" has screen designs but no screenshots",
            ]
        );
        assert_eq!(
            format_validation_result(&result),
            "2 warning(s) - recommended to fix, 1 suggestion(s)"
        );
    }

    #[test]
    fn format_lists_errors_first() {
        let result = validate_for_export(&ProductData::default(), &[]);
        assert!(format_validation_result(&result).starts_with("2 error(s) - must fix before export, "));
    }
}
