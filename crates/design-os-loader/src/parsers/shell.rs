//! Shell spec parser
//!
//! Expected format:
//!
//! ```text
//! # Application Shell
//!
//! ## Overview
//! Sidebar navigation with a user menu.
//!
//! ## Navigation Structure
//! - Dashboard → dashboard
//! - Invoices → invoices
//!
//! ## Layout Pattern
//! Fixed sidebar on the left, content on the right.
//! ```
//!
//! The structured shell-props sections (`## Context Selector`,
//! `## Breadcrumbs`, `## Header Actions`) live in the same document and are
//! handled by [`crate::shell_props`].

use super::{guarded, is_blank, ArtifactParser};
use crate::markdown::{bullet_items, extract_section, SectionPresence};
use serde::{Deserialize, Serialize};

/// Parsed `product/shell/spec.md`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSpec {
    /// The full document
    pub raw: String,
    /// Overview paragraph, may be empty
    pub overview: String,
    /// Navigation bullets, kept verbatim
    pub navigation_items: Vec<String>,
    /// Layout description, may be empty
    pub layout_pattern: String,
}

/// Shell parse result with collected diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpecAnalysis {
    /// Parsed spec; `None` when no expected section had content
    pub spec: Option<ShellSpec>,
    /// Missing or empty expected sections
    pub warnings: Vec<String>,
}

/// What exists of the application shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellInfo {
    /// Parsed spec, if authored
    pub spec: Option<ShellSpec>,
    /// Whether `AppShell.tsx` exists
    pub has_components: bool,
}

impl ShellInfo {
    /// `None` when there is neither a spec nor components
    #[must_use]
    pub fn from_parts(spec: Option<ShellSpec>, has_components: bool) -> Option<Self> {
        if spec.is_none() && !has_components {
            return None;
        }
        Some(Self {
            spec,
            has_components,
        })
    }
}

/// Parse the shell spec, dropping diagnostics
#[must_use]
pub fn parse_shell_spec(md: &str) -> Option<ShellSpec> {
    analyze_shell_spec(md).and_then(|analysis| analysis.spec)
}

/// Parse the shell spec and collect diagnostics; `None` for blank input
#[must_use]
pub fn analyze_shell_spec(md: &str) -> Option<ShellSpecAnalysis> {
    if is_blank(md) {
        return None;
    }
    guarded(ShellSpecParser::ARTIFACT, || Some(analyze(md)))
}

fn analyze(md: &str) -> ShellSpecAnalysis {
    let mut warnings = Vec::new();

    let overview = text_section(md, "Overview", &mut warnings);

    let navigation = extract_section(md, "Navigation Structure").map(bullet_items);
    match SectionPresence::of(navigation.as_ref(), |items| !items.is_empty()) {
        SectionPresence::Missing => {
            warnings.push("Missing \"## Navigation Structure\" section".to_string());
        }
        SectionPresence::Empty => warnings.push(
            "\"## Navigation Structure\" section has no bullet items (expected \"- Nav Item → Section\")"
                .to_string(),
        ),
        SectionPresence::Present => {}
    }
    let navigation_items = navigation.unwrap_or_default();

    let layout_pattern = text_section(md, "Layout Pattern", &mut warnings);

    let spec = if overview.is_empty() && navigation_items.is_empty() && layout_pattern.is_empty() {
        None
    } else {
        Some(ShellSpec {
            raw: md.to_string(),
            overview,
            navigation_items,
            layout_pattern,
        })
    };
    ShellSpecAnalysis { spec, warnings }
}

fn text_section(md: &str, heading: &str, warnings: &mut Vec<String>) -> String {
    let block = extract_section(md, heading);
    match SectionPresence::of(block, |block| !block.is_empty()) {
        SectionPresence::Missing => warnings.push(format!("Missing \"## {heading}\" section")),
        SectionPresence::Empty => warnings.push(format!("\"## {heading}\" section is empty")),
        SectionPresence::Present => {}
    }
    block.unwrap_or_default().to_string()
}

/// [`ArtifactParser`] for the shell `spec.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellSpecParser {
    /// Log validation diagnostics
    pub diagnostics: bool,
}

impl ShellSpecParser {
    /// Parser with diagnostics switched on or off
    #[must_use]
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }
}

impl ArtifactParser for ShellSpecParser {
    type Output = ShellSpec;

    const ARTIFACT: &'static str = "spec.md";

    fn parse(&self, source: &str) -> Option<Self::Output> {
        let analysis = analyze_shell_spec(source)?;
        if self.diagnostics && !analysis.warnings.is_empty() {
            tracing::debug!(warnings = ?analysis.warnings, "shell spec.md validation");
        }
        analysis.spec
    }

    fn recovery_command(&self) -> Option<&'static str> {
        Some("/design-shell")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SHELL: &str = "# Application Shell\n\n## Overview\nSidebar navigation.\n\n## Navigation Structure\n- Dashboard → dashboard\n- Invoices → invoices\n\n## Layout Pattern\nFixed sidebar on the left.\n";

    #[test]
    fn parses_shell_spec() {
        let spec = parse_shell_spec(SHELL).unwrap();
        assert_eq!(spec.overview, "Sidebar navigation.");
        assert_eq!(
            spec.navigation_items,
            vec!["Dashboard → dashboard", "Invoices → invoices"]
        );
        assert_eq!(spec.layout_pattern, "Fixed sidebar on the left.");
        assert_eq!(spec.raw, SHELL);
    }

    #[test]
    fn heading_only_is_absent_with_warnings() {
        let analysis = analyze_shell_spec("# Shell\n## Overview\n").unwrap();
        assert!(analysis.spec.is_none());
        assert_eq!(
            analysis.warnings,
            vec![
                "\"## Overview\" section is empty",
                "Missing \"## Navigation Structure\" section",
                "Missing \"## Layout Pattern\" section",
            ]
        );
    }

    #[test]
    fn navigation_without_bullets_warns() {
        let analysis = analyze_shell_spec("## Overview\nO\n## Navigation Structure\nprose\n").unwrap();
        assert!(analysis.warnings.iter().any(|w| w.contains("no bullet items")));
        assert!(analysis.spec.unwrap().navigation_items.is_empty());
    }

    #[test]
    fn layout_only_is_present() {
        let spec = parse_shell_spec("## Layout Pattern\nTop nav.\n").unwrap();
        assert_eq!(spec.layout_pattern, "Top nav.");
        assert!(spec.overview.is_empty());
    }

    #[test]
    fn shell_info_requires_spec_or_components() {
        assert!(ShellInfo::from_parts(None, false).is_none());
        let info = ShellInfo::from_parts(None, true).unwrap();
        assert!(info.has_components);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(parse_shell_spec(SHELL).unwrap()).unwrap();
        assert!(json.get("navigationItems").is_some());
        assert!(json.get("layoutPattern").is_some());
    }
}
