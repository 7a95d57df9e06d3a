//! Section spec parser
//!
//! Expected format:
//!
//! ```text
//! # Invoices
//!
//! ## Overview
//! Create and track invoices.
//!
//! ## User Flows
//! - Create an invoice
//!
//! ## UI Requirements
//! - Status badge per invoice
//!
//! ## Configuration
//! - shell: false
//! ```
//!
//! `## Configuration` is optional. Missing or empty expected sections are
//! collected as diagnostic warnings and never block the parse.

use super::{guarded, is_blank, ArtifactParser};
use crate::markdown::{bullet_items, document_title, extract_section, SectionPresence};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Title used when the spec has no `#` heading
pub const DEFAULT_SPEC_TITLE: &str = "Section Specification";

static CONFIG_SHELL_OFF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*-?\s*shell\s*:\s*false").expect("configuration shell pattern is valid")
});

static DOCUMENT_SHELL_OFF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^-?\s*shell\s*:\s*false").expect("document shell pattern is valid")
});

/// Parsed section `spec.md`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSpec {
    /// Title from the `#` heading
    pub title: String,
    /// Overview paragraph, may be empty
    pub overview: String,
    /// User flow bullets
    pub user_flows: Vec<String>,
    /// UI requirement bullets
    pub ui_requirements: Vec<String>,
    /// Whether screen designs render inside the app shell
    pub use_shell: bool,
}

/// Parse result together with the diagnostics collected on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAnalysis {
    /// The parsed spec
    pub spec: ParsedSpec,
    /// Missing or empty expected sections, one message each
    pub warnings: Vec<String>,
}

/// Screen design component discovered for a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDesignInfo {
    /// File stem, e.g. `InvoiceList`
    pub name: String,
    /// Registry key
    pub path: String,
    /// Component name, same as `name`
    pub component_name: String,
}

/// Screenshot image stored beside a section's spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotInfo {
    /// File stem, e.g. `invoice-list`
    pub name: String,
    /// Corpus path
    pub path: String,
    /// URL the image is served under
    pub url: String,
}

/// Everything known about one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    /// Section id (directory name)
    pub section_id: String,
    /// Whether any artifact exists for the section
    pub exists: bool,
    /// Raw `spec.md`
    pub spec: Option<String>,
    /// Parsed `spec.md`
    pub spec_parsed: Option<ParsedSpec>,
    /// `data.json`, when it is a JSON object
    pub data: Option<Map<String, Value>>,
    /// Screen design components
    pub screen_designs: Vec<ScreenDesignInfo>,
    /// Screenshot images
    pub screenshots: Vec<ScreenshotInfo>,
}

impl SectionData {
    /// Assemble section data, deriving `exists` from the artifacts
    ///
    /// A blank spec counts as absent.
    #[must_use]
    pub fn new(
        section_id: impl Into<String>,
        spec: Option<String>,
        data: Option<Map<String, Value>>,
        screen_designs: Vec<ScreenDesignInfo>,
        screenshots: Vec<ScreenshotInfo>,
    ) -> Self {
        let spec = spec.filter(|text| !text.trim().is_empty());
        let exists = spec.is_some()
            || data.is_some()
            || !screen_designs.is_empty()
            || !screenshots.is_empty();
        let spec_parsed = spec.as_deref().and_then(parse_spec);
        Self {
            section_id: section_id.into(),
            exists,
            spec,
            spec_parsed,
            data,
            screen_designs,
            screenshots,
        }
    }
}

/// Parse a section spec, dropping diagnostics
#[must_use]
pub fn parse_spec(md: &str) -> Option<ParsedSpec> {
    analyze_spec(md).map(|analysis| analysis.spec)
}

/// Parse a section spec and collect diagnostics
///
/// Returns `None` only for blank input.
#[must_use]
pub fn analyze_spec(md: &str) -> Option<SpecAnalysis> {
    if is_blank(md) {
        return None;
    }
    guarded(SpecParser::ARTIFACT, || Some(analyze(md)))
}

fn analyze(md: &str) -> SpecAnalysis {
    let mut warnings = Vec::new();

    let title = match document_title(md) {
        Some(title) => title.to_string(),
        None => {
            warnings.push("Missing top-level # heading (using default title)".to_string());
            DEFAULT_SPEC_TITLE.to_string()
        }
    };

    let overview_block = extract_section(md, "Overview");
    match SectionPresence::of(overview_block, |block| !block.is_empty()) {
        SectionPresence::Missing => warnings.push("Missing \"## Overview\" section".to_string()),
        SectionPresence::Empty => warnings.push("\"## Overview\" section is empty".to_string()),
        SectionPresence::Present => {}
    }
    let overview = overview_block.unwrap_or_default().to_string();

    let user_flows = bullet_section(md, "User Flows", "- Flow name", &mut warnings);
    let ui_requirements = bullet_section(md, "UI Requirements", "- Requirement", &mut warnings);

    SpecAnalysis {
        spec: ParsedSpec {
            title,
            overview,
            user_flows,
            ui_requirements,
            use_shell: !shell_disabled(md),
        },
        warnings,
    }
}

fn bullet_section(md: &str, heading: &str, example: &str, warnings: &mut Vec<String>) -> Vec<String> {
    let items = extract_section(md, heading).map(bullet_items);
    match SectionPresence::of(items.as_ref(), |items| !items.is_empty()) {
        SectionPresence::Missing => warnings.push(format!("Missing \"## {heading}\" section")),
        SectionPresence::Empty => warnings.push(format!(
            "\"## {heading}\" section has no bullet items (expected \"{example}\")"
        )),
        SectionPresence::Present => {}
    }
    items.unwrap_or_default()
}

/// Whether a `shell: false` marker is present
///
/// A non-empty `## Configuration` block is authoritative. Without one the
/// marker must start a line anywhere in the document.
fn shell_disabled(md: &str) -> bool {
    match extract_section(md, "Configuration").filter(|block| !block.is_empty()) {
        Some(block) => CONFIG_SHELL_OFF_RE.is_match(block),
        None => DOCUMENT_SHELL_OFF_RE.is_match(md),
    }
}

/// [`ArtifactParser`] for section `spec.md`
///
/// With `diagnostics` enabled every collected warning is logged at debug
/// level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecParser {
    /// Log validation diagnostics
    pub diagnostics: bool,
}

impl SpecParser {
    /// Parser with diagnostics switched on or off
    #[must_use]
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }
}

impl ArtifactParser for SpecParser {
    type Output = ParsedSpec;

    const ARTIFACT: &'static str = "spec.md";

    fn parse(&self, source: &str) -> Option<Self::Output> {
        let analysis = analyze_spec(source)?;
        if self.diagnostics && !analysis.warnings.is_empty() {
            tracing::debug!(
                title = %analysis.spec.title,
                warnings = ?analysis.warnings,
                "spec.md validation"
            );
        }
        Some(analysis.spec)
    }

    fn recovery_command(&self) -> Option<&'static str> {
        Some("/shape-section")
    }
}
