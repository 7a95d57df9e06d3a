//! Artifact parsers for product-definition files
//!
//! Provides parsing from raw artifact text into typed structures:
//! - Product overview and roadmap (markdown)
//! - Data model (markdown)
//! - Design tokens (JSON) with palette validation
//! - Section specs (markdown) and sample data `_meta` validation (JSON)
//! - Shell spec (markdown)
//!
//! Every parser is a pure function of its input. Empty or non-conforming
//! input yields `None` rather than an empty structure.

use std::panic::{self, AssertUnwindSafe};

mod data_model;
mod design_system;
mod product;
mod sample_data;
mod section;
mod shell;

pub use data_model::{parse_data_model, DataModel, DataModelParser, Entity};
pub(crate) use design_system::json_kind;
pub use design_system::{
    is_palette_color, validate_color_tokens, validate_typography_tokens, ColorTokens,
    DesignSystem, TypographyTokens, PALETTE,
};
pub use product::{
    parse_product_overview, parse_product_roadmap, slugify, OverviewParser, Problem,
    ProductOverview, ProductRoadmap, RoadmapParser, Section,
};
pub use sample_data::{model_matches_key, validate_sample_data, SampleDataMeta};
pub use section::{
    analyze_spec, parse_spec, ParsedSpec, ScreenDesignInfo, ScreenshotInfo, SectionData,
    SpecAnalysis, SpecParser, DEFAULT_SPEC_TITLE,
};
pub use shell::{
    analyze_shell_spec, parse_shell_spec, ShellInfo, ShellSpec, ShellSpecAnalysis, ShellSpecParser,
};

/// Parser trait for converting markdown artifacts into typed structures
///
/// Implement this trait to let [`crate::ProductLoader`] load a new markdown
/// artifact with the standard file-not-found and empty-file reporting.
pub trait ArtifactParser {
    /// The structure this parser produces
    type Output;

    /// File name used as the component label in diagnostics
    const ARTIFACT: &'static str;

    /// Parse content; `None` when nothing meaningful was found
    fn parse(&self, source: &str) -> Option<Self::Output>;

    /// Authoring command that creates this artifact
    fn recovery_command(&self) -> Option<&'static str> {
        None
    }
}

/// Run a parser body, converting a panic into an absent result
///
/// Parsers never propagate faults to callers; anything unexpected is logged
/// and treated as "nothing parsed".
pub(crate) fn guarded<T>(artifact: &'static str, parse: impl FnOnce() -> Option<T>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(artifact, %reason, "parser fault, treating artifact as absent");
            None
        }
    }
}

/// Whether input is empty or whitespace only
#[inline]
pub(crate) fn is_blank(source: &str) -> bool {
    source.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_passes_through() {
        assert_eq!(guarded("x.md", || Some(3)), Some(3));
        assert_eq!(guarded::<u8>("x.md", || None), None);
    }

    #[test]
    fn guarded_converts_panic_to_none() {
        let result: Option<u8> = guarded("x.md", || panic!("boom"));
        assert!(result.is_none());
    }

    #[test]
    fn every_parser_rejects_blank_input() {
        for input in ["", "   ", "\n\t\n"] {
            assert!(parse_product_overview(input).is_none());
            assert!(parse_product_roadmap(input).is_none());
            assert!(parse_data_model(input).is_none());
            assert!(parse_spec(input).is_none());
            assert!(parse_shell_spec(input).is_none());
        }
    }

    #[test]
    fn trait_parsers_report_artifact_names() {
        assert_eq!(OverviewParser::ARTIFACT, "product-overview.md");
        assert_eq!(RoadmapParser::ARTIFACT, "product-roadmap.md");
        assert_eq!(DataModelParser::ARTIFACT, "data-model.md");
        assert_eq!(SpecParser::ARTIFACT, "spec.md");
        assert_eq!(ShellSpecParser::ARTIFACT, "spec.md");
        assert_eq!(OverviewParser.recovery_command(), Some("/product-vision"));
    }
}
