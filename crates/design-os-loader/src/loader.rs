//! Product loader - main entry point
//!
//! Ties the corpus, the component registry and the parsers together.
//! Conventional layout, relative to the project root:
//!
//! ```text
//! product/product-overview.md
//! product/product-roadmap.md
//! product/data-model/data-model.md
//! product/design-system/colors.json
//! product/design-system/typography.json
//! product/shell/spec.md
//! product/sections/<id>/spec.md
//! product/sections/<id>/data.json
//! product/sections/<id>/<screenshot>.png
//! src/sections/<id>/<Component>.tsx
//! src/shell/components/<Component>.tsx
//! ```

use crate::config::LoaderConfig;
use crate::corpus::{component_name, ComponentHandle, ComponentRegistry, FileCorpus};
use crate::error::{DesignOsError, ErrorCategory, LoadResult, RecoveryAction};
use crate::parsers::{
    json_kind, validate_color_tokens, validate_sample_data, validate_typography_tokens, ArtifactParser,
    ColorTokens, DataModel, DataModelParser, DesignSystem, OverviewParser, ProductOverview,
    ProductRoadmap, RoadmapParser, SampleDataMeta, ScreenDesignInfo, ScreenshotInfo, SectionData,
    ShellInfo, ShellSpec, ShellSpecParser, SpecParser, TypographyTokens,
};
use crate::shell_props::{shell_props, ShellProps};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const OVERVIEW_PATH: &str = "product-overview.md";
const ROADMAP_PATH: &str = "product-roadmap.md";
const DATA_MODEL_PATH: &str = "data-model/data-model.md";
const COLORS_PATH: &str = "design-system/colors.json";
const TYPOGRAPHY_PATH: &str = "design-system/typography.json";
const SHELL_SPEC_PATH: &str = "shell/spec.md";
const APP_SHELL: &str = "AppShell";
const SHELL_PREVIEW: &str = "ShellPreview";
const MAX_PATHS_SHOWN: usize = 10;

/// Everything loaded for the product as a whole
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// Product overview
    pub overview: Option<ProductOverview>,
    /// Roadmap
    pub roadmap: Option<ProductRoadmap>,
    /// Data model
    pub data_model: Option<DataModel>,
    /// Design tokens
    pub design_system: Option<DesignSystem>,
    /// Application shell
    pub shell: Option<ShellInfo>,
}

/// Loads product artifacts from a corpus
///
/// The loader holds no caches; every call re-reads the corpus, so results
/// always reflect its current contents.
#[derive(Debug, Clone)]
pub struct ProductLoader<C, R> {
    config: LoaderConfig,
    corpus: C,
    registry: R,
}

impl<C: FileCorpus, R: ComponentRegistry> ProductLoader<C, R> {
    /// Create loader with default configuration
    #[inline]
    #[must_use]
    pub fn new(corpus: C, registry: R) -> Self {
        Self::with_config(LoaderConfig::default(), corpus, registry)
    }

    /// Create loader with explicit configuration
    #[must_use]
    pub fn with_config(config: LoaderConfig, corpus: C, registry: R) -> Self {
        Self {
            config,
            corpus,
            registry,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Underlying corpus
    #[inline]
    #[must_use]
    pub fn corpus(&self) -> &C {
        &self.corpus
    }

    /// Underlying component registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Markdown artifacts
    // ------------------------------------------------------------------

    /// Read and parse a markdown artifact
    ///
    /// # Arguments
    /// * `path` - Corpus path of the artifact
    /// * `parser` - Parser for its contents
    ///
    /// # Returns
    /// Parsed value, or a file-not-found error, or a warning when the file is
    /// empty or yields nothing recognizable
    pub fn load_markdown<P: ArtifactParser>(&self, path: &str, parser: &P) -> LoadResult<P::Output> {
        let content = match self.corpus.read_text(path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                return LoadResult::failure(
                    vec![DesignOsError::file_not_found(path, parser.recovery_command())],
                    Vec::new(),
                )
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "failed to read artifact");
                return LoadResult::failure(
                    vec![DesignOsError::parse(P::ARTIFACT, "Could not read file", Some(err.to_string()))],
                    Vec::new(),
                );
            }
        };

        if content.trim().is_empty() {
            return LoadResult::failure(
                Vec::new(),
                vec![artifact_warning::<P>(
                    parser,
                    ErrorCategory::StructureError,
                    format!("File at {path} is empty"),
                )],
            );
        }

        match parser.parse(&content) {
            Some(parsed) => LoadResult::success(parsed, Vec::new()),
            None => LoadResult::failure(
                Vec::new(),
                vec![artifact_warning::<P>(
                    parser,
                    ErrorCategory::ParseError,
                    format!("No recognizable sections found in {path}"),
                )],
            ),
        }
    }

    /// Load `product-overview.md`
    pub fn load_product_overview(&self) -> LoadResult<ProductOverview> {
        self.load_markdown(&self.config.product_path(OVERVIEW_PATH), &OverviewParser)
    }

    /// Load `product-roadmap.md`
    pub fn load_product_roadmap(&self) -> LoadResult<ProductRoadmap> {
        self.load_markdown(&self.config.product_path(ROADMAP_PATH), &RoadmapParser)
    }

    /// Load `data-model/data-model.md`
    pub fn load_data_model(&self) -> LoadResult<DataModel> {
        self.load_markdown(&self.config.product_path(DATA_MODEL_PATH), &DataModelParser)
    }

    /// Whether `data-model.md` exists
    #[must_use]
    pub fn has_data_model(&self) -> bool {
        self.corpus.contains(&self.config.product_path(DATA_MODEL_PATH))
    }

    // ------------------------------------------------------------------
    // Design system
    // ------------------------------------------------------------------

    fn load_json(&self, path: &str, recovery_command: &str) -> LoadResult<Value> {
        match self.corpus.read_json(path) {
            Ok(Some(value)) => LoadResult::success(value, Vec::new()),
            Ok(None) => LoadResult::failure(
                vec![DesignOsError::file_not_found(path, Some(recovery_command))],
                Vec::new(),
            ),
            Err(err) => {
                let file = path.rsplit('/').next().unwrap_or(path);
                LoadResult::failure(
                    vec![DesignOsError::parse(file, "Invalid JSON", Some(err.to_string()))],
                    Vec::new(),
                )
            }
        }
    }

    /// Load and validate `colors.json`
    pub fn load_color_tokens(&self) -> LoadResult<ColorTokens> {
        let (value, errors, warnings) =
            self.load_json(&self.config.product_path(COLORS_PATH), "/design-tokens").into_parts();
        let Some(value) = value else {
            return LoadResult::failure(errors, warnings);
        };
        validate_color_tokens(&value, "colors.json", self.config.color_policy)
    }

    /// Load and validate `typography.json`
    pub fn load_typography_tokens(&self) -> LoadResult<TypographyTokens> {
        let (value, errors, warnings) = self
            .load_json(&self.config.product_path(TYPOGRAPHY_PATH), "/design-tokens")
            .into_parts();
        let Some(value) = value else {
            return LoadResult::failure(errors, warnings);
        };
        validate_typography_tokens(&value, "typography.json", &self.config.mono_fallback)
    }

    /// Load both token files
    ///
    /// Each half is independent: an invalid `colors.json` still yields a
    /// design system with typography. Issues from both halves are kept as
    /// warnings; the result is absent only when neither half validated.
    pub fn load_design_system(&self) -> LoadResult<DesignSystem> {
        let (colors, color_errors, color_warnings) = self.load_color_tokens().into_parts();
        let (typography, type_errors, type_warnings) = self.load_typography_tokens().into_parts();

        let warnings: Vec<DesignOsError> = color_errors
            .into_iter()
            .chain(type_errors)
            .map(|issue| issue.into_warning())
            .chain(color_warnings)
            .chain(type_warnings)
            .collect();

        match DesignSystem::from_parts(colors, typography) {
            Some(system) => LoadResult::success(system, warnings),
            None => LoadResult::failure(Vec::new(), warnings),
        }
    }

    /// Whether either token file exists
    #[must_use]
    pub fn has_design_system(&self) -> bool {
        self.has_colors() || self.has_typography()
    }

    /// Whether `colors.json` exists
    #[must_use]
    pub fn has_colors(&self) -> bool {
        self.corpus.contains(&self.config.product_path(COLORS_PATH))
    }

    /// Whether `typography.json` exists
    #[must_use]
    pub fn has_typography(&self) -> bool {
        self.corpus.contains(&self.config.product_path(TYPOGRAPHY_PATH))
    }

    // ------------------------------------------------------------------
    // Shell
    // ------------------------------------------------------------------

    fn shell_spec_text(&self) -> Option<String> {
        let path = self.config.product_path(SHELL_SPEC_PATH);
        match self.corpus.read_text(&path) {
            Ok(Some(text)) if !text.trim().is_empty() => Some(text),
            Ok(Some(_)) => {
                tracing::debug!(path = %path, "shell spec is empty");
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "failed to read shell spec");
                None
            }
        }
    }

    /// Load and parse the shell spec
    pub fn load_shell_spec(&self) -> LoadResult<ShellSpec> {
        self.load_markdown(
            &self.config.product_path(SHELL_SPEC_PATH),
            &ShellSpecParser::new(self.config.diagnostics),
        )
    }

    /// Shell spec and component presence; absent when neither exists
    #[must_use]
    pub fn load_shell_info(&self) -> Option<ShellInfo> {
        let spec = self.load_shell_spec().into_option();
        ShellInfo::from_parts(spec, self.has_shell_components())
    }

    /// Whether a shell spec or shell components exist
    #[must_use]
    pub fn has_shell(&self) -> bool {
        self.has_shell_spec() || self.has_shell_components()
    }

    /// Whether `shell/spec.md` exists
    #[must_use]
    pub fn has_shell_spec(&self) -> bool {
        self.corpus.contains(&self.config.product_path(SHELL_SPEC_PATH))
    }

    fn shell_component_key(&self, name: &str) -> String {
        format!("{}{name}.tsx", self.config.shell_components_prefix())
    }

    /// Whether `AppShell.tsx` is registered
    #[must_use]
    pub fn has_shell_components(&self) -> bool {
        let key = self.shell_component_key(APP_SHELL);
        let exists = self.registry.exists(&key);
        tracing::debug!(
            exists,
            looking_for = %key,
            available = ?self.registry.list_keys(&self.config.shell_components_prefix()),
            "shell component check"
        );
        exists
    }

    /// Names of all shell components
    #[must_use]
    pub fn shell_component_names(&self) -> Vec<String> {
        let prefix = self.config.shell_components_prefix();
        let keys = self.registry.list_keys(&prefix);
        direct_children(&keys, &prefix)
            .filter_map(component_name)
            .map(str::to_string)
            .collect()
    }

    /// Resolve a shell component by name
    #[must_use]
    pub fn load_shell_component(&self, name: &str) -> Option<ComponentHandle> {
        self.registry.load(&self.shell_component_key(name))
    }

    /// Resolve `AppShell.tsx`
    #[must_use]
    pub fn load_app_shell(&self) -> Option<ComponentHandle> {
        let handle = self.load_shell_component(APP_SHELL);
        if handle.is_none() {
            tracing::debug!(key = %self.shell_component_key(APP_SHELL), "AppShell.tsx not found");
        }
        handle
    }

    /// Resolve the standalone shell preview wrapper
    #[must_use]
    pub fn load_shell_preview(&self) -> Option<ComponentHandle> {
        let key = format!(
            "{}/{SHELL_PREVIEW}.tsx",
            self.config.shell_src_root.trim_end_matches('/')
        );
        self.registry.load(&key)
    }

    /// Props for the app shell when previewing a screen design
    ///
    /// Empty when no shell spec exists.
    #[must_use]
    pub fn shell_props(&self, section_id: Option<&str>, view_name: Option<&str>) -> ShellProps {
        shell_props(self.shell_spec_text().as_deref(), section_id, view_name)
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    /// Everything known about one section
    ///
    /// A `data.json` that is not a JSON object is ignored with a warning log.
    #[must_use]
    pub fn load_section_data(&self, section_id: &str) -> SectionData {
        let spec_path = self.config.section_path(section_id, "spec.md");
        let spec = match self.corpus.read_text(&spec_path) {
            Ok(Some(spec)) if spec.trim().is_empty() => {
                tracing::warn!(section_id, path = %spec_path, "section spec is empty, treating as absent");
                None
            }
            Ok(spec) => spec,
            Err(err) => {
                tracing::warn!(section_id, error = %err, "failed to read section spec");
                None
            }
        };

        let data = self.section_data_object(section_id);
        let mut section = SectionData::new(
            section_id,
            spec,
            data,
            self.section_screen_designs(section_id),
            self.section_screenshots(section_id),
        );

        // the trait parser logs spec diagnostics
        if self.config.diagnostics {
            if let Some(spec) = &section.spec {
                section.spec_parsed = SpecParser::new(true).parse(spec);
            }
        }
        section
    }

    fn section_data_object(&self, section_id: &str) -> Option<Map<String, Value>> {
        let path = self.config.section_path(section_id, "data.json");
        match self.corpus.read_json(&path) {
            Ok(Some(Value::Object(map))) => Some(map),
            Ok(Some(other)) => {
                tracing::warn!(
                    path = %path,
                    kind = json_kind(&other),
                    "data file is not an object"
                );
                None
            }
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "failed to load data file");
                None
            }
        }
    }

    /// Screen design components of a section
    #[must_use]
    pub fn section_screen_designs(&self, section_id: &str) -> Vec<ScreenDesignInfo> {
        let prefix = self.config.section_src_prefix(section_id);
        let keys = self.registry.list_keys(&prefix);
        direct_children(&keys, &prefix)
            .filter_map(|key| {
                let name = component_name(key)?.to_string();
                Some(ScreenDesignInfo {
                    component_name: name.clone(),
                    name,
                    path: key.to_string(),
                })
            })
            .collect()
    }

    /// Screenshot images stored beside a section's spec
    #[must_use]
    pub fn section_screenshots(&self, section_id: &str) -> Vec<ScreenshotInfo> {
        let prefix = self.config.section_prefix(section_id);
        let paths = self.corpus.list(&prefix);
        direct_children(&paths, &prefix)
            .filter_map(|path| {
                let file = path.strip_prefix(prefix.as_str())?;
                let name = file.strip_suffix(".png").filter(|stem| !stem.is_empty())?;
                Some(ScreenshotInfo {
                    name: name.to_string(),
                    path: path.to_string(),
                    url: self.corpus.asset_url(path),
                })
            })
            .collect()
    }

    /// Whether the section has a `spec.md`
    #[must_use]
    pub fn has_section_spec(&self, section_id: &str) -> bool {
        self.corpus.contains(&self.config.section_path(section_id, "spec.md"))
    }

    /// Whether the section has a `data.json`
    #[must_use]
    pub fn has_section_data(&self, section_id: &str) -> bool {
        self.corpus.contains(&self.config.section_path(section_id, "data.json"))
    }

    /// Whether the section's screen designs render inside the app shell
    ///
    /// `true` when the section has no spec.
    #[must_use]
    pub fn section_uses_shell(&self, section_id: &str) -> bool {
        let path = self.config.section_path(section_id, "spec.md");
        self.corpus
            .read_text(&path)
            .ok()
            .flatten()
            .and_then(|spec| SpecParser::new(self.config.diagnostics).parse(&spec))
            .map_or(true, |spec| spec.use_shell)
    }

    /// Ids of every section with a spec, sample data or screen design
    ///
    /// Sorted and deduplicated.
    #[must_use]
    pub fn all_section_ids(&self) -> Vec<String> {
        let product_prefix = self.config.product_path("sections/");
        let src_prefix = format!("{}/", self.config.sections_src_root.trim_end_matches('/'));

        let from_product = self.corpus.list(&product_prefix).into_iter().filter_map(|path| {
            let (id, file) = path.strip_prefix(product_prefix.as_str())?.split_once('/')?;
            matches!(file, "spec.md" | "data.json").then(|| id.to_string())
        });
        let from_src = self.registry.list_keys(&src_prefix).into_iter().filter_map(|key| {
            let (id, file) = key.strip_prefix(src_prefix.as_str())?.split_once('/')?;
            (!file.contains('/') && file.ends_with(".tsx")).then(|| id.to_string())
        });

        from_product
            .chain(from_src)
            .filter(|id| !id.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Section data for every known section
    ///
    /// Roadmap order first, then any remaining ids alphabetically.
    #[must_use]
    pub fn load_all_sections(&self, roadmap: Option<&ProductRoadmap>) -> Vec<SectionData> {
        let mut ids: Vec<String> = roadmap
            .map(|roadmap| roadmap.sections.iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default();
        for id in self.all_section_ids() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids.iter().map(|id| self.load_section_data(id)).collect()
    }

    /// Resolve a screen design component
    ///
    /// # Errors
    /// A component error when nothing is registered under the expected key;
    /// the available keys for the section are logged.
    pub fn load_screen_design_component(&self, section_id: &str, name: &str) -> LoadResult<ComponentHandle> {
        let prefix = self.config.section_src_prefix(section_id);
        let key = format!("{prefix}{name}.tsx");
        if let Some(handle) = self.registry.load(&key) {
            return LoadResult::success(handle, Vec::new());
        }

        let available = self.registry.list_keys(&prefix);
        let mut listing = available
            .iter()
            .take(MAX_PATHS_SHOWN)
            .map(|path| format!("  - {path}"))
            .collect::<Vec<_>>()
            .join("\n");
        if listing.is_empty() {
            listing.push_str("  (none)");
        }
        if available.len() > MAX_PATHS_SHOWN {
            listing.push_str(&format!("\n  ... and {} more", available.len() - MAX_PATHS_SHOWN));
        }
        tracing::warn!(
            key = %key,
            section_id,
            total = available.len(),
            "screen design component not found\n{listing}"
        );

        LoadResult::failure(
            vec![DesignOsError::component(name, section_id, format!("Component not found at {key}"))
                .with_details(format!("Available ({} total):\n{listing}", available.len()))],
            Vec::new(),
        )
    }

    /// Validate a section's `data.json` `_meta` block
    pub fn validate_section_data(&self, section_id: &str) -> LoadResult<SampleDataMeta> {
        let (value, errors, warnings) = self
            .load_json(&self.config.section_path(section_id, "data.json"), "/sample-data")
            .into_parts();
        match value {
            Some(value) => validate_sample_data(&value),
            None => LoadResult::failure(errors, warnings),
        }
    }

    // ------------------------------------------------------------------
    // Aggregate
    // ------------------------------------------------------------------

    /// Load every product-level artifact
    ///
    /// Absent or invalid artifacts become `None`; use the individual loaders
    /// for their issues.
    #[must_use]
    pub fn load_product_data(&self) -> ProductData {
        ProductData {
            overview: self.load_product_overview().into_option(),
            roadmap: self.load_product_roadmap().into_option(),
            data_model: self.load_data_model().into_option(),
            design_system: self.load_design_system().into_option(),
            shell: self.load_shell_info(),
        }
    }
}

fn artifact_warning<P: ArtifactParser>(
    parser: &P,
    category: ErrorCategory,
    message: String,
) -> DesignOsError {
    let recovery = match parser.recovery_command() {
        Some(command) => RecoveryAction::new("Fill in the expected sections.").with_command(command),
        None => RecoveryAction::new("Fill in the expected sections."),
    };
    DesignOsError::warning(category, P::ARTIFACT, message).with_recovery(recovery)
}

/// Entries directly under `prefix`, excluding nested directories
fn direct_children<'a>(paths: &'a [String], prefix: &'a str) -> impl Iterator<Item = &'a str> {
    paths
        .iter()
        .filter_map(move |path| path.strip_prefix(prefix).map(|rest| (path, rest)))
        .filter(|(_, rest)| !rest.is_empty() && !rest.contains('/'))
        .map(|(path, _)| path.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorPolicy;
    use crate::corpus::{InMemoryCorpus, StaticRegistry};
    use crate::error::Severity;

    fn loader(corpus: InMemoryCorpus) -> ProductLoader<InMemoryCorpus, StaticRegistry> {
        ProductLoader::new(corpus, StaticRegistry::new())
    }

    #[test]
    fn missing_overview_is_file_not_found() {
        let result = loader(InMemoryCorpus::new()).load_product_overview();
        assert!(result.data().is_none());
        let error = &result.errors()[0];
        assert_eq!(error.category, ErrorCategory::FileNotFound);
        assert_eq!(error.component, "product-overview.md");
        assert_eq!(
            error.recovery.as_ref().and_then(|r| r.command.as_deref()),
            Some("/product-vision")
        );
    }

    #[test]
    fn empty_overview_is_warning() {
        let corpus = InMemoryCorpus::new().with_file("product/product-overview.md", "  \n");
        let result = loader(corpus).load_product_overview();
        assert!(result.data().is_none());
        assert!(!result.has_errors());
        assert!(result.warnings()[0].message.contains("is empty"));
    }

    #[test]
    fn non_conforming_overview_is_warning() {
        let corpus =
            InMemoryCorpus::new().with_file("product/product-overview.md", "# P\n\nprose\n");
        let result = loader(corpus).load_product_overview();
        assert!(result.data().is_none());
        assert_eq!(result.warnings()[0].category, ErrorCategory::ParseError);
    }

    #[test]
    fn design_system_keeps_valid_half() {
        let corpus = InMemoryCorpus::new()
            .with_file("product/design-system/colors.json", "[1]")
            .with_file(
                "product/design-system/typography.json",
                r#"{"heading": "DM Sans", "body": "Inter"}"#,
            );
        let result = loader(corpus).load_design_system();
        let system = result.data().unwrap();
        assert!(system.colors.is_none());
        assert_eq!(system.typography.as_ref().unwrap().mono, "IBM Plex Mono");
        assert!(result.warnings().iter().all(|w| w.severity == Severity::Warning));
        assert!(!result.warnings().is_empty());
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let corpus = InMemoryCorpus::new().with_file("product/design-system/colors.json", "{oops");
        let result = loader(corpus).load_color_tokens();
        assert_eq!(result.errors()[0].category, ErrorCategory::ParseError);
        assert_eq!(result.errors()[0].component, "colors.json");
    }

    #[test]
    fn strict_policy_from_config() {
        let corpus = InMemoryCorpus::new().with_file(
            "product/design-system/colors.json",
            r#"{"primary": "rainbow", "secondary": "lime", "neutral": "stone"}"#,
        );
        let config = LoaderConfig::default().with_color_policy(ColorPolicy::Strict);
        let loader = ProductLoader::with_config(config, corpus, StaticRegistry::new());
        assert!(loader.load_color_tokens().data().is_none());
    }

    #[test]
    fn section_exists_flag() {
        let corpus = InMemoryCorpus::new()
            .with_file("product/sections/invoices/data.json", r#"{"invoices": []}"#);
        let loader = loader(corpus);
        assert!(loader.load_section_data("invoices").exists);
        assert!(!loader.load_section_data("ghost").exists);
    }

    #[test]
    fn empty_spec_is_absent() {
        let corpus = InMemoryCorpus::new().with_file("product/sections/a/spec.md", "");
        let loader = loader(corpus);
        let section = loader.load_section_data("a");
        assert!(!section.exists);
        assert!(section.spec.is_none());
        assert!(loader.all_section_ids().contains(&"a".to_string()));

        let sections = loader.load_all_sections(None);
        let result = crate::export::validate_for_export(&loader.load_product_data(), &sections);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.message == "No sections have been defined"));
    }

    #[test]
    fn non_object_data_is_ignored() {
        let corpus = InMemoryCorpus::new().with_file("product/sections/a/data.json", "[1, 2]");
        let section = loader(corpus).load_section_data("a");
        assert!(section.data.is_none());
        assert!(!section.exists);
    }

    #[test]
    fn screenshots_are_direct_png_children() {
        let corpus = InMemoryCorpus::new()
            .with_file("product/sections/a/list.png", "")
            .with_file("product/sections/a/nested/deep.png", "")
            .with_file("product/sections/a/spec.md", "# A\n")
            .with_file("product/sections/ab/other.png", "");
        let shots = loader(corpus).section_screenshots("a");
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].name, "list");
        assert_eq!(shots[0].url, "/product/sections/a/list.png");
    }

    #[test]
    fn uses_shell_defaults_to_true() {
        let corpus = InMemoryCorpus::new().with_file(
            "product/sections/b/spec.md",
            "# B\n## Configuration\n- shell: false\n",
        );
        let loader = loader(corpus);
        assert!(loader.section_uses_shell("a"));
        assert!(!loader.section_uses_shell("b"));
    }

    #[test]
    fn section_ids_union() {
        let corpus = InMemoryCorpus::new()
            .with_file("product/sections/zeta/spec.md", "# Z\n")
            .with_file("product/sections/alpha/data.json", "{}")
            .with_file("product/sections/only-png/shot.png", "");
        let registry = StaticRegistry::new()
            .with_component("src/sections/beta/List.tsx")
            .with_component("src/sections/alpha/List.tsx");
        let loader = ProductLoader::new(corpus, registry);
        assert_eq!(loader.all_section_ids(), vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn missing_screen_design_is_component_error() {
        let registry = StaticRegistry::new().with_component("src/sections/a/List.tsx");
        let loader = ProductLoader::new(InMemoryCorpus::new(), registry);
        assert_eq!(
            loader.load_screen_design_component("a", "List").data().unwrap().name,
            "List"
        );
        let missing = loader.load_screen_design_component("a", "Detail");
        assert_eq!(missing.errors()[0].category, ErrorCategory::ComponentError);
        assert!(missing.errors()[0].details.as_deref().unwrap().contains("List.tsx"));
    }

    #[test]
    fn shell_components() {
        let registry = StaticRegistry::new()
            .with_component("src/shell/components/AppShell.tsx")
            .with_component("src/shell/components/MainNav.tsx")
            .with_component("src/shell/ShellPreview.tsx");
        let loader = ProductLoader::new(InMemoryCorpus::new(), registry);
        assert!(loader.has_shell_components());
        assert!(loader.has_shell());
        assert!(!loader.has_shell_spec());
        assert_eq!(loader.shell_component_names(), vec!["AppShell", "MainNav"]);
        assert!(loader.load_app_shell().is_some());
        assert!(loader.load_shell_preview().is_some());
        let info = loader.load_shell_info().unwrap();
        assert!(info.spec.is_none());
        assert!(info.has_components);
    }

    #[test]
    fn validate_section_data_requires_file() {
        let result = loader(InMemoryCorpus::new()).validate_section_data("a");
        assert_eq!(result.errors()[0].category, ErrorCategory::FileNotFound);
    }

    #[test]
    fn empty_project_loads_nothing() {
        let data = loader(InMemoryCorpus::new()).load_product_data();
        assert_eq!(data, ProductData::default());
    }
}
