//! Design OS command-line support
//!
//! Binds the loader to a project directory on disk:
//! - [`FsCorpus`] serves artifact files relative to the project root
//! - [`scan_components`] builds a component registry from `.tsx` sources
//! - [`inspect`] and [`check`] back the `design-os` subcommands

use anyhow::{bail, Context};
use design_os_loader::error::CorpusError;
use design_os_loader::export::IssueCategory;
use design_os_loader::{
    validate_for_export, FileCorpus, LoaderConfig, ProductLoader, Severity, StaticRegistry,
    ValidationResult,
};
use serde::Serialize;
use serde_json::Value;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Config file picked up from the project root when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "design-os.toml";

const IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target", "dist", "build"];

/// Loader over a project directory
pub type ProjectLoader = ProductLoader<FsCorpus, StaticRegistry>;

/// File corpus rooted at a project directory
///
/// Virtual paths are `/`-separated and relative to the root. Paths that
/// climb out of the root are rejected.
#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
}

impl FsCorpus {
    /// Create corpus rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a virtual path to a filesystem path under the root
    ///
    /// # Errors
    /// Returns [`CorpusError::OutsideRoot`] for absolute paths or `..`
    /// components
    pub fn resolve(&self, path: &str) -> Result<PathBuf, CorpusError> {
        let relative = Path::new(path.trim_start_matches("./"));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(CorpusError::OutsideRoot(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn virtual_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

impl FileCorpus for FsCorpus {
    fn read_text(&self, path: &str) -> Result<Option<String>, CorpusError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&full)
            .map(Some)
            .map_err(|source| CorpusError::io_error(full, source))
    }

    fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|full| full.is_file())
    }

    fn list(&self, prefix: &str) -> Vec<String> {
        // Walk only the deepest directory the prefix names.
        let base = prefix.rsplit_once('/').map_or("", |(dir, _)| dir);
        let Ok(start) = self.resolve(base) else {
            tracing::warn!(prefix, "refusing to list outside project root");
            return Vec::new();
        };
        if !start.is_dir() {
            return Vec::new();
        }

        let mut paths: Vec<String> = walk_files(&start)
            .filter_map(|entry| self.virtual_path(entry.path()))
            .filter(|path| path.starts_with(prefix))
            .collect();
        paths.sort();
        paths
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn walk_files(start: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(start)
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

/// Build a registry from every `.tsx` file under the configured source roots
///
/// Keys are virtual paths; each component records its location on disk.
#[must_use]
pub fn scan_components(corpus: &FsCorpus, config: &LoaderConfig) -> StaticRegistry {
    let mut registry = StaticRegistry::new();
    for src_root in [&config.sections_src_root, &config.shell_src_root] {
        let Ok(start) = corpus.resolve(src_root) else {
            tracing::warn!(src_root, "component root outside project, skipped");
            continue;
        };
        if !start.is_dir() {
            continue;
        }
        for entry in walk_files(&start) {
            if entry.path().extension().is_some_and(|ext| ext == "tsx") {
                if let Some(key) = corpus.virtual_path(entry.path()) {
                    registry.register(key, Some(entry.path().display().to_string()));
                }
            }
        }
    }
    tracing::debug!(components = registry.keys().len(), "component scan complete");
    registry
}

/// Resolve configuration for a project
///
/// An explicit path must exist. Otherwise `design-os.toml` in the root is
/// used when present, and defaults when not.
///
/// # Errors
/// Returns an error when the chosen file cannot be read or parsed
pub fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(LoaderConfig::default());
            }
            candidate
        }
    };
    LoaderConfig::from_file(&path).with_context(|| format!("loading config {}", path.display()))
}

/// Open a project directory
///
/// # Errors
/// Returns an error when `root` is not a directory
pub fn open_project(root: &Path, config: LoaderConfig) -> anyhow::Result<ProjectLoader> {
    if !root.is_dir() {
        bail!("project root {} is not a directory", root.display());
    }
    let corpus = FsCorpus::new(root);
    let registry = scan_components(&corpus, &config);
    Ok(ProductLoader::with_config(config, corpus, registry))
}

/// Artifacts that `inspect` can print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// `product-overview.md`
    Overview,
    /// `product-roadmap.md`
    Roadmap,
    /// `data-model/data-model.md`
    DataModel,
    /// Color and typography tokens
    DesignSystem,
    /// Shell spec and components
    Shell,
    /// One section's artifacts
    Section,
}

impl Artifact {
    /// Command-line names, in help order
    pub const NAMES: [&'static str; 6] = [
        "overview",
        "roadmap",
        "data-model",
        "design-system",
        "shell",
        "section",
    ];

    /// Look up by command-line name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "overview" => Some(Self::Overview),
            "roadmap" => Some(Self::Roadmap),
            "data-model" => Some(Self::DataModel),
            "design-system" => Some(Self::DesignSystem),
            "shell" => Some(Self::Shell),
            "section" => Some(Self::Section),
            _ => None,
        }
    }
}

/// Load one artifact as JSON
///
/// # Errors
/// Returns an error when `section` is required but missing
pub fn inspect(loader: &ProjectLoader, artifact: Artifact, section: Option<&str>) -> anyhow::Result<Value> {
    let value = match artifact {
        Artifact::Overview => serde_json::to_value(loader.load_product_overview())?,
        Artifact::Roadmap => serde_json::to_value(loader.load_product_roadmap())?,
        Artifact::DataModel => serde_json::to_value(loader.load_data_model())?,
        Artifact::DesignSystem => serde_json::to_value(loader.load_design_system())?,
        Artifact::Shell => serde_json::json!({
            "spec": loader.load_shell_spec(),
            "components": loader.shell_component_names(),
            "preview": loader.load_shell_preview().map(|c| c.key),
        }),
        Artifact::Section => {
            let Some(section_id) = section else {
                bail!("inspect section requires --section <id>");
            };
            serde_json::json!({
                "section": loader.load_section_data(section_id),
                "usesShell": loader.section_uses_shell(section_id),
                "sampleData": loader.validate_section_data(section_id),
            })
        }
    };
    Ok(value)
}

/// Outcome of `design-os check`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Sections considered, roadmap order first
    pub sections: Vec<String>,
    /// Export readiness
    pub validation: ValidationResult,
}

impl CheckReport {
    /// Whether the project can be exported
    #[must_use]
    pub fn passed(&self) -> bool {
        self.validation.is_valid
    }

    /// Human-readable report
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut lines = vec![format!("Sections: {}", self.sections.join(", "))];
        for issue in &self.validation.issues {
            lines.push(render_issue(issue.severity, issue.category, &issue.message));
            if let Some(suggestion) = &issue.suggestion {
                lines.push(format!("    {suggestion}"));
            }
        }
        lines.push(design_os_loader::format_validation_result(&self.validation));
        lines.join("\n")
    }
}

fn render_issue(severity: Severity, category: IssueCategory, message: &str) -> String {
    format!("{:<7} [{category}] {message}", severity.label())
}

/// Validate a project for export
#[must_use]
pub fn check(loader: &ProjectLoader) -> CheckReport {
    let product = loader.load_product_data();
    let sections = loader.load_all_sections(product.roadmap.as_ref());
    let validation = validate_for_export(&product, &sections);
    tracing::info!(
        errors = validation.summary.errors,
        warnings = validation.summary.warnings,
        "export check complete"
    );
    CheckReport {
        sections: sections.into_iter().map(|s| s.section_id).collect(),
        validation,
    }
}
