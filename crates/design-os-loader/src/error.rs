//! Error and result model for artifact loading
//!
//! Provides the shared vocabulary used by every loader:
//! - [`Severity`] and [`ErrorCategory`] for classifying issues
//! - [`DesignOsError`] with optional recovery guidance
//! - [`LoadResult<T>`] for loaders that can partially fail
//! - [`CorpusError`] and [`ConfigError`] for genuinely unexpected failures
//!
//! Expected malformation (missing files, empty sections, unknown enum values)
//! never surfaces as a Rust `Err`; it is collected into a `LoadResult`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Issue severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// Fatal for the artifact being loaded
    Error,
    /// Non-fatal issue worth addressing
    Warning,
    /// Informational only
    Info,
}

impl Severity {
    /// Capitalized label used in formatted messages
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure classification, orthogonal to [`Severity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// Expected artifact is absent
    FileNotFound,
    /// Artifact could not be parsed
    ParseError,
    /// Artifact parsed but failed a content rule
    ValidationError,
    /// Screen design or shell component problem
    ComponentError,
    /// Value has the wrong JSON type
    TypeMismatch,
    /// A required companion artifact is absent
    MissingDependency,
    /// Document structure is malformed
    StructureError,
}

impl ErrorCategory {
    /// Wire name of the category
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileNotFound => "file-not-found",
            Self::ParseError => "parse-error",
            Self::ValidationError => "validation-error",
            Self::ComponentError => "component-error",
            Self::TypeMismatch => "type-mismatch",
            Self::MissingDependency => "missing-dependency",
            Self::StructureError => "structure-error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recovery guidance attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryAction {
    /// What the author should do
    pub action: String,
    /// Optional authoring command that fixes the issue (e.g. `/sample-data`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl RecoveryAction {
    /// Create recovery action without a command
    #[inline]
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            command: None,
        }
    }

    /// Attach a command
    #[inline]
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

/// Structured issue raised while loading an artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignOsError {
    /// Severity level
    pub severity: Severity,
    /// Failure classification
    pub category: ErrorCategory,
    /// File or component label (e.g. `data.json`, `AppShell.tsx`)
    pub component: String,
    /// Human-readable message, without trailing period
    pub message: String,
    /// Extra diagnostic detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// How to fix it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryAction>,
    /// Creation time in unix milliseconds
    pub timestamp: i64,
}

impl DesignOsError {
    /// Create an issue with the given severity
    #[must_use]
    pub fn with_severity(
        severity: Severity,
        category: ErrorCategory,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            component: component.into(),
            message: message.into(),
            details: None,
            recovery: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create an error-severity issue
    #[inline]
    #[must_use]
    pub fn new(
        category: ErrorCategory,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Error, category, component, message)
    }

    /// Create a warning-severity issue
    #[inline]
    #[must_use]
    pub fn warning(
        category: ErrorCategory,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Warning, category, component, message)
    }

    /// Create an info-severity issue
    #[inline]
    #[must_use]
    pub fn info(
        category: ErrorCategory,
        component: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_severity(Severity::Info, category, component, message)
    }

    /// Downgrade to a warning, keeping everything else
    #[inline]
    #[must_use]
    pub fn into_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    /// Attach details
    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach recovery guidance
    #[inline]
    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryAction) -> Self {
        self.recovery = Some(recovery);
        self
    }

    /// File-not-found error, labelled by the file name
    #[must_use]
    pub fn file_not_found(path: &str, recovery_command: Option<&str>) -> Self {
        let file_name = path.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or(path);
        let recovery = match recovery_command {
            Some(command) => RecoveryAction::new("Create the file first.").with_command(command),
            None => RecoveryAction::new("Create the file or check the path."),
        };
        Self::new(
            ErrorCategory::FileNotFound,
            file_name,
            format!("File not found at {path}"),
        )
        .with_recovery(recovery)
    }

    /// Structure error for a `data.json` `_meta` block
    #[must_use]
    pub fn meta_validation(issue: impl Into<String>, details: Option<String>) -> Self {
        let error = Self::new(ErrorCategory::StructureError, "data.json", issue).with_recovery(
            RecoveryAction::new("Update the _meta structure.").with_command("/sample-data"),
        );
        match details {
            Some(details) => error.with_details(details),
            None => error,
        }
    }

    /// Screen design component error
    #[must_use]
    pub fn component(component_name: &str, section_id: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCategory::ComponentError,
            format!("{component_name}.tsx"),
            message,
        )
        .with_recovery(
            RecoveryAction::new(format!("Check the component in src/sections/{section_id}/."))
                .with_command("/design-screen"),
        )
    }

    /// Markdown or JSON parse error
    #[must_use]
    pub fn parse(file_name: impl Into<String>, issue: impl Into<String>, details: Option<String>) -> Self {
        let error = Self::new(ErrorCategory::ParseError, file_name, issue)
            .with_recovery(RecoveryAction::new("Fix the file syntax."));
        match details {
            Some(details) => error.with_details(details),
            None => error,
        }
    }
}

impl fmt::Display for DesignOsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}.", self.severity, self.component, self.message)?;
        if let Some(recovery) = &self.recovery {
            if !recovery.action.is_empty() {
                write!(f, " {}", recovery.action)?;
            }
            if let Some(command) = &recovery.command {
                write!(f, " Run {command}.")?;
            }
        }
        Ok(())
    }
}

/// Format an issue as a single line:
/// `"<Severity>: <component> - <message>. <action> Run <command>."`
#[inline]
#[must_use]
pub fn format_error(error: &DesignOsError) -> String {
    error.to_string()
}

/// Universal return shape for loaders that can partially fail
///
/// `data` is always `None` when `errors` is non-empty. Warnings never clear
/// `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadResult<T> {
    data: Option<T>,
    errors: Vec<DesignOsError>,
    warnings: Vec<DesignOsError>,
}

impl<T> Default for LoadResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> LoadResult<T> {
    /// No data, no issues
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Loaded data plus non-fatal warnings
    #[inline]
    #[must_use]
    pub fn success(data: T, warnings: Vec<DesignOsError>) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            warnings,
        }
    }

    /// Failed load
    #[inline]
    #[must_use]
    pub fn failure(errors: Vec<DesignOsError>, warnings: Vec<DesignOsError>) -> Self {
        Self {
            data: None,
            errors,
            warnings,
        }
    }

    /// Build from parts, dropping `data` if any error is present
    #[must_use]
    pub fn from_parts(
        data: Option<T>,
        errors: Vec<DesignOsError>,
        warnings: Vec<DesignOsError>,
    ) -> Self {
        let data = if errors.is_empty() { data } else { None };
        Self {
            data,
            errors,
            warnings,
        }
    }

    /// Merge several results, computing data only when no input has errors
    pub fn combine<I, U, F>(results: I, combine_data: F) -> Self
    where
        I: IntoIterator<Item = LoadResult<U>>,
        F: FnOnce() -> Option<T>,
    {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for result in results {
            errors.extend(result.errors);
            warnings.extend(result.warnings);
        }
        let data = if errors.is_empty() { combine_data() } else { None };
        Self {
            data,
            errors,
            warnings,
        }
    }

    /// Loaded data, if any
    #[inline]
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Fatal errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[DesignOsError] {
        &self.errors
    }

    /// Non-fatal warnings
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[DesignOsError] {
        &self.warnings
    }

    /// Whether any error was recorded
    #[inline]
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any warning was recorded
    #[inline]
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether any error or warning was recorded
    #[inline]
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.has_errors() || self.has_warnings()
    }

    /// Append a warning
    pub fn push_warning(&mut self, warning: DesignOsError) {
        self.warnings.push(warning);
    }

    /// Append an error; clears data
    pub fn push_error(&mut self, error: DesignOsError) {
        self.data = None;
        self.errors.push(error);
    }

    /// Transform the data, keeping issues
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LoadResult<U> {
        LoadResult {
            data: self.data.map(f),
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    /// Discard issues and keep the data
    #[inline]
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        self.data
    }

    /// Split into data, errors and warnings
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Vec<DesignOsError>, Vec<DesignOsError>) {
        (self.data, self.errors, self.warnings)
    }
}

/// Emit every error and warning through `tracing`
pub fn log_load_result<T>(result: &LoadResult<T>, context: Option<&str>) {
    let context = context.unwrap_or("design-os");
    for error in result.errors() {
        tracing::error!(
            context,
            details = error.details.as_deref().unwrap_or_default(),
            "{}",
            format_error(error)
        );
    }
    for warning in result.warnings() {
        tracing::warn!(
            context,
            details = warning.details.as_deref().unwrap_or_default(),
            "{}",
            format_error(warning)
        );
    }
}

/// Errors raised by corpus providers
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// IO error reading a file
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("invalid json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Path escapes the corpus root
    #[error("path outside corpus root: {0}")]
    OutsideRoot(String),
}

impl CorpusError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading [`crate::config::LoaderConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the schema
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_with_action_and_command() {
        let err = DesignOsError::new(ErrorCategory::ValidationError, "data.json", "Missing _meta.models")
            .with_recovery(RecoveryAction::new("Add model descriptions.").with_command("/sample-data"));
        assert_eq!(
            format_error(&err),
            "Error: data.json - Missing _meta.models. Add model descriptions. Run /sample-data."
        );
    }

    #[test]
    fn format_without_recovery() {
        let err = DesignOsError::warning(ErrorCategory::StructureError, "spec.md", "Empty overview");
        assert_eq!(format_error(&err), "Warning: spec.md - Empty overview.");
    }

    #[test]
    fn file_not_found_uses_file_name() {
        let err = DesignOsError::file_not_found("product/sections/a/data.json", Some("/sample-data"));
        assert_eq!(err.component, "data.json");
        assert_eq!(err.category, ErrorCategory::FileNotFound);
        assert_eq!(
            err.recovery.as_ref().and_then(|r| r.command.as_deref()),
            Some("/sample-data")
        );
    }

    #[test]
    fn component_error_points_at_section() {
        let err = DesignOsError::component("InvoiceList", "invoices", "Failed to load");
        assert_eq!(err.component, "InvoiceList.tsx");
        assert!(format_error(&err).contains("src/sections/invoices/"));
    }

    #[test]
    fn errors_clear_data() {
        let result = LoadResult::from_parts(
            Some(1),
            vec![DesignOsError::new(ErrorCategory::ParseError, "x", "bad")],
            Vec::new(),
        );
        assert!(result.data().is_none());
        assert!(result.has_errors());
    }

    #[test]
    fn warnings_keep_data() {
        let result = LoadResult::success(
            1,
            vec![DesignOsError::warning(ErrorCategory::ValidationError, "x", "meh")],
        );
        assert_eq!(result.data(), Some(&1));
        assert!(result.has_warnings());
        assert!(result.has_issues());
    }

    #[test]
    fn push_error_clears_data() {
        let mut result = LoadResult::success("value", Vec::new());
        result.push_error(DesignOsError::new(ErrorCategory::TypeMismatch, "x", "wrong"));
        assert!(result.data().is_none());
    }

    #[test]
    fn combine_concatenates_and_gates_data() {
        let ok: LoadResult<u8> = LoadResult::success(
            1,
            vec![DesignOsError::warning(ErrorCategory::ValidationError, "a", "w")],
        );
        let bad: LoadResult<u8> =
            LoadResult::failure(vec![DesignOsError::new(ErrorCategory::ParseError, "b", "e")], Vec::new());

        let combined: LoadResult<&str> = LoadResult::combine(vec![ok.clone(), bad], || Some("both"));
        assert!(combined.data().is_none());
        assert_eq!(combined.errors().len(), 1);
        assert_eq!(combined.warnings().len(), 1);

        let combined: LoadResult<&str> = LoadResult::combine(vec![ok], || Some("both"));
        assert_eq!(combined.data(), Some(&"both"));
    }

    #[test]
    fn category_serializes_kebab_case() {
        let json = serde_json::to_string(&ErrorCategory::FileNotFound).unwrap();
        assert_eq!(json, "\"file-not-found\"");
        assert_eq!(ErrorCategory::MissingDependency.to_string(), "missing-dependency");
    }
}
