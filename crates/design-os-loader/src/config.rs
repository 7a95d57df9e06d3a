//! Loader configuration
//!
//! Conventional roots and validation policies. Every field has a default so
//! an empty TOML document is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default typography fallback when `mono` is absent
pub const DEFAULT_MONO_FONT: &str = "IBM Plex Mono";

/// How unknown palette names in `colors.json` are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    /// Accept the value and record a warning (supports custom theme tokens)
    #[default]
    Lenient,
    /// Reject the whole color token set
    Strict,
}

/// Configuration for [`crate::ProductLoader`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Root of product-definition artifacts
    pub product_root: String,
    /// Root of screen-design components
    pub sections_src_root: String,
    /// Root of shell components
    pub shell_src_root: String,
    /// Font used when typography omits `mono`
    pub mono_fallback: String,
    /// Palette validation policy
    pub color_policy: ColorPolicy,
    /// Emit parser-level diagnostics
    pub diagnostics: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            product_root: "product".to_string(),
            sections_src_root: "src/sections".to_string(),
            shell_src_root: "src/shell".to_string(),
            mono_fallback: DEFAULT_MONO_FONT.to_string(),
            color_policy: ColorPolicy::Lenient,
            diagnostics: false,
        }
    }
}

impl LoaderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] if the text is not valid for the schema
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read configuration from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// With product root
    #[inline]
    #[must_use]
    pub fn with_product_root(mut self, root: impl Into<String>) -> Self {
        self.product_root = normalize_root(root.into());
        self
    }

    /// With color policy
    #[inline]
    #[must_use]
    pub fn with_color_policy(mut self, policy: ColorPolicy) -> Self {
        self.color_policy = policy;
        self
    }

    /// With mono fallback font
    #[inline]
    #[must_use]
    pub fn with_mono_fallback(mut self, font: impl Into<String>) -> Self {
        self.mono_fallback = font.into();
        self
    }

    /// With diagnostics toggled
    #[inline]
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Path of a file under the product root
    #[must_use]
    pub fn product_path(&self, relative: &str) -> String {
        join(&self.product_root, relative)
    }

    /// Path of a file under a section's product directory
    #[must_use]
    pub fn section_path(&self, section_id: &str, file: &str) -> String {
        join(&self.product_root, &format!("sections/{section_id}/{file}"))
    }

    /// Prefix of a section's product directory
    #[must_use]
    pub fn section_prefix(&self, section_id: &str) -> String {
        join(&self.product_root, &format!("sections/{section_id}/"))
    }

    /// Prefix of a section's screen-design directory
    #[must_use]
    pub fn section_src_prefix(&self, section_id: &str) -> String {
        join(&self.sections_src_root, &format!("{section_id}/"))
    }

    /// Prefix of the shell component directory
    #[must_use]
    pub fn shell_components_prefix(&self) -> String {
        join(&self.shell_src_root, "components/")
    }
}

fn normalize_root(root: String) -> String {
    root.trim_matches('/').to_string()
}

fn join(root: &str, relative: &str) -> String {
    let root = root.trim_matches('/');
    if root.is_empty() {
        relative.to_string()
    } else {
        format!("{root}/{relative}")
    }
}
