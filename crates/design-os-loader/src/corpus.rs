//! File corpus and component registry abstractions
//!
//! The loader never touches the filesystem directly. Callers inject a
//! [`FileCorpus`] that maps virtual, `/`-separated paths relative to the
//! project root to file contents, and a [`ComponentRegistry`] that answers
//! which UI components exist.

use crate::error::CorpusError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Source of artifact files keyed by virtual path
pub trait FileCorpus {
    /// Read a text file
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns [`CorpusError`] when the file exists but cannot be read
    fn read_text(&self, path: &str) -> Result<Option<String>, CorpusError>;

    /// Whether a file exists at `path`
    fn contains(&self, path: &str) -> bool;

    /// All file paths starting with `prefix`, sorted
    fn list(&self, prefix: &str) -> Vec<String>;

    /// Read and decode a JSON file
    ///
    /// # Errors
    /// Returns [`CorpusError::Json`] when the file is not valid JSON
    fn read_json(&self, path: &str) -> Result<Option<Value>, CorpusError> {
        let Some(text) = self.read_text(path)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| CorpusError::Json {
                path: path.to_string(),
                source,
            })
    }

    /// URL under which a static asset is served
    fn asset_url(&self, path: &str) -> String {
        format!("/{}", path.trim_start_matches('/'))
    }
}

/// In-memory corpus with deterministic ordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryCorpus {
    files: BTreeMap<String, String>,
}

impl InMemoryCorpus {
    /// Create empty corpus
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a file added
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(normalize(&path.into()), content.into());
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the corpus has no files
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileCorpus for InMemoryCorpus {
    fn read_text(&self, path: &str) -> Result<Option<String>, CorpusError> {
        Ok(self.files.get(&normalize(path)).cloned())
    }

    fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize(path))
    }

    fn list(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize(prefix);
        self.files
            .range(prefix.clone()..)
            .take_while(|(path, _)| path.starts_with(&prefix))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

/// Resolved UI component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHandle {
    /// Registry key (virtual path)
    pub key: String,
    /// Component name (file stem)
    pub name: String,
    /// Where the component's source lives, if known
    pub location: Option<String>,
}

impl ComponentHandle {
    /// Create handle for a key, deriving the name from the file stem
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: component_name(key).unwrap_or(key).to_string(),
            location: None,
        }
    }
}

/// Read-only view of the available UI components
///
/// The loader only ever asks whether a key exists or which keys share a
/// prefix; component internals are opaque.
pub trait ComponentRegistry {
    /// Whether a component is registered under `key`
    fn exists(&self, key: &str) -> bool;

    /// All keys starting with `prefix`, sorted
    fn list_keys(&self, prefix: &str) -> Vec<String>;

    /// Resolve a component lazily
    fn load(&self, key: &str) -> Option<ComponentHandle>;
}

/// Registry backed by a fixed set of keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRegistry {
    components: BTreeMap<String, Option<String>>,
}

impl StaticRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a component registered under `key`
    #[must_use]
    pub fn with_component(mut self, key: impl Into<String>) -> Self {
        self.register(key, None);
        self
    }

    /// Register a component with an optional source location
    pub fn register(&mut self, key: impl Into<String>, location: Option<String>) {
        self.components.insert(normalize(&key.into()), location);
    }

    /// Registered keys
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        self.components.keys().map(String::as_str).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for StaticRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for key in iter {
            registry.register(key, None);
        }
        registry
    }
}

impl ComponentRegistry for StaticRegistry {
    fn exists(&self, key: &str) -> bool {
        self.components.contains_key(&normalize(key))
    }

    fn list_keys(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize(prefix);
        self.components
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn load(&self, key: &str) -> Option<ComponentHandle> {
        let key = normalize(key);
        self.components.get(&key).map(|location| ComponentHandle {
            location: location.clone(),
            ..ComponentHandle::for_key(&key)
        })
    }
}

/// File stem of a `.tsx` component path
///
/// `src/sections/invoices/InvoiceList.tsx` -> `InvoiceList`
#[must_use]
pub fn component_name(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    file.strip_suffix(".tsx").filter(|stem| !stem.is_empty())
}

/// Strip leading `/` and `./` so absolute-looking keys compare equal
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut path = path.trim();
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix('/') {
            path = rest;
        } else {
            break;
        }
    }
    path.to_string()
}
