//! Design OS Loader
//!
//! Ingestion and validation of product-definition artifacts: markdown specs,
//! JSON sample data and design-token files laid out under `product/` and
//! `src/`.
//!
//! # Core Operations
//!
//! - **Parse**: pure functions from artifact text to typed structures
//! - **Validate**: design tokens and sample-data `_meta` blocks, collecting
//!   issues into a [`LoadResult`] instead of failing
//! - **Aggregate**: [`ProductLoader`] reads a [`FileCorpus`] and answers
//!   component questions through a [`ComponentRegistry`]
//! - **Check**: [`validate_for_export`] summarizes export readiness
//!
//! # Architecture
//!
//! ```text
//! FileCorpus → ProductLoader → parsers → typed structures (+ issues)
//!                   ↓                          ↓
//!           ComponentRegistry          export validator / shell props
//! ```
//!
//! # Example
//!
//! ```rust
//! use design_os_loader::{InMemoryCorpus, ProductLoader, StaticRegistry};
//!
//! let corpus = InMemoryCorpus::new()
//!     .with_file("product/product-overview.md", "# Acme\n\n## Description\nInvoicing.\n");
//! let loader = ProductLoader::new(corpus, StaticRegistry::new());
//!
//! let overview = loader.load_product_overview();
//! assert_eq!(overview.data().map(|o| o.name.as_str()), Some("Acme"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod breadcrumbs;
pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod loader;
pub mod markdown;
pub mod parsers;
pub mod shell_props;

// Re-exports for convenience
pub use config::{ColorPolicy, LoaderConfig};
pub use corpus::{ComponentHandle, ComponentRegistry, FileCorpus, InMemoryCorpus, StaticRegistry};
pub use error::{
    format_error, log_load_result, ConfigError, CorpusError, DesignOsError, ErrorCategory,
    LoadResult, RecoveryAction, Severity,
};
pub use export::{format_validation_result, validate_for_export, ValidationIssue, ValidationResult};
pub use loader::{ProductData, ProductLoader};
pub use shell_props::{shell_props, ShellProps};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the loader
    pub use crate::config::{ColorPolicy, LoaderConfig};
    pub use crate::corpus::{ComponentRegistry, FileCorpus, InMemoryCorpus, StaticRegistry};
    pub use crate::error::{DesignOsError, ErrorCategory, LoadResult, Severity};
    pub use crate::export::{validate_for_export, ValidationResult};
    pub use crate::loader::{ProductData, ProductLoader};
    pub use crate::parsers::{
        parse_data_model, parse_product_overview, parse_product_roadmap, parse_shell_spec,
        parse_spec, validate_sample_data, ArtifactParser,
    };
}
