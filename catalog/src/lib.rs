//! Schema catalogs loaded from description files.
//!
//! A catalog maps command names to registered [`Schema`]s. Descriptions are
//! read from `*.json`, `*.yaml` or `*.yml` files and registered through
//! [`Schema::new`], so every configuration error surfaces at load time.
//!
//! # Quick start
//!
//! ```no_run
//! use switchline_catalog::SchemaCatalog;
//!
//! // Load every description in a directory
//! let catalog = SchemaCatalog::from_dir("schemas/").unwrap();
//! if let Some(schema) = catalog.get("arc") {
//!     let parsed = schema.parse("arc get -tf:terraform").unwrap();
//!     println!("{:?}", parsed.bindings);
//! }
//!
//! // Use the builder for fallback chains
//! let catalog = SchemaCatalog::builder()
//!     .from_dir("/etc/switchline/")
//!     .from_file("schemas/arc.yaml")
//!     .build()
//!     .unwrap();
//! ```
//!
//! [`Schema`]: switchline_core::Schema
//! [`Schema::new`]: switchline_core::Schema::new

mod error;
mod loader;

pub use error::{CatalogError, Result};
pub use loader::{CatalogBuilder, CatalogSource, SchemaCatalog, is_schema_file, load_description};
