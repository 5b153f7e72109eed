//! Schema-driven command-line binding.
//!
//! This crate binds a raw command line to a declared set of fields:
//!
//! - [`split`]: tokenizes a raw line, keeping double-quoted spans together
//!   and dropping the program name.
//! - [`SchemaDescription`] / [`FieldDecl`]: the author-facing declaration of
//!   switches (`-name`, `-name:value`) and positional arguments.
//! - [`Schema`]: the registered form: validated, with one compiled handler
//!   per field. [`Schema::parse`] runs the binder and returns a [`Parsed`]
//!   value holding [`Bindings`] and [`Diagnostics`].
//! - [`CommandLine`]: binds onto a caller-owned struct through typed setters.
//!
//! Switches match by name, case-insensitively and in any order. Positional
//! arguments take whatever tokens the switches left, strictly by position.
//! Absent fields fall back to their declared default (or `false`, `-1`, `""`,
//! or the first symbol) and are listed as unmatched; leftover tokens are
//! listed as unmatched parameters. Only unconvertible text on a recognized
//! field is an error.
//!
//! The crate performs no I/O and no logging.
//!
//! # Example
//!
//! ```
//! use switchline_core::*;
//!
//! let schema = Schema::new(
//!     SchemaDescription::new("exe")
//!         .with_argument("command", 1, ValueKind::symbols(["open", "close", "read", "write"]))
//!         .with_field(FieldDecl::argument("repeat", 2, ValueKind::Int).with_default(1))
//!         .with_switch("silent", ValueKind::Bool)
//!         .with_field(
//!             FieldDecl::switch("loglevel", ValueKind::symbols(["debug", "info", "error"]))
//!                 .with_default("info"),
//!         ),
//! )
//! .unwrap();
//!
//! let parsed = schema.parse("exe close -silent -loglevel:ERROR").unwrap();
//! assert_eq!(parsed.bindings.argument("command").and_then(Value::as_str), Some("close"));
//! assert_eq!(parsed.bindings.argument("repeat"), Some(&Value::Int(1)));
//! assert_eq!(parsed.bindings.switch("loglevel").and_then(Value::as_str), Some("error"));
//! assert_eq!(parsed.diagnostics.unmatched_arguments, ["repeat"]);
//! assert!(parsed.diagnostics.unmatched_parameters.is_empty());
//! ```

mod bind;
mod error;
mod handler;
mod help;
mod schema;
mod tokenize;
mod typed;
mod types;
mod validate;

pub use bind::{BoundField, Bindings, Diagnostics, Origin, Parsed};
pub use error::{Error, parse_with};
pub use handler::ConversionError;
pub use schema::{ArgumentSpec, Schema, SwitchSpec};
pub use tokenize::{join_args, split};
pub use typed::{Bound, CommandLine, CommandLineBuilder, Field, Symbolic};
pub use types::*;
pub use validate::{ConfigurationError, validate_description};
