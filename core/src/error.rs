//! Unified error type for one-shot parsing.

use thiserror::Error;

use crate::{ConfigurationError, ConversionError, Parsed, Schema, SchemaDescription};

/// Either a schema-author mistake or unconvertible input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Registers `description` and parses `raw` against it in one call.
///
/// Prefer [`Schema::new`] plus [`Schema::parse`] when the same schema binds
/// more than one line.
///
/// # Examples
///
/// ```
/// use switchline_core::*;
///
/// let description = SchemaDescription::new("exe").with_switch("buffer", ValueKind::Int);
///
/// let parsed = parse_with(description.clone(), "exe -buffer:64").unwrap();
/// assert_eq!(parsed.bindings.switch("buffer"), Some(&Value::Int(64)));
///
/// let err = parse_with(description, "exe -buffer:big").unwrap_err();
/// assert!(matches!(err, Error::Conversion(_)));
/// assert_eq!(err.to_string(), "invalid value for 'buffer': big is not an integer");
/// ```
pub fn parse_with(description: SchemaDescription, raw: &str) -> Result<Parsed, Error> {
    let schema = Schema::new(description)?;
    Ok(schema.parse(raw)?)
}
