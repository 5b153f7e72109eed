//! Schema description validation.
//!
//! Catches schema-author mistakes before any command line is parsed:
//! duplicate switch names (including names differing only in case),
//! duplicate positions, names the switch grammar can never match, kinds with
//! no strategy for their binding, and defaults that do not fit their kind.
//!
//! # Examples
//!
//! ```
//! use switchline_core::*;
//!
//! let description = SchemaDescription::new("exe")
//!     .with_switch("silent", ValueKind::Bool)
//!     .with_argument("file", 1, ValueKind::String);
//! assert!(validate_description(&description).is_empty());
//!
//! // Two switches with the same name
//! let bad = SchemaDescription::new("exe")
//!     .with_switch("silent", ValueKind::Bool)
//!     .with_switch("silent", ValueKind::Int);
//! assert_eq!(
//!     validate_description(&bad),
//!     vec![ConfigurationError::DuplicateSwitch("silent".to_string())]
//! );
//! ```

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{FieldDecl, FieldBinding, Literal, SchemaDescription, ValueKind};

/// Schema registration errors.
///
/// These are raised when a schema is registered, never while parsing input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Two switches share a name (names are case-sensitive).
    #[error("duplicate switch: {0}")]
    DuplicateSwitch(String),
    /// Two switch names differ only in case; matching could not tell them apart.
    #[error("ambiguous switches: '{first}' and '{second}' differ only in case")]
    AmbiguousSwitch { first: String, second: String },
    /// Two positional arguments share a position.
    #[error("duplicate position {position}: '{first}' and '{second}'")]
    DuplicatePosition {
        position: usize,
        first: String,
        second: String,
    },
    /// Two positional arguments share a name.
    #[error("duplicate argument: {0}")]
    DuplicateArgument(String),
    /// Positions are 1-based.
    #[error("invalid position 0 for argument '{name}'")]
    InvalidPosition { name: String },
    /// Name is empty or contains whitespace, `"` or `:`.
    #[error("invalid field name: '{0}'")]
    InvalidName(String),
    /// No strategy exists for this kind under this binding.
    #[error("unsupported kind {kind} for {binding} '{name}'")]
    UnsupportedKind {
        name: String,
        kind: String,
        binding: &'static str,
    },
    /// An enum field declares no symbols.
    #[error("enum field '{0}' declares no symbols")]
    EmptySymbols(String),
    /// The default literal cannot be used for the field's kind.
    #[error("default for '{name}' must be {expected}")]
    DefaultMismatch { name: String, expected: String },
    /// An enum default names no declared symbol.
    #[error("default for '{name}' names unknown symbol '{symbol}'")]
    UnknownDefaultSymbol { name: String, symbol: String },
    /// A match pattern could not be compiled for the field.
    #[error("cannot build matcher for '{name}': {reason}")]
    Pattern { name: String, reason: String },
}

/// Validates a schema description.
///
/// Returns every problem found, in declaration order. An empty vector means
/// the description can be registered.
pub fn validate_description(description: &SchemaDescription) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();
    let mut switch_names: HashSet<&str> = HashSet::new();
    let mut folded_switches: HashMap<String, &str> = HashMap::new();
    let mut argument_names: HashSet<&str> = HashSet::new();
    let mut positions: HashMap<usize, &str> = HashMap::new();

    for field in &description.fields {
        if !is_valid_name(&field.name) {
            errors.push(ConfigurationError::InvalidName(field.name.clone()));
            continue;
        }

        match field.binding {
            FieldBinding::Switch => {
                if !switch_names.insert(&field.name) {
                    errors.push(ConfigurationError::DuplicateSwitch(field.name.clone()));
                } else if let Some(first) =
                    folded_switches.insert(field.name.to_lowercase(), &field.name)
                {
                    errors.push(ConfigurationError::AmbiguousSwitch {
                        first: first.to_string(),
                        second: field.name.clone(),
                    });
                }
            }
            FieldBinding::Positional { position } => {
                if position == 0 {
                    errors.push(ConfigurationError::InvalidPosition {
                        name: field.name.clone(),
                    });
                } else if let Some(first) = positions.insert(position, &field.name) {
                    errors.push(ConfigurationError::DuplicatePosition {
                        position,
                        first: first.to_string(),
                        second: field.name.clone(),
                    });
                }
                if !argument_names.insert(&field.name) {
                    errors.push(ConfigurationError::DuplicateArgument(field.name.clone()));
                }
                if field.kind == ValueKind::Bool {
                    errors.push(ConfigurationError::UnsupportedKind {
                        name: field.name.clone(),
                        kind: field.kind.to_string(),
                        binding: "argument",
                    });
                }
            }
        }

        if let Err(err) = resolve_default(field) {
            errors.push(err);
        }
    }

    errors
}

/// Returns `true` if the switch grammar can match `-name`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == ':')
}

/// Checks a field's default against its kind.
///
/// Enum defaults are resolved to the canonical symbol spelling; string fields
/// accept any literal and keep its text form.
pub(crate) fn resolve_default(field: &FieldDecl) -> Result<Option<Literal>, ConfigurationError> {
    let mismatch = |expected: &str| ConfigurationError::DefaultMismatch {
        name: field.name.clone(),
        expected: expected.to_string(),
    };

    match (&field.kind, &field.default) {
        (ValueKind::Enum(symbols), _) if symbols.is_empty() => {
            Err(ConfigurationError::EmptySymbols(field.name.clone()))
        }
        (_, None) => Ok(None),
        (ValueKind::Bool, Some(Literal::Bool(_))) | (ValueKind::Int, Some(Literal::Int(_))) => {
            Ok(field.default.clone())
        }
        (ValueKind::Bool, Some(_)) => Err(mismatch("a boolean")),
        (ValueKind::Int, Some(_)) => Err(mismatch("an integer")),
        (ValueKind::String, Some(literal)) => Ok(Some(Literal::Text(literal.to_string()))),
        (ValueKind::Enum(symbols), Some(Literal::Text(symbol))) => {
            match find_symbol(symbols, symbol) {
                Some(ordinal) => Ok(Some(Literal::Text(symbols[ordinal].clone()))),
                None => Err(ConfigurationError::UnknownDefaultSymbol {
                    name: field.name.clone(),
                    symbol: symbol.clone(),
                }),
            }
        }
        (ValueKind::Enum(_), Some(_)) => Err(mismatch("a symbol name")),
    }
}

/// Case-insensitive symbol lookup; returns the ordinal of the first match.
pub(crate) fn find_symbol(symbols: &[String], text: &str) -> Option<usize> {
    let wanted = text.trim().to_lowercase();
    symbols
        .iter()
        .position(|symbol| symbol.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_duplicate_position() {
        let description = SchemaDescription::new("exe")
            .with_argument("first", 1, ValueKind::String)
            .with_argument("second", 1, ValueKind::Int);

        assert_eq!(
            validate_description(&description),
            vec![ConfigurationError::DuplicatePosition {
                position: 1,
                first: "first".to_string(),
                second: "second".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_rejects_switches_differing_only_in_case() {
        let description = SchemaDescription::new("exe")
            .with_switch("opt", ValueKind::Bool)
            .with_switch("OPT", ValueKind::Bool);

        assert_eq!(
            validate_description(&description),
            vec![ConfigurationError::AmbiguousSwitch {
                first: "opt".to_string(),
                second: "OPT".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_exact_duplicate_is_not_also_ambiguous() {
        let description = SchemaDescription::new("exe")
            .with_switch("Opt", ValueKind::Bool)
            .with_switch("Opt", ValueKind::Bool)
            .with_switch("oPT", ValueKind::Int);

        assert_eq!(
            validate_description(&description),
            vec![
                ConfigurationError::DuplicateSwitch("Opt".to_string()),
                ConfigurationError::AmbiguousSwitch {
                    first: "Opt".to_string(),
                    second: "oPT".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_validate_allows_same_name_in_both_namespaces() {
        let description = SchemaDescription::new("arc")
            .with_argument("command", 1, ValueKind::symbols(["help", "publish"]))
            .with_switch("command", ValueKind::symbols(["help", "publish"]));

        assert!(validate_description(&description).is_empty());
    }

    #[test]
    fn test_validate_rejects_boolean_positional() {
        let description =
            SchemaDescription::new("exe").with_argument("flag", 1, ValueKind::Bool);

        assert_eq!(
            validate_description(&description),
            vec![ConfigurationError::UnsupportedKind {
                name: "flag".to_string(),
                kind: "bool".to_string(),
                binding: "argument",
            }]
        );
    }

    #[test]
    fn test_validate_rejects_unmatchable_names() {
        let description = SchemaDescription::new("exe")
            .with_switch("", ValueKind::Bool)
            .with_switch("log level", ValueKind::Int)
            .with_switch("a:b", ValueKind::String);

        assert_eq!(validate_description(&description).len(), 3);
    }

    #[test]
    fn test_validate_rejects_position_zero() {
        let description =
            SchemaDescription::new("exe").with_argument("file", 0, ValueKind::String);

        assert_eq!(
            validate_description(&description),
            vec![ConfigurationError::InvalidPosition {
                name: "file".to_string()
            }]
        );
    }

    #[test]
    fn test_resolve_default_canonicalizes_symbol() {
        let field = FieldDecl::switch("loglevel", ValueKind::symbols(["debug", "Info"]))
            .with_default("INFO");

        assert_eq!(resolve_default(&field), Ok(Some(Literal::from("Info"))));
    }

    #[test]
    fn test_resolve_default_rejects_unknown_symbol() {
        let field =
            FieldDecl::switch("loglevel", ValueKind::symbols(["debug"])).with_default("trace");

        assert_eq!(
            resolve_default(&field),
            Err(ConfigurationError::UnknownDefaultSymbol {
                name: "loglevel".to_string(),
                symbol: "trace".to_string(),
            })
        );
    }

    #[test]
    fn test_resolve_default_kind_mismatch() {
        let field = FieldDecl::switch("buffer", ValueKind::Int).with_default("big");
        assert!(matches!(
            resolve_default(&field),
            Err(ConfigurationError::DefaultMismatch { .. })
        ));

        let field = FieldDecl::switch("drive", ValueKind::String).with_default(27);
        assert_eq!(resolve_default(&field), Ok(Some(Literal::from("27"))));
    }

    #[test]
    fn test_resolve_default_rejects_empty_symbols() {
        let field = FieldDecl::switch("level", ValueKind::Enum(Vec::new()));
        assert_eq!(
            resolve_default(&field),
            Err(ConfigurationError::EmptySymbols("level".to_string()))
        );
    }
}
