//! Binder: matches tokens to a registered schema.
//!
//! Binding runs two passes over a working copy of the token list:
//!
//! 1. every switch takes the first remaining token it matches;
//! 2. every positional argument, by ascending position, takes the first
//!    remaining token.
//!
//! Fields that find no token get their default and are reported as
//! unmatched. Tokens left over after both passes are reported as unmatched
//! parameters in their original order. A conversion failure aborts the
//! parse; no [`Parsed`] value exists for a failed line.

use serde::Serialize;

use crate::handler::ConversionError;
use crate::tokenize::split;
use crate::{Schema, Value};

/// Where a bound value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Taken from an input token.
    Input,
    /// No token matched; the field default was applied.
    Default,
}

/// A field's bound value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundField {
    pub name: String,
    pub value: Value,
    pub origin: Origin,
}

/// Values bound by one parse.
///
/// Switches and arguments are separate namespaces: a schema may declare a
/// switch and an argument with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bindings {
    /// Switch values in declaration order.
    pub switches: Vec<BoundField>,
    /// Argument values in position order.
    pub arguments: Vec<BoundField>,
}

impl Bindings {
    pub fn switch(&self, name: &str) -> Option<&Value> {
        find(&self.switches, name)
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        find(&self.arguments, name)
    }
}

fn find<'a>(fields: &'a [BoundField], name: &str) -> Option<&'a Value> {
    fields
        .iter()
        .find(|field| field.name == name)
        .map(|field| &field.value)
}

/// Unmatched tokens and fields from one parse.
///
/// None of these are errors. Callers decide which ones matter, e.g. a
/// required switch showing up in `unmatched_switches`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Tokens consumed by neither pass, in input order.
    pub unmatched_parameters: Vec<String>,
    /// Declared switches that received no token.
    pub unmatched_switches: Vec<String>,
    /// Declared arguments that received no token.
    pub unmatched_arguments: Vec<String>,
}

impl Diagnostics {
    /// Returns `true` when every token was consumed and every field matched.
    pub fn is_clean(&self) -> bool {
        self.unmatched_parameters.is_empty()
            && self.unmatched_switches.is_empty()
            && self.unmatched_arguments.is_empty()
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parsed {
    /// Every token after the program name, as tokenized.
    pub parameters: Vec<String>,
    pub bindings: Bindings,
    pub diagnostics: Diagnostics,
}

pub(crate) fn bind(schema: &Schema, raw: &str) -> Result<Parsed, ConversionError> {
    let parameters = split(raw);
    let mut remaining = parameters.clone();
    let mut bindings = Bindings::default();
    let mut diagnostics = Diagnostics::default();

    for spec in schema.switches() {
        let name = spec.name();
        let (value, origin) = match remaining
            .iter()
            .position(|token| spec.handler.matches(token))
        {
            Some(idx) => {
                let token = remaining.remove(idx);
                (spec.handler.bind(name, token)?, Origin::Input)
            }
            None => {
                diagnostics.unmatched_switches.push(name.to_string());
                (spec.handler.default_value(), Origin::Default)
            }
        };
        bindings.switches.push(BoundField {
            name: name.to_string(),
            value,
            origin,
        });
    }

    let mut leftover = remaining.into_iter();
    for spec in schema.arguments() {
        let name = spec.name();
        let (value, origin) = match leftover.next() {
            Some(token) => (spec.handler.bind(name, token)?, Origin::Input),
            None => {
                diagnostics.unmatched_arguments.push(name.to_string());
                (spec.handler.default_value(), Origin::Default)
            }
        };
        bindings.arguments.push(BoundField {
            name: name.to_string(),
            value,
            origin,
        });
    }

    diagnostics.unmatched_parameters = leftover.map(String::from).collect();

    Ok(Parsed {
        parameters: parameters.into_iter().map(String::from).collect(),
        bindings,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SchemaDescription, ValueKind};

    fn toggles(names: &[&str]) -> Schema {
        let description = names.iter().fold(SchemaDescription::new("exe"), |d, name| {
            d.with_switch(name, ValueKind::Bool)
        });
        Schema::new(description).unwrap()
    }

    #[test]
    fn test_bind_leftover_tokens_keep_order() {
        let schema = toggles(&["opt1", "opt2", "opt5"]);
        let parsed = schema.parse("exe -opt1 -opt4 -opt2 -opt6").unwrap();

        assert_eq!(parsed.diagnostics.unmatched_parameters, ["-opt4", "-opt6"]);
        assert_eq!(parsed.diagnostics.unmatched_switches, ["opt5"]);
        assert_eq!(parsed.bindings.switch("opt1"), Some(&Value::Bool(true)));
        assert_eq!(parsed.bindings.switch("opt5"), Some(&Value::Bool(false)));
        assert_eq!(parsed.parameters, ["-opt1", "-opt4", "-opt2", "-opt6"]);
    }

    #[test]
    fn test_bind_switch_takes_first_match_only() {
        let schema = toggles(&["v"]);
        let parsed = schema.parse("exe -v -V").unwrap();

        assert_eq!(parsed.diagnostics.unmatched_parameters, ["-V"]);
        assert_eq!(parsed.bindings.switches[0].origin, Origin::Input);
    }

    #[test]
    fn test_bind_arguments_take_leftovers_in_order() {
        let schema = Schema::new(
            SchemaDescription::new("exe")
                .with_argument("second", 2, ValueKind::String)
                .with_argument("first", 1, ValueKind::String)
                .with_switch("quiet", ValueKind::Bool),
        )
        .unwrap();

        let parsed = schema.parse("exe a -quiet b c").unwrap();
        assert_eq!(parsed.bindings.argument("first").and_then(Value::as_str), Some("a"));
        assert_eq!(parsed.bindings.argument("second").and_then(Value::as_str), Some("b"));
        assert_eq!(parsed.diagnostics.unmatched_parameters, ["c"]);
        assert!(parsed.diagnostics.unmatched_arguments.is_empty());
    }

    #[test]
    fn test_bind_missing_arguments_default() {
        let schema = Schema::new(
            SchemaDescription::new("exe")
                .with_argument("count", 1, ValueKind::Int)
                .with_argument("label", 2, ValueKind::String),
        )
        .unwrap();

        let parsed = schema.parse("exe").unwrap();
        assert_eq!(parsed.bindings.argument("count"), Some(&Value::Int(-1)));
        assert_eq!(
            parsed.bindings.argument("label"),
            Some(&Value::Text(String::new()))
        );
        assert_eq!(parsed.diagnostics.unmatched_arguments, ["count", "label"]);
        assert!(parsed.bindings.arguments.iter().all(|f| f.origin == Origin::Default));
    }

    #[test]
    fn test_bind_conversion_error_aborts() {
        let schema = Schema::new(
            SchemaDescription::new("exe")
                .with_argument("count", 1, ValueKind::Int)
                .with_switch("silent", ValueKind::Bool),
        )
        .unwrap();

        let err = schema.parse("exe many -silent").unwrap_err();
        assert_eq!(
            err,
            ConversionError::NotAnInteger {
                field: "count".to_string(),
                text: "many".to_string(),
            }
        );
    }

    #[test]
    fn test_bind_positional_may_take_switch_like_token() {
        let schema = Schema::new(
            SchemaDescription::new("exe").with_argument("name", 1, ValueKind::String),
        )
        .unwrap();

        let parsed = schema.parse("exe -unknown").unwrap();
        assert_eq!(
            parsed.bindings.argument("name").and_then(Value::as_str),
            Some("-unknown")
        );
    }

    #[test]
    fn test_diagnostics_is_clean() {
        let schema = toggles(&["a"]);
        assert!(schema.parse("exe -a").unwrap().diagnostics.is_clean());
        assert!(!schema.parse("exe").unwrap().diagnostics.is_clean());
    }
}
