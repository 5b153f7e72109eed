//! Field handlers.
//!
//! Each registered field gets one handler, picked by its [`ValueKind`] when
//! the schema is built. Switch handlers know how to recognize their token and
//! pull the value out of it; argument handlers bind whatever token comes next.
//! Both share a [`Converter`] that turns captured text into a [`Value`] and
//! supplies the default when no token matched.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::validate::{find_symbol, resolve_default};
use crate::{ConfigurationError, FieldDecl, Literal, Value, ValueKind};

/// Captures a positional value: a whole quoted token or a whole bare token.
static POSITIONAL_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"(.*)"|([^"\s]+))$"#).expect("static regex must compile")
});

/// A recognized field received text it cannot hold.
///
/// Aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid value for '{field}': {text} is not an integer")]
    NotAnInteger { field: String, text: String },
    #[error("invalid value for '{field}': {text} (expected one of {expected})")]
    UnknownSymbol {
        field: String,
        text: String,
        expected: String,
    },
}

impl ConversionError {
    /// Name of the field that rejected the text.
    pub fn field(&self) -> &str {
        match self {
            ConversionError::NotAnInteger { field, .. }
            | ConversionError::UnknownSymbol { field, .. } => field,
        }
    }

    /// The offending text, as captured from the token.
    pub fn text(&self) -> &str {
        match self {
            ConversionError::NotAnInteger { text, .. }
            | ConversionError::UnknownSymbol { text, .. } => text,
        }
    }
}

/// Per-kind conversion and defaulting for value-bearing fields.
#[derive(Debug, Clone)]
pub(crate) enum Converter {
    Int { default: i64 },
    Text { default: String },
    Symbol { symbols: Vec<String>, default: usize },
}

impl Converter {
    /// Builds the converter for a value-bearing field; toggles have none.
    fn for_field(field: &FieldDecl, default: Option<Literal>) -> Option<Self> {
        let converter = match &field.kind {
            ValueKind::Bool => return None,
            ValueKind::Int => Converter::Int {
                default: match default {
                    Some(Literal::Int(value)) => value,
                    _ => -1,
                },
            },
            ValueKind::Enum(symbols) => Converter::Symbol {
                symbols: symbols.clone(),
                default: match default {
                    Some(Literal::Text(symbol)) => find_symbol(symbols, &symbol).unwrap_or(0),
                    _ => 0,
                },
            },
            ValueKind::String => Converter::Text {
                default: default.map(|literal| literal.to_string()).unwrap_or_default(),
            },
        };
        Some(converter)
    }

    fn convert(&self, field: &str, text: &str) -> Result<Value, ConversionError> {
        match self {
            Converter::Int { .. } => text
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ConversionError::NotAnInteger {
                    field: field.to_string(),
                    text: text.to_string(),
                }),
            Converter::Text { .. } => Ok(Value::Text(text.to_string())),
            Converter::Symbol { symbols, .. } => match find_symbol(symbols, text) {
                Some(ordinal) => Ok(symbol_value(symbols, ordinal)),
                None => Err(ConversionError::UnknownSymbol {
                    field: field.to_string(),
                    text: text.to_string(),
                    expected: symbols.join(", "),
                }),
            },
        }
    }

    fn default_value(&self) -> Value {
        match self {
            Converter::Int { default } => Value::Int(*default),
            Converter::Text { default } => Value::Text(default.clone()),
            Converter::Symbol { symbols, default } => symbol_value(symbols, *default),
        }
    }
}

fn symbol_value(symbols: &[String], ordinal: usize) -> Value {
    Value::Symbol {
        ordinal,
        name: symbols[ordinal].clone(),
    }
}

/// Toggle switch: `-name`, case-insensitive.
#[derive(Debug, Clone)]
pub(crate) struct ToggleSwitch {
    pattern: Regex,
    default: bool,
}

/// Value-bearing switch: `-name:value` or `-name:"quoted value"`.
#[derive(Debug, Clone)]
pub(crate) struct ValueSwitch {
    pattern: Regex,
    converter: Converter,
}

#[derive(Debug, Clone)]
pub(crate) enum SwitchHandler {
    Toggle(ToggleSwitch),
    Value(ValueSwitch),
}

impl SwitchHandler {
    pub(crate) fn new(field: &FieldDecl) -> Result<Self, ConfigurationError> {
        let default = resolve_default(field)?;
        let name = regex::escape(&field.name);

        match Converter::for_field(field, default.clone()) {
            Some(converter) => Ok(SwitchHandler::Value(ValueSwitch {
                pattern: compile(&field.name, &format!(r#"^-{name}:(?:"(.+)"|([^"\s]+))"#))?,
                converter,
            })),
            None => Ok(SwitchHandler::Toggle(ToggleSwitch {
                pattern: compile(&field.name, &format!("^-{name}$"))?,
                default: matches!(default, Some(Literal::Bool(true))),
            })),
        }
    }

    pub(crate) fn matches(&self, token: &str) -> bool {
        match self {
            SwitchHandler::Toggle(toggle) => toggle.pattern.is_match(token),
            SwitchHandler::Value(switch) => switch.pattern.is_match(token),
        }
    }

    /// Binds a token previously accepted by [`matches`](Self::matches).
    pub(crate) fn bind(&self, field: &str, token: &str) -> Result<Value, ConversionError> {
        match self {
            SwitchHandler::Toggle(_) => Ok(Value::Bool(true)),
            SwitchHandler::Value(switch) => {
                let text = switch
                    .pattern
                    .captures(token)
                    .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
                    .map_or("", |m| m.as_str());
                switch.converter.convert(field, text)
            }
        }
    }

    pub(crate) fn default_value(&self) -> Value {
        match self {
            SwitchHandler::Toggle(toggle) => Value::Bool(toggle.default),
            SwitchHandler::Value(switch) => switch.converter.default_value(),
        }
    }

    /// Placeholder shown in usage text, e.g. `<int>`.
    pub(crate) fn placeholder(&self) -> Option<String> {
        match self {
            SwitchHandler::Toggle(_) => None,
            SwitchHandler::Value(switch) => Some(placeholder(&switch.converter)),
        }
    }
}

/// Positional argument handler; there is no boolean strategy.
#[derive(Debug, Clone)]
pub(crate) struct ArgumentHandler {
    converter: Converter,
}

impl ArgumentHandler {
    pub(crate) fn new(field: &FieldDecl) -> Result<Self, ConfigurationError> {
        let default = resolve_default(field)?;
        let converter = Converter::for_field(field, default).ok_or_else(|| {
            ConfigurationError::UnsupportedKind {
                name: field.name.clone(),
                kind: field.kind.to_string(),
                binding: "argument",
            }
        })?;
        Ok(Self { converter })
    }

    pub(crate) fn bind(&self, field: &str, token: &str) -> Result<Value, ConversionError> {
        self.converter.convert(field, capture_positional(token))
    }

    pub(crate) fn default_value(&self) -> Value {
        self.converter.default_value()
    }

    pub(crate) fn placeholder(&self) -> String {
        placeholder(&self.converter)
    }
}

/// Extracts the value text from a positional token.
///
/// Quoted tokens bind their inner text; tokens fitting neither form (an
/// unterminated quote, or a quote partway through) bind verbatim.
fn capture_positional(token: &str) -> &str {
    POSITIONAL_VALUE
        .captures(token)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map_or(token, |m| m.as_str())
}

fn placeholder(converter: &Converter) -> String {
    match converter {
        Converter::Int { .. } => "<int>".to_string(),
        Converter::Text { .. } => "<string>".to_string(),
        Converter::Symbol { symbols, .. } => format!("<{}>", symbols.join("|")),
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigurationError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| ConfigurationError::Pattern {
            name: name.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(field: FieldDecl) -> SwitchHandler {
        SwitchHandler::new(&field).unwrap()
    }

    #[test]
    fn test_toggle_matches_case_insensitively() {
        let handler = switch(FieldDecl::switch("Silent", ValueKind::Bool));
        assert!(handler.matches("-silent"));
        assert!(handler.matches("-SILENT"));
        assert!(!handler.matches("-silently"));
        assert!(!handler.matches("silent"));
        assert!(!handler.matches("-silent:true"));
        assert_eq!(handler.bind("Silent", "-SILENT"), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_toggle_default() {
        let plain = switch(FieldDecl::switch("silent", ValueKind::Bool));
        assert_eq!(plain.default_value(), Value::Bool(false));

        let on = switch(FieldDecl::switch("overwrite", ValueKind::Bool).with_default(true));
        assert_eq!(on.default_value(), Value::Bool(true));
    }

    #[test]
    fn test_value_switch_quoted_and_bare() {
        let handler = switch(FieldDecl::switch("opt4", ValueKind::String));

        assert!(handler.matches(r#"-OPT4:"c:\temp 1\sub folder""#));
        assert_eq!(
            handler.bind("opt4", r#"-opt4:"c:\temp 1\sub folder""#),
            Ok(Value::Text(r"c:\temp 1\sub folder".to_string()))
        );
        assert_eq!(
            handler.bind("opt4", "-opt4:plain"),
            Ok(Value::Text("plain".to_string()))
        );
    }

    #[test]
    fn test_value_switch_requires_a_value() {
        let handler = switch(FieldDecl::switch("opt", ValueKind::String));
        assert!(!handler.matches("-opt"));
        assert!(!handler.matches("-opt:"));
        assert!(!handler.matches(r#"-opt:"""#));
        assert!(!handler.matches("-option:x"));
    }

    #[test]
    fn test_value_switch_name_is_escaped() {
        let handler = switch(FieldDecl::switch("a.b", ValueKind::String));
        assert!(handler.matches("-a.b:x"));
        assert!(!handler.matches("-axb:x"));
    }

    #[test]
    fn test_int_switch_conversion() {
        let handler = switch(FieldDecl::switch("buffer", ValueKind::Int));
        assert_eq!(handler.bind("buffer", "-buffer:1024"), Ok(Value::Int(1024)));
        assert_eq!(handler.bind("buffer", "-buffer:-7"), Ok(Value::Int(-7)));
        assert_eq!(
            handler.bind("buffer", "-buffer:lots"),
            Err(ConversionError::NotAnInteger {
                field: "buffer".to_string(),
                text: "lots".to_string(),
            })
        );
        assert_eq!(handler.default_value(), Value::Int(-1));
    }

    #[test]
    fn test_enum_switch_conversion() {
        let handler = switch(
            FieldDecl::switch("loglevel", ValueKind::symbols(["debug", "info", "error"]))
                .with_default("info"),
        );

        let error = Value::Symbol {
            ordinal: 2,
            name: "error".to_string(),
        };
        assert_eq!(handler.bind("loglevel", "-loglevel:ERROR"), Ok(error.clone()));
        assert_eq!(handler.bind("loglevel", r#"-loglevel:"error""#), Ok(error));

        let err = handler.bind("loglevel", "-loglevel:loud").unwrap_err();
        assert_eq!(err.field(), "loglevel");
        assert_eq!(err.text(), "loud");
        assert_eq!(
            err.to_string(),
            "invalid value for 'loglevel': loud (expected one of debug, info, error)"
        );

        assert_eq!(handler.default_value().as_str(), Some("info"));
    }

    #[test]
    fn test_argument_capture() {
        let handler = ArgumentHandler::new(&FieldDecl::argument(
            "file",
            1,
            ValueKind::String,
        ))
        .unwrap();

        assert_eq!(
            handler.bind("file", r#""database.xml""#),
            Ok(Value::Text("database.xml".to_string()))
        );
        assert_eq!(handler.bind("file", r#""""#), Ok(Value::Text(String::new())));
        assert_eq!(
            handler.bind("file", r#""open ended"#),
            Ok(Value::Text(r#""open ended"#.to_string()))
        );
        assert_eq!(handler.default_value(), Value::Text(String::new()));
    }

    #[test]
    fn test_argument_keeps_partly_quoted_tokens_whole() {
        let handler =
            ArgumentHandler::new(&FieldDecl::argument("name", 1, ValueKind::String)).unwrap();

        assert_eq!(
            handler.bind("name", r#"name="x y""#),
            Ok(Value::Text(r#"name="x y""#.to_string()))
        );
        assert_eq!(
            handler.bind("name", r#"-x:"""#),
            Ok(Value::Text(r#"-x:"""#.to_string()))
        );
        assert_eq!(
            handler.bind("name", r#""a"b"#),
            Ok(Value::Text(r#""a"b"#.to_string()))
        );
    }

    #[test]
    fn test_argument_rejects_boolean_kind() {
        let err = ArgumentHandler::new(&FieldDecl::argument("flag", 1, ValueKind::Bool))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnsupportedKind { .. }));
    }

    #[test]
    fn test_placeholders() {
        let handler = switch(FieldDecl::switch("mode", ValueKind::symbols(["a", "b"])));
        assert_eq!(handler.placeholder().as_deref(), Some("<a|b>"));
        let toggle = switch(FieldDecl::switch("quiet", ValueKind::Bool));
        assert_eq!(toggle.placeholder(), None);
    }
}
