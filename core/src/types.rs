//! Schema description types.
//!
//! A [`SchemaDescription`] is the author-facing form of a command line: an
//! ordered list of [`FieldDecl`] values, each naming a switch or a positional
//! argument, its [`ValueKind`] and an optional default [`Literal`]. The types
//! round-trip through JSON and YAML so descriptions can live in files.
//!
//! Descriptions are inert data. They become a matching engine only when
//! registered with [`Schema::new`](crate::Schema::new).

use std::fmt;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Value kind of a field.
///
/// The set is closed: every kind has exactly one conversion strategy, chosen
/// when the schema is registered.
///
/// # Examples
///
/// ```
/// use switchline_core::ValueKind;
///
/// let level = ValueKind::symbols(["debug", "info", "error"]);
/// assert_eq!(level.to_string(), "debug|info|error");
/// assert_eq!(ValueKind::Int.to_string(), "int");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Toggle with no value (`-name`).
    Bool,
    /// Base-10 integer.
    Int,
    /// Text passed through unchanged.
    String,
    /// One of a fixed list of symbols; the first symbol is the zero ordinal.
    Enum(Vec<String>),
}

impl ValueKind {
    /// Creates an enumerated kind from a list of symbols.
    pub fn symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueKind::Enum(symbols.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => f.write_str("bool"),
            ValueKind::Int => f.write_str("int"),
            ValueKind::String => f.write_str("string"),
            ValueKind::Enum(symbols) => f.write_str(&symbols.join("|")),
        }
    }
}

/// A default value as written by the schema author.
///
/// For enum fields a [`Literal::Text`] names the default symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(i64::from(value))
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

/// A value bound to a field by a parse.
///
/// Serializes as a plain scalar; symbols serialize as their canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Text(String),
    Symbol { ordinal: usize, name: String },
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text of a string value or the name of a symbol.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            Value::Symbol { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Value::Symbol { ordinal, .. } => Some(*ordinal),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Symbol { name, .. } => f.write_str(name),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Symbol { name, .. } => serializer.serialize_str(name),
        }
    }
}

/// How a field is bound: by name or by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "binding", rename_all = "lowercase")]
pub enum FieldBinding {
    /// Named, order-independent `-name` / `-name:value` element.
    Switch,
    /// Unnamed element bound by 1-based position among leftover tokens.
    Positional { position: usize },
}

/// Declaration of a single field.
///
/// # Examples
///
/// ```
/// use switchline_core::{FieldDecl, ValueKind};
///
/// let repeat = FieldDecl::argument("repeat", 4, ValueKind::Int)
///     .with_default(1)
///     .with_help("How many times to repeat");
/// assert_eq!(repeat.position(), Some(4));
///
/// let silent = FieldDecl::switch("silent", ValueKind::Bool);
/// assert!(silent.is_switch());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Switch name or argument name
    pub name: String,
    #[serde(flatten)]
    pub binding: FieldBinding,
    pub kind: ValueKind,
    /// Value applied when no token matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl FieldDecl {
    /// Declares a switch.
    pub fn switch(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            binding: FieldBinding::Switch,
            kind,
            default: None,
            help: None,
        }
    }

    /// Declares a positional argument at a 1-based position.
    pub fn argument(name: &str, position: usize, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            binding: FieldBinding::Positional { position },
            kind,
            default: None,
            help: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Literal>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn is_switch(&self) -> bool {
        matches!(self.binding, FieldBinding::Switch)
    }

    /// Returns the position of a positional argument.
    pub fn position(&self) -> Option<usize> {
        match self.binding {
            FieldBinding::Switch => None,
            FieldBinding::Positional { position } => Some(position),
        }
    }
}

/// Author-facing description of a command line.
///
/// Field order is declaration order. Switch order never affects binding;
/// positional order is given by each argument's position, not by where it
/// appears in `fields`.
///
/// # Examples
///
/// ```
/// use switchline_core::{SchemaDescription, ValueKind};
///
/// let description = SchemaDescription::new("arc")
///     .with_argument("command", 1, ValueKind::symbols(["help", "publish"]))
///     .with_switch("source", ValueKind::String)
///     .with_switch("silent", ValueKind::Bool);
///
/// assert_eq!(description.switches().count(), 2);
/// assert_eq!(description.arguments().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    /// Command the schema describes (used for lookup and usage text)
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl SchemaDescription {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Appends an already built declaration.
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_switch(self, name: &str, kind: ValueKind) -> Self {
        self.with_field(FieldDecl::switch(name, kind))
    }

    pub fn with_argument(self, name: &str, position: usize, kind: ValueKind) -> Self {
        self.with_field(FieldDecl::argument(name, position, kind))
    }

    pub fn switches(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|field| field.is_switch())
    }

    pub fn arguments(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|field| !field.is_switch())
    }
}
