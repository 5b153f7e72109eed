//! Schema registry.
//!
//! [`Schema::new`] validates a [`SchemaDescription`] and compiles every field
//! into its handler: switches keep declaration order behind a case-sensitive
//! name index, arguments are sorted by ascending position. A registered
//! schema is immutable and can serve any number of parses, from any thread.

use std::collections::HashMap;

use crate::bind::{self, Parsed};
use crate::handler::{ArgumentHandler, ConversionError, SwitchHandler};
use crate::tokenize::join_args;
use crate::validate::validate_description;
use crate::{ConfigurationError, FieldDecl, SchemaDescription};

/// A registered switch.
#[derive(Debug, Clone)]
pub struct SwitchSpec {
    pub(crate) decl: FieldDecl,
    pub(crate) handler: SwitchHandler,
}

impl SwitchSpec {
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn decl(&self) -> &FieldDecl {
        &self.decl
    }
}

/// A registered positional argument.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub(crate) decl: FieldDecl,
    pub(crate) position: usize,
    pub(crate) handler: ArgumentHandler,
}

impl ArgumentSpec {
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// 1-based position.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn decl(&self) -> &FieldDecl {
        &self.decl
    }
}

/// Registered, ready-to-parse schema.
///
/// # Examples
///
/// ```
/// use switchline_core::*;
///
/// let schema = Schema::new(
///     SchemaDescription::new("exe")
///         .with_argument("file", 1, ValueKind::String)
///         .with_switch("buffer", ValueKind::Int)
///         .with_switch("silent", ValueKind::Bool),
/// )
/// .unwrap();
///
/// let parsed = schema.parse(r#"exe "my file.txt" -buffer:512 extra"#).unwrap();
/// assert_eq!(parsed.bindings.argument("file").and_then(Value::as_str), Some("my file.txt"));
/// assert_eq!(parsed.bindings.switch("buffer").and_then(Value::as_int), Some(512));
/// assert_eq!(parsed.bindings.switch("silent").and_then(Value::as_bool), Some(false));
/// assert_eq!(parsed.diagnostics.unmatched_parameters, ["extra"]);
/// assert_eq!(parsed.diagnostics.unmatched_switches, ["silent"]);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    command: String,
    description: Option<String>,
    switches: Vec<SwitchSpec>,
    switch_index: HashMap<String, usize>,
    arguments: Vec<ArgumentSpec>,
}

impl Schema {
    /// Registers a schema description.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found: a duplicate switch
    /// name, a duplicate position, an unsupported kind, or a bad default.
    pub fn new(description: SchemaDescription) -> Result<Self, ConfigurationError> {
        if let Some(err) = validate_description(&description).into_iter().next() {
            return Err(err);
        }

        let SchemaDescription {
            command,
            description,
            fields,
        } = description;

        let mut switches = Vec::new();
        let mut switch_index = HashMap::new();
        let mut arguments = Vec::new();

        for decl in fields {
            match decl.position() {
                None => {
                    let handler = SwitchHandler::new(&decl)?;
                    switch_index.insert(decl.name.clone(), switches.len());
                    switches.push(SwitchSpec { decl, handler });
                }
                Some(position) => {
                    let handler = ArgumentHandler::new(&decl)?;
                    arguments.push(ArgumentSpec {
                        decl,
                        position,
                        handler,
                    });
                }
            }
        }

        arguments.sort_by_key(|argument| argument.position);

        Ok(Self {
            command,
            description,
            switches,
            switch_index,
            arguments,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Switches in declaration order.
    pub fn switches(&self) -> &[SwitchSpec] {
        &self.switches
    }

    /// Arguments in ascending position order.
    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    /// Looks up a switch by its exact (case-sensitive) name.
    pub fn find_switch(&self, name: &str) -> Option<&SwitchSpec> {
        self.switch_index.get(name).map(|&idx| &self.switches[idx])
    }

    pub fn find_argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|argument| argument.name() == name)
    }

    /// Binds a raw command line (program name first).
    ///
    /// Unrecognized tokens and absent fields are reported in
    /// [`Diagnostics`](crate::Diagnostics), never as errors.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when a recognized field receives text it
    /// cannot hold. Nothing is bound in that case.
    pub fn parse(&self, raw: &str) -> Result<Parsed, ConversionError> {
        bind::bind(self, raw)
    }

    /// Binds an already split argument vector (program name first), such as
    /// [`std::env::args`].
    ///
    /// The vector is rejoined with [`join_args`], so an element that carries
    /// its own `"` characters is split again by those quotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchline_core::*;
    ///
    /// let schema = Schema::new(
    ///     SchemaDescription::new("exe").with_switch("target", ValueKind::String),
    /// )
    /// .unwrap();
    ///
    /// let parsed = schema.parse_args(["exe", "-target:c:\\my files", "extra"]).unwrap();
    /// assert_eq!(parsed.bindings.switch("target").and_then(Value::as_str), Some("c:\\my files"));
    /// assert_eq!(parsed.diagnostics.unmatched_parameters, ["extra"]);
    /// ```
    pub fn parse_args<I, S>(&self, args: I) -> Result<Parsed, ConversionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(&join_args(args))
    }
}
