//! Typed binding onto a caller-owned struct.
//!
//! [`CommandLine`] pairs a registered [`Schema`] with one setter per field.
//! A parse starts from `T::default()`, runs the binder, and only when the
//! whole line bound cleanly applies the setters. A failed parse never hands
//! out a half-populated target.
//!
//! # Examples
//!
//! ```
//! use switchline_core::{CommandLine, Field, symbolic};
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq)]
//! enum Level { Debug, #[default] Info, Error }
//! symbolic!(Level { Debug => "debug", Info => "info", Error => "error" });
//!
//! #[derive(Default)]
//! struct Options {
//!     file: String,
//!     level: Level,
//!     silent: bool,
//! }
//!
//! let cli = CommandLine::<Options>::builder()
//!     .argument(1, Field::string("file", |o: &mut Options, v| o.file = v))
//!     .switch(Field::symbol("loglevel", |o: &mut Options, v| o.level = v).default("info"))
//!     .switch(Field::toggle("silent", |o: &mut Options, v| o.silent = v))
//!     .build()
//!     .unwrap();
//!
//! let bound = cli.parse(r#"exe "notes.txt" -LOGLEVEL:error"#).unwrap();
//! assert_eq!(bound.target.file, "notes.txt");
//! assert_eq!(bound.target.level, Level::Error);
//! assert!(!bound.target.silent);
//! assert_eq!(bound.diagnostics.unmatched_switches, ["silent"]);
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::handler::ConversionError;
use crate::{
    ConfigurationError, Diagnostics, FieldBinding, FieldDecl, Literal, Schema, SchemaDescription,
    Value, ValueKind,
};

/// An enum whose variants bind from symbol names.
///
/// `SYMBOLS[i]` names the variant returned by `from_ordinal(i)`; ordinal 0 is
/// the fallback default. Implement it with [`symbolic!`](crate::symbolic).
pub trait Symbolic: Sized {
    const SYMBOLS: &'static [&'static str];

    fn from_ordinal(ordinal: usize) -> Option<Self>;
}

/// Implements [`Symbolic`] for a fieldless enum.
///
/// ```
/// use switchline_core::{Symbolic, symbolic};
///
/// enum Command { Open, Close }
/// symbolic!(Command { Open => "open", Close => "close" });
///
/// assert_eq!(Command::SYMBOLS, ["open", "close"]);
/// assert!(matches!(Command::from_ordinal(1), Some(Command::Close)));
/// assert!(Command::from_ordinal(2).is_none());
/// ```
#[macro_export]
macro_rules! symbolic {
    ($ty:ident { $($variant:ident => $symbol:literal),+ $(,)? }) => {
        impl $crate::Symbolic for $ty {
            const SYMBOLS: &'static [&'static str] = &[$($symbol),+];

            fn from_ordinal(ordinal: usize) -> ::std::option::Option<Self> {
                [$($ty::$variant),+].into_iter().nth(ordinal)
            }
        }
    };
}

type Setter<T> = Box<dyn Fn(&mut T, Value) + Send + Sync>;

/// A field descriptor with a typed setter.
pub struct Field<T> {
    decl: FieldDecl,
    setter: Setter<T>,
}

impl<T> Field<T> {
    fn new(name: &str, kind: ValueKind, setter: Setter<T>) -> Self {
        Self {
            decl: FieldDecl::switch(name, kind),
            setter,
        }
    }

    /// Boolean toggle; switches only.
    pub fn toggle<F>(name: &str, set: F) -> Self
    where
        F: Fn(&mut T, bool) + Send + Sync + 'static,
    {
        Self::new(
            name,
            ValueKind::Bool,
            Box::new(move |target: &mut T, value: Value| {
                if let Value::Bool(value) = value {
                    set(target, value);
                }
            }),
        )
    }

    pub fn int<F>(name: &str, set: F) -> Self
    where
        F: Fn(&mut T, i64) + Send + Sync + 'static,
    {
        Self::new(
            name,
            ValueKind::Int,
            Box::new(move |target: &mut T, value: Value| {
                if let Value::Int(value) = value {
                    set(target, value);
                }
            }),
        )
    }

    pub fn string<F>(name: &str, set: F) -> Self
    where
        F: Fn(&mut T, String) + Send + Sync + 'static,
    {
        Self::new(
            name,
            ValueKind::String,
            Box::new(move |target: &mut T, value: Value| {
                if let Value::Text(value) = value {
                    set(target, value);
                }
            }),
        )
    }

    /// Enumerated field over the symbols of `S`.
    pub fn symbol<S, F>(name: &str, set: F) -> Self
    where
        S: Symbolic,
        F: Fn(&mut T, S) + Send + Sync + 'static,
    {
        Self::new(
            name,
            ValueKind::symbols(S::SYMBOLS.iter().copied()),
            Box::new(move |target: &mut T, value: Value| {
                if let Some(symbol) = value.ordinal().and_then(S::from_ordinal) {
                    set(target, symbol);
                }
            }),
        )
    }

    /// Sets the default; for symbol fields pass the symbol name.
    pub fn default(mut self, value: impl Into<Literal>) -> Self {
        self.decl.default = Some(value.into());
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.decl.help = Some(text.to_string());
        self
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("decl", &self.decl).finish()
    }
}

/// Builder for [`CommandLine`].
pub struct CommandLineBuilder<T> {
    description: SchemaDescription,
    switch_setters: HashMap<String, Setter<T>>,
    argument_setters: HashMap<String, Setter<T>>,
}

impl<T> CommandLineBuilder<T> {
    /// Names the command; used in usage text.
    pub fn command(mut self, name: &str) -> Self {
        self.description.command = name.to_string();
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description.description = Some(text.to_string());
        self
    }

    pub fn switch(mut self, field: Field<T>) -> Self {
        let Field { decl, setter } = field;
        self.switch_setters.insert(decl.name.clone(), setter);
        self.description.fields.push(decl);
        self
    }

    /// Adds a positional argument at a 1-based position.
    pub fn argument(mut self, position: usize, field: Field<T>) -> Self {
        let Field { mut decl, setter } = field;
        decl.binding = FieldBinding::Positional { position };
        self.argument_setters.insert(decl.name.clone(), setter);
        self.description.fields.push(decl);
        self
    }

    /// Registers the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] in the declared fields.
    pub fn build(self) -> Result<CommandLine<T>, ConfigurationError> {
        let schema = Schema::new(self.description)?;
        Ok(CommandLine {
            schema,
            switch_setters: self.switch_setters,
            argument_setters: self.argument_setters,
        })
    }
}

/// A bound target plus the parse diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound<T> {
    pub target: T,
    pub diagnostics: Diagnostics,
}

/// A registered schema that binds onto values of `T`.
///
/// Reusable and shareable across threads; each parse owns its own target.
pub struct CommandLine<T> {
    schema: Schema,
    switch_setters: HashMap<String, Setter<T>>,
    argument_setters: HashMap<String, Setter<T>>,
}

impl<T> CommandLine<T> {
    pub fn builder() -> CommandLineBuilder<T> {
        CommandLineBuilder {
            description: SchemaDescription::new(""),
            switch_setters: HashMap::new(),
            argument_setters: HashMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl<T: Default> CommandLine<T> {
    /// Parses a raw command line (program name first) into a new `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when a recognized field receives text it
    /// cannot hold.
    pub fn parse(&self, raw: &str) -> Result<Bound<T>, ConversionError> {
        let parsed = self.schema.parse(raw)?;
        let mut target = T::default();

        for field in parsed.bindings.switches {
            if let Some(set) = self.switch_setters.get(&field.name) {
                set(&mut target, field.value);
            }
        }
        for field in parsed.bindings.arguments {
            if let Some(set) = self.argument_setters.get(&field.name) {
                set(&mut target, field.value);
            }
        }

        Ok(Bound {
            target,
            diagnostics: parsed.diagnostics,
        })
    }

    /// Parses an already split argument vector (program name first).
    pub fn parse_args<I, S>(&self, args: I) -> Result<Bound<T>, ConversionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(&crate::join_args(args))
    }
}

impl<T> fmt::Debug for CommandLine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
