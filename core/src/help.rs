//! Usage text built from a registered schema.

use crate::Schema;

impl Schema {
    /// Renders a plain-text usage block.
    ///
    /// The synopsis lists arguments by position, then switches in
    /// declaration order. Field help text and non-empty defaults follow in
    /// `Arguments:` and `Switches:` sections.
    ///
    /// # Examples
    ///
    /// ```
    /// use switchline_core::*;
    ///
    /// let schema = Schema::new(
    ///     SchemaDescription::new("arc")
    ///         .with_field(FieldDecl::argument("command", 1, ValueKind::symbols(["help", "get"])))
    ///         .with_field(
    ///             FieldDecl::switch("tf", ValueKind::String)
    ///                 .with_default("tf")
    ///                 .with_help("Path to the tf command"),
    ///         ),
    /// )
    /// .unwrap();
    ///
    /// let usage = schema.usage();
    /// assert!(usage.starts_with("Usage: arc <command> [-tf:<string>]\n"));
    /// assert!(usage.contains("Path to the tf command (default: tf)"));
    /// ```
    pub fn usage(&self) -> String {
        let mut out = String::new();

        let mut synopsis = vec![self.command().to_string()];
        synopsis.extend(self.arguments().iter().map(|arg| format!("<{}>", arg.name())));
        synopsis.extend(self.switches().iter().map(|spec| match spec.handler.placeholder() {
            Some(placeholder) => format!("[-{}:{placeholder}]", spec.name()),
            None => format!("[-{}]", spec.name()),
        }));
        out.push_str(&format!("Usage: {}\n", synopsis.join(" ")));

        if let Some(description) = self.description() {
            out.push_str(&format!("\n{description}\n"));
        }

        if !self.arguments().is_empty() {
            let rows: Vec<(String, String)> = self
                .arguments()
                .iter()
                .map(|arg| {
                    (
                        format!("{} {}", arg.name(), arg.handler.placeholder()),
                        describe(arg.decl().help.as_deref(), &arg.handler.default_value()),
                    )
                })
                .collect();
            write_section(&mut out, "Arguments", &rows);
        }

        if !self.switches().is_empty() {
            let rows: Vec<(String, String)> = self
                .switches()
                .iter()
                .map(|spec| {
                    let label = match spec.handler.placeholder() {
                        Some(placeholder) => format!("-{}:{placeholder}", spec.name()),
                        None => format!("-{}", spec.name()),
                    };
                    (
                        label,
                        describe(spec.decl().help.as_deref(), &spec.handler.default_value()),
                    )
                })
                .collect();
            write_section(&mut out, "Switches", &rows);
        }

        out
    }
}

fn describe(help: Option<&str>, default: &crate::Value) -> String {
    let default = default.to_string();
    match (help, default.is_empty()) {
        (Some(help), false) => format!("{help} (default: {default})"),
        (Some(help), true) => help.to_string(),
        (None, false) => format!("(default: {default})"),
        (None, true) => String::new(),
    }
}

fn write_section(out: &mut String, title: &str, rows: &[(String, String)]) {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(4);
    out.push_str(&format!("\n{title}:\n"));
    for (label, text) in rows {
        let line = format!("  {label:<width$}  {text}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
}
