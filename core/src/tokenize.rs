//! Command-line tokenizer.
//!
//! Splits a raw command line on whitespace runs. A double-quoted span is
//! part of the token it appears in and may contain whitespace; quotes stay in
//! the token text until a field handler captures the value. There is no
//! escaping inside quotes. The first token is the program name and is always
//! dropped.

/// Splits `raw` into tokens, dropping the program name.
///
/// Returns borrowed slices of `raw`. Empty input and input holding only a
/// program name both yield no tokens.
///
/// # Examples
///
/// ```
/// use switchline_core::split;
///
/// let tokens = split(r#"exe opt1  2 -opt4:"c:\temp 1\sub folder""#);
/// assert_eq!(tokens, ["opt1", "2", r#"-opt4:"c:\temp 1\sub folder""#]);
///
/// assert!(split("").is_empty());
/// assert!(split("exe").is_empty());
/// ```
pub fn split(raw: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut quoted = false;

    for (idx, c) in raw.char_indices() {
        if c.is_whitespace() && !quoted {
            if let Some(begin) = start.take() {
                tokens.push(&raw[begin..idx]);
            }
            continue;
        }
        if start.is_none() {
            start = Some(idx);
        }
        if c == '"' {
            quoted = !quoted;
        }
    }

    // An unterminated quote runs to the end of the line.
    if let Some(begin) = start {
        tokens.push(&raw[begin..]);
    }

    if !tokens.is_empty() {
        tokens.remove(0);
    }
    tokens
}

/// Joins an already split argument vector back into a raw command line.
///
/// Arguments that are empty or contain whitespace are wrapped in quotes so
/// that [`split`] yields them back as single tokens. For `-name:value`
/// arguments only the value is quoted.
///
/// Arguments that already contain a `"` are passed through unchanged: the
/// tokenizer has no escapes, so the caller's own quotes decide the split.
/// An argument such as `say "hi there"` therefore comes back as two tokens.
///
/// # Examples
///
/// ```
/// use switchline_core::{join_args, split};
///
/// let line = join_args(["exe", "open", "my file.txt"]);
/// assert_eq!(line, r#"exe open "my file.txt""#);
/// assert_eq!(split(&line), ["open", r#""my file.txt""#]);
/// ```
pub fn join_args<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if !needs_quotes(arg) {
        return arg.to_string();
    }
    // Keep `-name:` outside the quotes so the switch still matches.
    if arg.starts_with('-') {
        if let Some((name, value)) = arg.split_once(':') {
            if !name.chars().any(char::is_whitespace) {
                return format!("{name}:\"{value}\"");
            }
        }
    }
    format!("\"{arg}\"")
}

fn needs_quotes(arg: &str) -> bool {
    if arg.is_empty() {
        return true;
    }
    if arg.contains('"') {
        return false;
    }
    arg.chars().any(char::is_whitespace)
}
