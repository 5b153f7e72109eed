mod output;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use switchline_catalog::{SchemaCatalog, load_description};
use switchline_core::{Schema, join_args, split};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, ParseReport, format_report};

#[derive(Debug, Parser)]
#[command(name = "switchline")]
#[command(about = "Bind -switch and positional command lines against declarative schemas")]
struct Cli {
    /// Log loader activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a raw command line into tokens.
    Tokenize(TokenizeArgs),
    /// Bind a command line against a schema file.
    Parse(ParseArgs),
    /// Validate one or more schema description files.
    Validate(ValidateArgs),
    /// Print the usage text of a schema file.
    Usage(UsageArgs),
}

#[derive(Debug, Args)]
struct TokenizeArgs {
    /// Raw command line, program name first.
    line: String,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema description file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Raw command line, program name first.
    #[arg(long, conflicts_with = "args")]
    line: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Arguments to bind, without the program name.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files and/or directories containing schema files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema description file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Tokenize(args) => run_tokenize(args),
        Command::Parse(args) => run_parse(args),
        Command::Validate(args) => run_validate(args),
        Command::Usage(args) => run_usage(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_tokenize(args: TokenizeArgs) -> Result<(), String> {
    let tokens = split(&args.line);
    let json = serde_json::to_string_pretty(&tokens)
        .map_err(|e| format!("JSON serialization failed: {e}"))?;
    println!("{json}");
    Ok(())
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let schema = load_schema(&args.schema)?;

    let line = match args.line {
        Some(line) => line,
        None => join_args(std::iter::once(schema.command().to_string()).chain(args.args)),
    };
    debug!(line = %line, "binding command line");

    let parsed = schema.parse(&line).map_err(|e| e.to_string())?;
    let report = ParseReport::new(schema.command(), &parsed);
    print!("{}", with_newline(format_report(&report, args.format)?));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut files = 0;

    for input in &args.inputs {
        let catalog = if input.is_dir() {
            SchemaCatalog::from_dir(input)
        } else {
            SchemaCatalog::from_file(input)
        }
        .map_err(|e| e.to_string())?;

        for command in catalog.commands() {
            let path = catalog.path(command).unwrap_or(input.as_path()).to_path_buf();
            if let Some(first) = seen.get(command) {
                return Err(format!(
                    "command '{command}' is described by both {} and {}",
                    first.display(),
                    path.display()
                ));
            }
            seen.insert(command.to_string(), path);
            files += 1;
        }
    }

    let mut commands: Vec<&str> = seen.keys().map(String::as_str).collect();
    commands.sort_unstable();
    println!(
        "Validated {files} schema file(s): {}",
        if commands.is_empty() {
            "none".to_string()
        } else {
            commands.join(", ")
        }
    );
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let schema = load_schema(&args.schema)?;
    print!("{}", schema.usage());
    Ok(())
}

fn load_schema(path: &Path) -> Result<Schema, String> {
    let description = load_description(path).map_err(|e| e.to_string())?;
    Schema::new(description).map_err(|e| format!("{}: {e}", path.display()))
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
