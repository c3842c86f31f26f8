//! Purpose: `templint` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs the pipeline, emits results.
//! Invariants: Validated JSON goes to stdout; diagnostics go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod color_json;

use color_json::colorize_json;
use templint::{Error, ErrorKind, TemplateContext, render_file, to_exit_code, validate_file};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `templint --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    dispatch(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn dispatch(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Check {
            template,
            set,
            context_file,
        } => {
            let context = build_context(&set, context_file.as_deref())?;
            let value = validate_file(&template, &context)?;
            let use_color = color_mode.use_color(io::stdout().is_terminal());
            println!("{}", colorize_json(&value, use_color));
            Ok(RunOutcome::ok())
        }
        Command::Render {
            template,
            set,
            context_file,
        } => {
            let context = build_context(&set, context_file.as_deref())?;
            let rendered = render_file(&template, &context)?;
            println!("{rendered}");
            Ok(RunOutcome::ok())
        }
    }
}

#[derive(Parser)]
#[command(
    name = "templint",
    version,
    about = "Validate JSON templates before they ship",
    help_template = r#"{about-with-newline}
{before-help}USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    long_about = None,
    before_help = r#"A template plus its context values must render to valid JSON.

Mental model:
  - `check` renders and parses (validate)
  - `render` renders only (inspect the substituted text)
"#,
    after_help = r#"EXAMPLES
  $ templint check module.json.tmpl --set Prompt="a fox" --set Steps=50
  $ templint check module.json.tmpl --context-file context.json
  $ templint render module.json.tmpl --set Prompt="a fox" --set Steps=50

  Failures point at the offending position:
  error in line 3, char 12: expected value at line 3 column 12

  $ templint <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics and pretty JSON output: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Substitute context values and validate the result as JSON",
        after_help = r#"EXAMPLES
  $ templint check module.json.tmpl --set Prompt="a fox" --set Steps=50
  $ templint check module.json.tmpl --context-file context.json --set Steps=75

NOTES
  - --set entries override values from --context-file
  - The context file must hold a JSON object of string values"#
    )]
    Check {
        #[arg(help = "Template file path", value_hint = ValueHint::FilePath)]
        template: PathBuf,
        #[arg(
            long = "set",
            value_name = "KEY=VALUE",
            help = "Context value for a placeholder (repeatable)"
        )]
        set: Vec<String>,
        #[arg(
            long,
            value_name = "PATH",
            help = "JSON object of context values",
            value_hint = ValueHint::FilePath
        )]
        context_file: Option<PathBuf>,
    },
    #[command(
        about = "Substitute context values and print the rendered text",
        after_help = r#"EXAMPLES
  $ templint render module.json.tmpl --set Prompt="a fox" --set Steps=50"#
    )]
    Render {
        #[arg(help = "Template file path", value_hint = ValueHint::FilePath)]
        template: PathBuf,
        #[arg(
            long = "set",
            value_name = "KEY=VALUE",
            help = "Context value for a placeholder (repeatable)"
        )]
        set: Vec<String>,
        #[arg(
            long,
            value_name = "PATH",
            help = "JSON object of context values",
            value_hint = ValueHint::FilePath
        )]
        context_file: Option<PathBuf>,
    },
}

fn build_context(set: &[String], context_file: Option<&Path>) -> Result<TemplateContext, Error> {
    let mut context = TemplateContext::new();

    if let Some(path) = context_file {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read context file")
                .with_path(path)
                .with_source(err)
        })?;
        let values: BTreeMap<String, String> = serde_json::from_str(&raw).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("context file is not a JSON object of strings: {err}"))
                .with_path(path)
                .with_hint(r#"Use an object like {"Prompt": "a fox", "Steps": "50"}."#)
        })?;
        for (key, value) in values {
            context.insert(key, value);
        }
    }

    let mut seen = std::collections::BTreeSet::new();
    for entry in set {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("invalid --set entry: {entry}"))
                .with_hint("Use --set KEY=VALUE."));
        };
        if !seen.insert(key.to_string()) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("duplicate --set key: {key}")));
        }
        context.insert(key, value);
    }

    Ok(context)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Template => "template substitution failed".to_string(),
        ErrorKind::Syntax => "output is not valid JSON".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(offset) = err.offset() {
        inner.insert("offset".to_string(), json!(offset));
    }
    if let Some(location) = err.location() {
        inner.insert("location".to_string(), json!(location));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(offset) = err.offset() {
        lines.push(format!(
            "{} {offset}",
            colorize_label("offset:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{build_context, error_json, error_message};
    use templint::{Error, ErrorKind, Location};

    #[test]
    fn build_context_merges_file_then_set_overrides() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("context.json");
        std::fs::write(&path, r#"{"Prompt": "a fox", "Steps": "50"}"#).expect("write");

        let context =
            build_context(&["Steps=75".to_string()], Some(path.as_path())).expect("context");
        assert_eq!(
            context.values().get("Prompt").map(String::as_str),
            Some("a fox")
        );
        assert_eq!(context.values().get("Steps").map(String::as_str), Some("75"));
    }

    #[test]
    fn build_context_rejects_duplicate_set_keys() {
        let err =
            build_context(&["A=1".to_string(), "A=2".to_string()], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn build_context_rejects_malformed_set_entries() {
        let err = build_context(&["Prompt".to_string()], None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn error_json_embeds_location_and_offset() {
        let err = Error::new(ErrorKind::Syntax)
            .with_message("error in line 1, char 26: expected value")
            .with_offset(25)
            .with_location(Location {
                line: 1,
                column: 26,
            });
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Syntax");
        assert_eq!(value["error"]["offset"], 25);
        assert_eq!(value["error"]["location"]["line"], 1);
        assert_eq!(value["error"]["location"]["column"], 26);
    }

    #[test]
    fn error_message_falls_back_to_kind_text() {
        assert_eq!(
            error_message(&Error::new(ErrorKind::Template)),
            "template substitution failed"
        );
    }
}
