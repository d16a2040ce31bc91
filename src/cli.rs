use crate::config::Config;
use scical::{evaluate, format_result, EvaluationError};
use serde_json::json;
use std::fs;
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) precision: Option<usize>,
    pub(crate) json: bool,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) trace: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                cli.json = true;
            }
            "--trace" => {
                cli.trace = true;
            }
            "-p" | "--precision" => {
                let raw = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} needs a value", args[i]))?;
                let precision = raw
                    .parse()
                    .map_err(|_| format!("invalid precision: {}", raw))?;
                cli.precision = Some(precision);
                i += 1;
            }
            "-c" => {
                // Everything after -c is the expression
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
                return Err("-c needs an expression".to_string());
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    Ok(cli)
}

pub(crate) fn print_help() {
    println!(
        r#"scical-{} - scientific calculator

USAGE:
    scical                  Start interactive REPL
    scical -c <expr>        Evaluate a single expression
    scical <file>           Evaluate every line of a file
    scical --help           Show this help message
    scical --version        Show version

OPTIONS:
    -p, --precision <N>     Decimal places shown (default 12)
    --json                  Print results as JSON objects
    --trace                 Log tokens, postfix form and stack steps

SYNTAX:
    12  1.5  .5             Numbers
    pi  e                   Constants
    + - * / ^               Operators (^ binds right: 2^3^2 = 512)
    ( )                     Grouping
    sin cos tan             Trigonometry in degrees: sin(90) = 1
    sqrt ln log             Square root, natural log, base-10 log
    -x                      Negation: -5+3, 3*-2, (-2)

CONFIG:
    ~/.scicalrc             TOML: precision, banner, history
    SCICAL_PRECISION        Overrides precision
    SCICAL_BANNER=1         Show REPL banner
    SCICAL_LOG              Log filter (default warn)"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("scical-{}", VERSION);
}

/// How results are reported
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    pub(crate) json: bool,
    pub(crate) precision: usize,
}

impl Output {
    pub(crate) fn new(cli: &CliArgs, config: &Config) -> Self {
        Output {
            json: cli.json,
            precision: cli.precision.unwrap_or(config.precision),
        }
    }

    /// Print a successful evaluation
    pub(crate) fn result(&self, expr: &str, value: f64) {
        let display = format_result(value, self.precision);
        if self.json {
            println!(
                "{}",
                json!({ "expression": expr, "result": value, "display": display })
            );
        } else {
            println!("{}", display);
        }
    }

    /// Print a failed evaluation; `line` is set when reading a file
    pub(crate) fn error(&self, expr: &str, err: &EvaluationError, line: Option<usize>) {
        if self.json {
            println!(
                "{}",
                json!({
                    "expression": expr,
                    "error": err.to_string(),
                    "kind": err.kind(),
                    "position": err.position(),
                    "line": line,
                })
            );
        } else {
            match line {
                Some(n) => eprintln!("Error at line {}: {}", n, err),
                None => eprintln!("Error: {}", err),
            }
        }
    }
}

/// Evaluate a single expression
pub(crate) fn execute_command(expr: &str, output: Output) -> ExitCode {
    match evaluate(expr) {
        Ok(value) => {
            output.result(expr, value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            output.error(expr, &e, None);
            ExitCode::FAILURE
        }
    }
}

/// Evaluate a file, one expression per line
pub(crate) fn execute_script(path: &str, output: Output) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match evaluate(trimmed) {
            Ok(value) => output.result(trimmed, value),
            Err(e) => {
                output.error(trimmed, &e, Some(line_num + 1));
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
