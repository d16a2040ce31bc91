//! scical - scientific calculator
//!
//! Usage:
//!   scical              Start interactive REPL
//!   scical -c "expr"    Evaluate a single expression
//!   scical file.txt     Evaluate a file, one expression per line

mod cli;
mod config;
mod repl;

use cli::{execute_command, execute_script, parse_args, print_help, print_version, Output};
use config::Config;
use std::env;
use std::process::ExitCode;

/// Install the logger; `--trace` wins over SCICAL_LOG
fn init_logging(trace: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::new().filter_or("SCICAL_LOG", "warn"));
    if trace {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.format_timestamp(None).init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'scical --help'");
            return ExitCode::FAILURE;
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging(cli.trace);
    let config = Config::load();
    let output = Output::new(&cli, &config);

    // Evaluate a single expression
    if let Some(expr) = &cli.command {
        return execute_command(expr, output);
    }

    // Evaluate a file
    if let Some(script) = &cli.script {
        return execute_script(script, output);
    }

    match repl::run_repl(&config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::FAILURE
        }
    }
}
