use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use scical::evaluate;

use crate::cli::{print_help, Output};
use crate::config::{dirs_home, Config};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a line typed at the prompt asks for
#[derive(Debug, PartialEq)]
enum ReplCommand<'a> {
    Empty,
    Exit,
    Help,
    Clear,
    Evaluate(&'a str),
}

fn classify(line: &str) -> ReplCommand<'_> {
    match line.trim() {
        "" => ReplCommand::Empty,
        "exit" | "quit" => ReplCommand::Exit,
        "help" => ReplCommand::Help,
        "clear" => ReplCommand::Clear,
        expr => ReplCommand::Evaluate(expr),
    }
}

/// Get the history path (~/.scical_history)
fn history_path() -> Option<std::path::PathBuf> {
    dirs_home().map(|h| h.join(".scical_history"))
}

/// Run the interactive prompt until EOF or `exit`
pub(crate) fn run_repl(config: &Config, output: Output) -> RlResult<()> {
    let mut rl = DefaultEditor::new()?;

    let history = if config.history { history_path() } else { None };
    if let Some(path) = &history {
        // A missing history file is normal on first run
        let _ = rl.load_history(path);
    }

    if config.banner {
        println!("scical-{} (type 'help' for syntax, 'exit' to quit)", VERSION);
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let command = classify(&line);
                if command != ReplCommand::Empty && config.history {
                    rl.add_history_entry(line.as_str())?;
                }

                match command {
                    ReplCommand::Empty => {}
                    ReplCommand::Exit => break,
                    ReplCommand::Help => print_help(),
                    ReplCommand::Clear => rl.clear_screen()?,
                    ReplCommand::Evaluate(expr) => match evaluate(expr) {
                        Ok(value) => output.result(expr, value),
                        Err(e) => output.error(expr, &e, None),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C drops the current line
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = rl.save_history(path) {
            log::warn!("could not save history to {}: {}", path.display(), e);
        }
    }
    Ok(())
}
