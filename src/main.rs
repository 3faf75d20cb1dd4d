// ABOUTME: Command-line entry point: batch script execution or interactive REPL

use clap::Parser;
use rlox::config::{HISTORY_FILE, PROMPT, USAGE, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use rlox::highlighter::LoxHelper;
use rlox::Lox;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::{Path, PathBuf};
use std::process;

/// Tree-walking interpreter for the Lox scripting language
#[derive(Parser, Debug)]
#[command(name = "lox")]
#[command(version = VERSION)]
#[command(about = "A tree-walking interpreter for the Lox scripting language")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();

    let code = match args.scripts.as_slice() {
        [] => run_prompt(),
        [script] => run_file(script),
        _ => {
            println!("{}", USAGE);
            64
        }
    };

    process::exit(code);
}

/// Batch mode: run the whole file once, then map the error flags onto the
/// conventional exit codes (65 compile, 70 runtime).
fn run_file(path: &Path) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Cannot read script file {}: {}", path.display(), error);
            return 74;
        }
    };

    let mut lox = Lox::new();
    lox.run(&source);

    if lox.had_error() {
        65
    } else if lox.had_runtime_error() {
        70
    } else {
        0
    }
}

/// Interactive mode: one line per run, with history and highlighting.
/// Compile and runtime errors are reported but never end the session.
fn run_prompt() -> i32 {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<LoxHelper, DefaultHistory> = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("Failed to initialize REPL: {}", error);
            return 70;
        }
    };
    rl.set_helper(Some(LoxHelper::new()));

    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    let mut lox = Lox::new();
    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                lox.run(&line);
                lox.reset_error();
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("Error: {}", error);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    0
}
