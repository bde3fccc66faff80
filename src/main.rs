use std::{env, process};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use rocks_lang::Rocks;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut rocks = Rocks::new();

    match args.len() {
        1 => run_prompt(&mut rocks),
        2 => run_file(&mut rocks, &args[1]),
        _ => {
            println!("Usage: rocks [script]");
            process::exit(64);
        }
    }
}

fn run_file(rocks: &mut Rocks, path: &str) {
    if let Err(error) = rocks.run_file(path) {
        eprintln!("Could not read {path}: {error}");
        process::exit(74);
    }

    if rocks.did_runtime_error() {
        process::exit(70);
    }
    if rocks.did_error() {
        process::exit(65);
    }
}

fn run_prompt(rocks: &mut Rocks) {
    let history_path = home::home_dir().map(|home| home.join(".rocks_history"));

    let mut editor = DefaultEditor::new().expect("terminal to support line editing");
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                rocks.run_line(&line);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("Readline error: {error}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
}
