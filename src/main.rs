//! # tocmd
//!
//! Build a numbered, collapsible table of contents from a markdown note.
//!
//! ## Usage
//!
//! Print the outline markup:
//! ```sh
//! tocmd render notes.md
//! ```
//!
//! Show the heading tree:
//! ```sh
//! tocmd tree notes.md
//! ```
//!
//! Keep an outline file in sync with a note:
//! ```sh
//! tocmd watch notes.md -o toc.html
//! ```

mod cli;

use clap::{CommandFactory, Parser as ClapParser};
use cli::host::{FileHost, read_note, write_atomic};
use cli::settings::SettingsWatcher;
use cli::watch::WatchSources;
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;
use tocmd::config::validate_expand_level;
use tocmd::render::{container, page};
use tocmd::session::NoteWatcher;
use tocmd::{
    Config, Event, ExpandState, HeadingNode, Outcome, PanelMessage, RenderOptions, Session,
    extract_outline, render_outline,
};

/// How long the watch loop waits for panel messages before checking the files.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Cli::parse();

    match args.command {
        Command::Render {
            file,
            output,
            level,
            standalone,
        } => render(&file, output.as_deref(), level, standalone),
        Command::Tree { file, format } => print_tree(&file, &format),
        Command::Watch {
            file,
            output,
            level,
        } => watch(&file, output, level),
        Command::Config { default_level } => configure(default_level),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tocmd", &mut io::stdout());
            Ok(())
        }
    }
}

/// CLI level override, else the configured one.
fn expand_level(level: Option<i64>) -> usize {
    match level {
        Some(level) => validate_expand_level(level),
        None => Config::load().expand_level(),
    }
}

/// Extract the outline or exit with the structural error.
fn extract_or_exit(file: &Path) -> Result<Vec<HeadingNode>> {
    let body = read_note(file)?;
    match extract_outline(&body) {
        Ok(tree) => Ok(tree),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn render(file: &Path, output: Option<&Path>, level: Option<i64>, standalone: bool) -> Result<()> {
    let tree = extract_or_exit(file)?;
    let options = RenderOptions {
        restore_expand_state: false,
        default_expand_level: expand_level(level),
    };

    let fragment = container(&render_outline(&tree, &ExpandState::new(), options));
    let markup = if standalone {
        let title = file
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| *n != "-")
            .unwrap_or("stdin");
        page::standalone_page(title, &fragment)
    } else {
        fragment
    };

    match output {
        Some(path) => write_atomic(path, &markup)?,
        None => print!("{}", markup),
    }
    Ok(())
}

fn print_tree(file: &Path, format: &OutputFormat) -> Result<()> {
    let tree = extract_or_exit(file)?;

    match format {
        OutputFormat::Plain => {
            print_nodes(&tree, "");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
    }
    Ok(())
}

fn print_nodes(nodes: &[HeadingNode], prefix: &str) {
    for (index, node) in nodes.iter().enumerate() {
        let number = format!("{}{}", prefix, index + 1);
        let indent = "  ".repeat(node.level - 1);
        println!("{}{} {}  #{}", indent, number, node.text, node.slug);
        print_nodes(&node.children, &format!("{}.", number));
    }
}

fn watch(file: &Path, output: PathBuf, level: Option<i64>) -> Result<()> {
    let path = file.canonicalize()?;
    let mut session = match level {
        Some(level) => Session::new(validate_expand_level(level)),
        None => Session::from_config(&Config::load()),
    };
    let mut host = FileHost::new(output);

    let body = read_note(&path)?;
    report(session.handle(Event::NoteSelected { body }, &mut host)?);

    let watcher = NoteWatcher::new(&path)?;
    // A --level override pins the expand level for the whole session.
    let settings = match level {
        Some(_) => None,
        None => watch_settings(),
    };
    let mut sources = WatchSources::new(watcher, settings, spawn_message_reader(), POLL_INTERVAL);
    eprintln!("Watching {} (Ctrl-C to stop)", sources.note().path().display());

    loop {
        for outcome in sources.step(&mut session, &mut host)? {
            report(outcome);
        }
    }
}

/// Watch the config file when the platform has a config directory for it.
fn watch_settings() -> Option<SettingsWatcher> {
    let path = Config::config_path()?;
    match SettingsWatcher::new(&path) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            log::debug!("not watching {}: {}", path.display(), e);
            None
        }
    }
}

/// Read panel messages as JSON lines from stdin on a separate thread.
///
/// Messages are funnelled through a channel so the session still handles
/// every event on the main thread, one at a time.
fn spawn_message_reader() -> Receiver<PanelMessage> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match PanelMessage::from_json(line) {
                Ok(message) => {
                    if tx.send(message).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("ignoring panel message {:?}: {}", line, e),
            }
        }
    });

    rx
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::ExtractionFailed => {
            eprintln!("Heading structure is invalid; keeping the previous outline.")
        }
        other => log::debug!("{:?}", other),
    }
}

fn configure(default_level: Option<i64>) -> Result<()> {
    let mut config = Config::load();

    if let Some(level) = default_level {
        config.set_default_expand_level(level)?;
        config.save()?;
    }

    match Config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    println!("default_expand_level = {}", config.expand_level());
    Ok(())
}
