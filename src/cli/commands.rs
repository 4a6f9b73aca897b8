use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tocmd")]
#[command(version)]
#[command(about = "A collapsible, numbered table-of-contents builder for markdown notes")]
#[command(
    long_about = "tocmd - Build a numbered, collapsible outline of a markdown note's headings.\n\n\
    The top-level '#' heading is treated as the note title and left out; '##' headings\n\
    become the first outline level. Every entry gets a unique anchor slug.\n\n\
    Examples:\n  \
    tocmd render notes.md                 # Print the outline HTML fragment\n  \
    tocmd render notes.md --standalone    # Full HTML page with styles\n  \
    tocmd tree -o json notes.md           # Heading tree as JSON\n  \
    tocmd watch notes.md -o toc.html      # Re-render on every save\n  \
    tocmd config --default-level 3        # Persist the default expand level"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Render the outline of a note as HTML
    ///
    /// Extracts the heading tree and prints the nested outline markup.
    /// Fails if a heading skips a level (e.g. '##' followed by '####').
    Render {
        /// Markdown note to read, or '-' for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Write the markup to this file instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /// Entries shallower than this level start expanded (1-5)
        ///
        /// Overrides the configured default expand level.
        #[arg(short = 'L', long = "level", value_name = "LEVEL",
              value_parser = clap::value_parser!(i64).range(1..=5))]
        level: Option<i64>,

        /// Emit a complete HTML page with the default stylesheet
        #[arg(long = "standalone")]
        standalone: bool,
    },

    /// Print the numbered heading tree
    Tree {
        /// Markdown note to read, or '-' for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output format
        ///
        ///   plain - Numbered outline with slugs (default)
        ///   json  - Nested heading tree
        #[arg(short = 'o', long = "output", default_value = "plain")]
        format: OutputFormat,
    },

    /// Keep an outline file up to date while a note is edited
    ///
    /// Re-renders OUTPUT whenever the note's heading structure changes.
    /// Panel messages can be fed as JSON lines on stdin, e.g.
    /// {"kind":"expandChanged","slug":"intro","expanded":false}
    /// so that open/closed entries survive later edits.
    Watch {
        /// Markdown note to watch
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Outline file to keep updated
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: PathBuf,

        /// Entries shallower than this level start expanded (1-5)
        #[arg(short = 'L', long = "level", value_name = "LEVEL",
              value_parser = clap::value_parser!(i64).range(1..=5))]
        level: Option<i64>,
    },

    /// Show or change persisted settings
    Config {
        /// Save a new default expand level (1-5)
        #[arg(long = "default-level", value_name = "LEVEL",
              value_parser = clap::value_parser!(i64).range(1..=5))]
        default_level: Option<i64>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Numbered plain text outline
    Plain,
    /// JSON heading tree
    Json,
}
