mod commands;
pub mod host;
pub mod settings;
pub mod watch;

pub use commands::{Cli, Command, OutputFormat};
