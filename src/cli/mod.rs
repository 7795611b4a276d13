//! CLI module for blogsmith
//!
//! Provides command-line interface for:
//! - init: Create the blog document and media directories
//! - serve: Run the HTTP server

mod args;
mod commands;
mod errors;
mod logging;

pub use args::{Cli, Command};
pub use commands::{init, load_config, run, run_command, serve, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliResult};
pub use logging::init_logging;
