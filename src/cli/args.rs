//! CLI argument definitions using clap
//!
//! Commands:
//! - blogsmith init [--config <path>]
//! - blogsmith serve [--config <path>] [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// blogsmith - a small blog authoring server
#[derive(Parser, Debug)]
#[command(name = "blogsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the blog document and the upload and snapshot directories
    Init {
        /// Path to configuration file (default: ./blogsmith.json if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file (default: ./blogsmith.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to, overriding the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overriding the config file
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
