//! CLI command implementations

use std::path::Path;

use tracing::{info, warn};

use crate::blog::BlogStore;
use crate::http_server::{HttpServer, ServerConfig};
use crate::media::LocalBackend;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::logging::init_logging;

/// Config file picked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./blogsmith.json";

/// Resolve the configuration.
///
/// An explicitly named file must exist. Without one, `./blogsmith.json` is
/// used when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> CliResult<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::load(path)?),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.is_file() {
                Ok(ServerConfig::load(default_path)?)
            } else {
                Ok(ServerConfig::default())
            }
        }
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_logging();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&load_config(config.as_deref())?),
        Command::Serve { config, host, port } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config)
        }
    }
}

/// Create the upload and snapshot directories and an empty blog document.
///
/// An existing document is left untouched.
pub fn init(config: &ServerConfig) -> CliResult<()> {
    for dir in [&config.upload_dir, &config.sites_dir] {
        LocalBackend::new(dir).ensure_root()?;
        info!(dir = %dir.display(), "directory ready");
    }

    let store = BlogStore::new(&config.data_file);
    if !store.init()? {
        info!(path = %config.data_file.display(), "blog document already exists");
    }

    Ok(())
}

/// Run the HTTP server until it fails
pub fn serve(config: ServerConfig) -> CliResult<()> {
    if !config.data_file.is_file() {
        warn!(
            path = %config.data_file.display(),
            "blog document missing; requests will fail until 'blogsmith init' is run"
        );
    }

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::BootFailed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::BootFailed(format!("HTTP server failed: {}", e)))
    })
}
