//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero status.

use thiserror::Error;

use crate::blog::BlogError;
use crate::http_server::ConfigError;
use crate::media::MediaError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("BLOG_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("BLOG_CLI_INIT_FAILED: {0}")]
    InitFailed(String),

    #[error("BLOG_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "BLOG_CLI_CONFIG_ERROR",
            CliError::InitFailed(_) => "BLOG_CLI_INIT_FAILED",
            CliError::BootFailed(_) => "BLOG_CLI_BOOT_FAILED",
        }
    }
}

impl From<BlogError> for CliError {
    fn from(e: BlogError) -> Self {
        CliError::InitFailed(e.to_string())
    }
}

impl From<MediaError> for CliError {
    fn from(e: MediaError) -> Self {
        CliError::InitFailed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
