use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building or validating the plugin configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("You must provide an API key or Username and Password")]
    MissingCredentials,

    #[error("Missing required setting: {0}")]
    MissingField(&'static str),

    #[error("Failed to parse base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid credentials format: {0}")]
    InvalidCredentials(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// The state file exists but could not be read
#[derive(Error, Debug)]
#[error("Failed to read state from file {}: {source}", .path.display())]
pub struct FileReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Why a single status request failed
#[derive(Error, Debug)]
pub enum RequestFailure {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("GitHub API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

/// Errors raised while posting statuses
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("git client not initialized")]
    NotInitialized,

    #[error("Failed to create status for context {context}")]
    RequestFailed {
        context: String,
        #[source]
        source: RequestFailure,
    },
}

/// Top-level plugin error
#[derive(Error, Debug)]
pub enum PluginError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type PluginResult<T> = Result<T, PluginError>;
