//! Commit status reporting for Drone pipelines
//!
//! Resolves the plugin configuration, derives the status state and posts
//! one GitHub commit status per configured context.
//!
//! # Architecture
//!
//! - `schema` - Input definitions (flags, environment variables, defaults)
//! - `config` - Typed plugin configuration
//! - `state` - State derivation and the optional state file
//! - `auth` - Credential validation and transport selection
//! - `client` - Commit status API client
//! - `plugin` - Status dispatch
//!
//! # Example Usage
//!
//! ```no_run
//! use github_status_core::{PluginConfig, StatusPlugin};
//!
//! # async fn run() -> github_status_core::PluginResult<()> {
//! let config = PluginConfig {
//!     token: Some("secret".to_string()),
//!     repo_owner: "octocat".to_string(),
//!     repo_name: "hello-world".to_string(),
//!     commit_sha: "6dcb09b5b57875f334f61aebed695e2e4193db5e".to_string(),
//!     contexts: vec!["ci/build".to_string()],
//!     state: "success".to_string(),
//!     ..PluginConfig::default()
//! };
//!
//! StatusPlugin::new(config)?.exec().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod plugin;
pub mod schema;
pub mod state;
pub mod types;

pub use auth::{
    validate,
    Auth,
};
pub use client::StatusClient;
pub use config::PluginConfig;
pub use error::{
    ConfigError,
    DispatchError,
    FileReadError,
    PluginError,
    PluginResult,
    RequestFailure,
};
pub use plugin::StatusPlugin;
pub use schema::{
    ConfigField,
    ConfigFieldType,
    ConfigSchema,
};
pub use state::{
    calculate_state,
    resolve_state_file,
};
pub use types::{
    RepoStatus,
    StatusState,
};
