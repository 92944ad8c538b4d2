//! Status state derivation

use std::fs;
use std::path::Path;

use tracing::{
    debug,
    error,
};

use crate::config::PluginConfig;
use crate::error::FileReadError;
use crate::types::StatusState;

/// Determines the state to report.
///
/// A non-empty user state wins and is coerced to `error` when it is not
/// canonical. Without one, the build status is passed through as is, or
/// `error` when it is empty too.
pub fn calculate_state(user_state: &str, build_status: &str) -> StatusState {
    if !user_state.is_empty() {
        return StatusState::canonical(user_state).unwrap_or(StatusState::Error);
    }

    if build_status.is_empty() {
        return StatusState::Error;
    }

    StatusState::passthrough(build_status)
}

/// Reads a state string from `path`.
///
/// Returns `Ok(None)` when the file does not exist. A single trailing
/// newline is stripped from the content.
pub fn read_state_file(path: &Path) -> Result<Option<String>, FileReadError> {
    if fs::metadata(path).is_err() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|source| FileReadError {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(
        content
            .strip_suffix('\n')
            .unwrap_or(&content)
            .to_string(),
    ))
}

/// Fills `config.state` from the state file when no explicit state is set.
///
/// A missing file leaves the state empty. A file that exists but cannot be
/// read sets the state to `error`.
pub fn resolve_state_file(config: &mut PluginConfig) {
    debug!(state = %config.state, "user defined state");

    if !config.state.is_empty() {
        return;
    }
    let Some(path) = config.state_file.as_deref() else {
        return;
    };

    match read_state_file(path) {
        Ok(Some(state)) => {
            debug!(state = %state, "state provided from file");
            config.state = state;
        }
        Ok(None) => {
            debug!("state file {} not found, ignoring", path.display());
        }
        Err(e) => {
            error!("{e}");
            config.state = StatusState::Error.as_str().to_string();
        }
    }
}
