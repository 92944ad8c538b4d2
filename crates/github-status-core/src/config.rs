//! Plugin configuration

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::schema::{
    keys,
    ConfigSchema,
    DEFAULT_BASE_URL,
};

/// Settings for a single plugin invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub contexts: Vec<String>,
    pub description: String,
    pub target_url: String,
    pub commit_sha: String,
    pub repo_owner: String,
    pub repo_name: String,
    /// Explicit state, empty when not given
    pub state: String,
    /// Upstream build status, empty when not given
    pub build_status: String,
    pub state_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            username: None,
            password: None,
            contexts: Vec::new(),
            description: String::new(),
            target_url: String::new(),
            commit_sha: String::new(),
            repo_owner: String::new(),
            repo_name: String::new(),
            state: String::new(),
            build_status: String::new(),
            state_file: None,
            debug: false,
        }
    }
}

impl PluginConfig {
    /// Builds the config from resolved inputs (see [`ConfigSchema::resolve`])
    pub fn from_inputs(inputs: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let schema = ConfigSchema::new();
        for field in schema.fields.iter().filter(|f| f.required) {
            if get_text(inputs, field.key).is_none() {
                return Err(ConfigError::MissingField(field.key));
            }
        }

        Ok(Self {
            base_url: get_text(inputs, keys::BASE_URL)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: get_text(inputs, keys::API_KEY),
            username: get_text(inputs, keys::USERNAME),
            password: get_text(inputs, keys::PASSWORD),
            contexts: inputs
                .get(keys::CONTEXT)
                .map(|value| parse_list(value))
                .unwrap_or_default(),
            description: get_text(inputs, keys::DESCRIPTION).unwrap_or_default(),
            target_url: get_text(inputs, keys::TARGET_URL).unwrap_or_default(),
            commit_sha: get_text(inputs, keys::COMMIT_SHA).unwrap_or_default(),
            repo_owner: get_text(inputs, keys::REPO_OWNER).unwrap_or_default(),
            repo_name: get_text(inputs, keys::REPO_NAME).unwrap_or_default(),
            state: get_text(inputs, keys::STATE).unwrap_or_default(),
            build_status: get_text(inputs, keys::BUILD_STATUS).unwrap_or_default(),
            state_file: get_text(inputs, keys::FILE).map(PathBuf::from),
            debug: inputs
                .get(keys::DEBUG)
                .is_some_and(|value| parse_bool(value)),
        })
    }
}

fn get_text(inputs: &HashMap<String, String>, key: &str) -> Option<String> {
    inputs
        .get(key)
        .filter(|value| !value.is_empty())
        .cloned()
}

/// Splits a comma separated list, dropping blank entries
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse_bool(value: &str) -> bool {
    let value = value.trim();
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Appends the trailing `/` required for relative URL joins
pub fn normalize_base_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}
