//! Input schema shared by the command line and the environment lookup

use std::collections::HashMap;

/// How an input is parsed and presented on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFieldType {
    /// Single value
    Text,
    /// Single value that must never be logged
    Password,
    /// Comma separated or repeated values
    List,
    /// Boolean switch
    Boolean,
}

/// A single plugin input
#[derive(Debug, Clone, Copy)]
pub struct ConfigField {
    /// Input key, also the long flag name
    pub key: &'static str,
    /// Help text
    pub description: &'static str,
    pub field_type: ConfigFieldType,
    /// Environment variables checked in order, first non-empty wins
    pub env: &'static [&'static str],
    pub default_value: Option<&'static str>,
    pub required: bool,
}

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

pub mod keys {
    pub const API_KEY: &str = "api-key";
    pub const BASE_URL: &str = "base-url";
    pub const CONTEXT: &str = "context";
    pub const DEBUG: &str = "debug";
    pub const DESCRIPTION: &str = "description";
    pub const FILE: &str = "file";
    pub const STATE: &str = "state";
    pub const TARGET_URL: &str = "target-url";
    pub const PASSWORD: &str = "password";
    pub const USERNAME: &str = "username";
    pub const BUILD_STATUS: &str = "build-status";
    pub const COMMIT_SHA: &str = "commit-sha";
    pub const REPO_NAME: &str = "repo-name";
    pub const REPO_OWNER: &str = "repo-owner";
}

const fn field(
    key: &'static str, description: &'static str, field_type: ConfigFieldType,
    env: &'static [&'static str],
) -> ConfigField {
    ConfigField {
        key,
        description,
        field_type,
        env,
        default_value: None,
        required: false,
    }
}

const FIELDS: &[ConfigField] = &[
    // plugin args
    field(
        keys::API_KEY,
        "api key to access github api",
        ConfigFieldType::Password,
        &["PLUGIN_API_KEY", "GITHUB_RELEASE_API_KEY", "GITHUB_TOKEN"],
    ),
    ConfigField {
        default_value: Some(DEFAULT_BASE_URL),
        ..field(
            keys::BASE_URL,
            "api url, needs to be changed for ghe",
            ConfigFieldType::Text,
            &["PLUGIN_BASE_URL", "GITHUB_BASE_URL"],
        )
    },
    field(
        keys::CONTEXT,
        "status context(s) to create/update",
        ConfigFieldType::List,
        &["PLUGIN_CONTEXT", "PLUGIN_CONTEXTS"],
    ),
    field(
        keys::DEBUG,
        "debug logging",
        ConfigFieldType::Boolean,
        &["PLUGIN_DEBUG"],
    ),
    field(
        keys::DESCRIPTION,
        "status description",
        ConfigFieldType::Text,
        &["PLUGIN_DESCRIPTION"],
    ),
    field(
        keys::FILE,
        "status read from file",
        ConfigFieldType::Text,
        &["PLUGIN_FILE"],
    ),
    field(
        keys::STATE,
        "status state",
        ConfigFieldType::Text,
        &["PLUGIN_STATE"],
    ),
    field(
        keys::TARGET_URL,
        "url to have status link to",
        ConfigFieldType::Text,
        &["PLUGIN_TARGET_URL", "DRONE_BUILD_LINK"],
    ),
    field(
        keys::PASSWORD,
        "basic auth password",
        ConfigFieldType::Password,
        &["PLUGIN_PASSWORD", "GITHUB_PASSWORD", "DRONE_NETRC_PASSWORD"],
    ),
    field(
        keys::USERNAME,
        "basic auth username",
        ConfigFieldType::Text,
        &["PLUGIN_USERNAME", "GITHUB_GITHUB_USERNAME", "DRONE_NETRC_USERNAME"],
    ),
    // drone env
    field(
        keys::BUILD_STATUS,
        "drone build status, can be used to derive state from",
        ConfigFieldType::Text,
        &["DRONE_BUILD_STATUS"],
    ),
    ConfigField {
        required: true,
        ..field(
            keys::COMMIT_SHA,
            "commit-sha to assign status to",
            ConfigFieldType::Text,
            &["DRONE_COMMIT_SHA"],
        )
    },
    ConfigField {
        required: true,
        ..field(
            keys::REPO_NAME,
            "repository name",
            ConfigFieldType::Text,
            &["DRONE_REPO_NAME"],
        )
    },
    ConfigField {
        required: true,
        ..field(
            keys::REPO_OWNER,
            "repository owner",
            ConfigFieldType::Text,
            &["DRONE_REPO_OWNER"],
        )
    },
];

/// Complete input schema for the plugin
#[derive(Debug, Clone, Copy)]
pub struct ConfigSchema {
    pub fields: &'static [ConfigField],
}

impl ConfigSchema {
    pub const fn new() -> Self {
        Self { fields: FIELDS }
    }

    /// Merges command line values, environment and defaults into one map.
    ///
    /// A key present in `flags` wins. Otherwise the first non-empty
    /// environment variable is used, then the field default. Keys with no
    /// value at all are left out.
    pub fn resolve<F>(&self, flags: &HashMap<String, String>, env: F) -> HashMap<String, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut inputs = HashMap::new();

        for field in self.fields {
            let value = flags
                .get(field.key)
                .cloned()
                .or_else(|| {
                    field
                        .env
                        .iter()
                        .filter_map(|name| env(*name))
                        .find(|value| !value.is_empty())
                })
                .or_else(|| field.default_value.map(str::to_string));

            if let Some(value) = value {
                inputs.insert(field.key.to_string(), value);
            }
        }

        inputs
    }
}

impl Default for ConfigSchema {
    fn default() -> Self {
        Self::new()
    }
}
