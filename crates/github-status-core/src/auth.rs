//! Credential selection

use base64::Engine;
use reqwest::header::HeaderValue;
use secrecy::{
    ExposeSecret,
    SecretString,
};

use crate::config::PluginConfig;
use crate::error::ConfigError;

/// Authentication transport, chosen once per invocation
#[derive(Debug)]
pub enum Auth {
    /// `Authorization: token <token>`
    Token(SecretString),
    /// HTTP basic auth
    Basic {
        username: String,
        password: SecretString,
    },
}

impl Auth {
    /// Value for the `Authorization` header, marked sensitive
    pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
        let raw = match self {
            Auth::Token(token) => format!("token {}", token.expose_secret()),
            Auth::Basic { username, password } => {
                let credentials = format!("{username}:{}", password.expose_secret());
                format!(
                    "Basic {}",
                    base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes())
                )
            }
        };

        let mut value = HeaderValue::from_str(&raw)
            .map_err(|e| ConfigError::InvalidCredentials(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Auth::Token(_) => "token",
            Auth::Basic { .. } => "basic",
        }
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Checks that credentials are present and picks the transport.
///
/// A token always wins. Otherwise both username and password are
/// required; they are trimmed of surrounding whitespace.
pub fn validate(config: &PluginConfig) -> Result<Auth, ConfigError> {
    if let Some(token) = non_empty(config.token.as_ref()) {
        return Ok(Auth::Token(SecretString::from(token.to_string())));
    }

    match (
        non_empty(config.username.as_ref()),
        non_empty(config.password.as_ref()),
    ) {
        (Some(username), Some(password)) => Ok(Auth::Basic {
            username: username.trim().to_string(),
            password: SecretString::from(password.trim().to_string()),
        }),
        _ => Err(ConfigError::MissingCredentials),
    }
}
