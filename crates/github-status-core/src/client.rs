use std::sync::Once;
use std::time::Duration;

use reqwest::header::{
    HeaderMap,
    HeaderValue,
    ACCEPT,
    AUTHORIZATION,
};
use reqwest::Url;
use tracing::debug;

use crate::auth::Auth;
use crate::config::normalize_base_url;
use crate::error::{
    ConfigError,
    RequestFailure,
};
use crate::types::RepoStatus;

const USER_AGENT: &str = concat!("drone-github-status/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

static CRYPTO_PROVIDER: Once = Once::new();

fn install_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Already installed by the embedding binary is fine
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Authenticated handle on the commit status API
pub struct StatusClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl StatusClient {
    /// Binds the transport to the API root. The base URL gets a trailing
    /// `/` so request paths join below it.
    pub fn new(base_url: &str, auth: &Auth) -> Result<Self, ConfigError> {
        let normalized = normalize_base_url(base_url);
        let base_url = Url::parse(&normalized).map_err(|e| ConfigError::InvalidBaseUrl {
            url: normalized.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth.header_value()?);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        install_crypto_provider();

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        debug!("Initialized GitHub client for {base_url} using {} auth", auth.kind());

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the statuses endpoint for one commit
    pub fn statuses_url(&self, owner: &str, repo: &str, sha: &str) -> Result<Url, RequestFailure> {
        self.base_url
            .join(&format!("repos/{owner}/{repo}/statuses/{sha}"))
            .map_err(|e| RequestFailure::InvalidUrl(e.to_string()))
    }

    /// `POST /repos/{owner}/{repo}/statuses/{sha}`; any 2xx is success
    pub async fn create_status(
        &self, owner: &str, repo: &str, sha: &str, status: &RepoStatus,
    ) -> Result<(), RequestFailure> {
        let url = self.statuses_url(owner, repo, sha)?;

        let response = self.http_client.post(url).json(status).send().await?;

        let status_code = response.status();
        if status_code.is_success() {
            debug!("Created status for context {} ({status_code})", status.context);
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(RequestFailure::Status {
            status: status_code,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn token() -> Auth {
        Auth::Token(SecretString::from("fake".to_string()))
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = StatusClient::new("http://server.com", &token()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://server.com/");
    }

    #[test]
    fn test_statuses_url_keeps_api_prefix() {
        let client = StatusClient::new("https://ghe.example.com/api/v3", &token()).unwrap();
        let url = client.statuses_url("o", "r", "abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/o/r/statuses/abc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = StatusClient::new("not a url", &token()).err().unwrap();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }
}
