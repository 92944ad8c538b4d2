//! Commit status plugin

use tracing::debug;

use crate::auth;
use crate::client::StatusClient;
use crate::config::PluginConfig;
use crate::error::{
    ConfigError,
    DispatchError,
};
use crate::state::calculate_state;
use crate::types::{
    RepoStatus,
    StatusState,
};

/// Posts one commit status per configured context
pub struct StatusPlugin {
    config: PluginConfig,
    client: Option<StatusClient>,
}

impl StatusPlugin {
    /// Validates the credentials and builds the authenticated client
    pub fn new(config: PluginConfig) -> Result<Self, ConfigError> {
        let auth = auth::validate(&config)?;
        let client = StatusClient::new(&config.base_url, &auth)?;

        Ok(Self {
            config,
            client: Some(client),
        })
    }

    /// A plugin without a client; [`StatusPlugin::exec`] refuses to run
    pub fn uninitialized(config: PluginConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn calculated_state(&self) -> StatusState {
        calculate_state(&self.config.state, &self.config.build_status)
    }

    fn client(&self) -> Result<&StatusClient, DispatchError> {
        self.client.as_ref().ok_or(DispatchError::NotInitialized)
    }

    /// Creates the statuses in context order, stopping at the first failure
    pub async fn exec(&self) -> Result<(), DispatchError> {
        let client = self.client()?;
        let config = &self.config;
        let state = self.calculated_state();

        let mut status = RepoStatus {
            description: config.description.clone(),
            state: state.clone(),
            target_url: config.target_url.clone(),
            context: String::new(),
        };

        for context in &config.contexts {
            status.context.clone_from(context);

            debug!(
                build_status = %config.build_status,
                calculated_state = %state,
                context = %context,
                description = %config.description,
                repo_name = %config.repo_name,
                repo_owner = %config.repo_owner,
                sha = %config.commit_sha,
                state = %config.state,
                target_url = %config.target_url,
                "creating status"
            );

            client
                .create_status(
                    &config.repo_owner,
                    &config.repo_name,
                    &config.commit_sha,
                    &status,
                )
                .await
                .map_err(|source| DispatchError::RequestFailed {
                    context: context.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}
