mod cli;

use anyhow::Context;
use github_status_core::config::parse_bool;
use github_status_core::schema::keys;
use github_status_core::{
    logging,
    resolve_state_file,
    ConfigSchema,
    PluginConfig,
    StatusPlugin,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let schema = ConfigSchema::new();
    let matches = cli::command(&schema).get_matches();
    let flags = cli::flag_values(&schema, &matches);
    let inputs = schema.resolve(&flags, |name| std::env::var(name).ok());

    let debug = inputs.get(keys::DEBUG).is_some_and(|v| parse_bool(v));
    logging::init(debug);

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    tracing::info!(revision = %cli::version(), "Drone GitHub Status Plugin Version");

    let mut config = PluginConfig::from_inputs(&inputs).context("Invalid plugin configuration")?;
    resolve_state_file(&mut config);

    let plugin = StatusPlugin::new(config).context("Failed to initialize plugin")?;
    plugin.exec().await.context("Failed to create commit status")?;

    tracing::info!(
        contexts = plugin.config().contexts.len(),
        state = %plugin.calculated_state(),
        "Commit statuses created"
    );

    Ok(())
}
