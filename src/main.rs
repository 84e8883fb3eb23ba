use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use voxdesk_action::{ActionSet, Dispatcher};
use voxdesk_engine::EngineRegistry;
use voxdesk_server::{router, ServerState};

#[derive(Parser)]
#[command(name = "voxdesk", about = "Voice/text command session server")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = voxdesk_core::AppConfig::load_from_file(&cli.config)
        .with_context(|| format!("failed to load config from {:?}", cli.config))?;

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("voxdesk starting");

    let engines = EngineRegistry::new();
    tracing::info!(
        engines = ?engines.list_engines(),
        selected = %config.recognizer.engine,
        "engine registry ready"
    );

    let mut dispatcher = Dispatcher::new(ActionSet::standard(&config.actions));
    if let Some(secs) = config.actions.timeout_secs {
        tracing::info!(timeout_secs = secs, "bounding provider calls");
        dispatcher = dispatcher.with_timeout(Duration::from_secs(secs));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(ServerState::new(config, engines, dispatcher));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on ws://{addr}/ws");

    axum::serve(listener, router(state))
        .await
        .context("server error")?;

    Ok(())
}
