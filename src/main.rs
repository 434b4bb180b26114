use std::sync::Arc;

use clap::Parser;
use esi_engine::api::{AppState, SessionRegistry, create_router};
use esi_engine::config::{CliArgs, DataLoader, JsonFileSettingsStore};
use esi_engine::store::InMemoryPayrollStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = CliArgs::parse();
    let settings_path = cli.settings_path();

    let loader = DataLoader::load(&cli.data_dir)?;
    let (data, sessions) = loader.into_parts();
    let sessions = SessionRegistry::new(sessions);
    info!(
        data_dir = %cli.data_dir.display(),
        settings_file = %settings_path.display(),
        sessions = sessions.len(),
        "Payroll data loaded"
    );

    let state = AppState::new(
        Arc::new(InMemoryPayrollStore::new(data)),
        Arc::new(JsonFileSettingsStore::new(&settings_path)),
        sessions,
    );

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(bind = %cli.bind, "ESI engine listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
