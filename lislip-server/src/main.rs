use std::sync::Arc;

use lislip::{AccountStore, AppConfig, SeedOutcome, bootstrap, connect};
use lislip_axum::{AppState, lislip_router};

mod server;

use crate::server::{init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Loaded configuration");

    let store = AccountStore::new(Arc::from(connect(&config.store).await?));

    match bootstrap(&store).await {
        Ok(SeedOutcome::Created { account_id, .. }) => {
            tracing::info!("Sample account created with ID {}", account_id)
        }
        Ok(SeedOutcome::Skipped { existing_accounts }) => {
            tracing::info!("{} existing account(s), sample data not needed", existing_accounts)
        }
        Err(e) => {
            tracing::error!("Unable to prepare the database: {}", e);
            std::process::exit(1);
        }
    }

    let state = AppState::from_config(store, &config)?;
    let app = lislip_router(state);

    spawn_http_server(config.port, app).await??;
    tracing::info!("Server stopped");
    Ok(())
}
