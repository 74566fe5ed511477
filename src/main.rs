use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use canvas_board::config::{AppConfig, StorageBackend};
use canvas_board::main_module::run_axum_server;
use canvas_board::shared::state::AppState;
use canvas_board::shared::utils::{create_conn, redact_url, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting canvas-board {} with {} storage",
        env!("CARGO_PKG_VERSION"),
        config.database.storage.as_str()
    );

    let app_state = match config.database.storage {
        StorageBackend::Memory => AppState::in_memory(),
        StorageBackend::Postgres => {
            let pool = create_conn(&config.database)?;
            if let Some(url) = &config.database.url {
                info!("Connected to database at {}", redact_url(url));
            }
            if config.database.run_migrations {
                let migrate_pool = pool.clone();
                tokio::task::spawn_blocking(move || run_migrations(&migrate_pool))
                    .await?
                    .map_err(|e| {
                        error!("Failed to run migrations: {}", e);
                        anyhow::anyhow!("migrations failed: {e}")
                    })?;
            }
            AppState::postgres(pool)
        }
    };

    run_axum_server(Arc::new(app_state), &config).await?;
    Ok(())
}
