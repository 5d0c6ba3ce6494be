pub mod api;
pub mod assistant;
pub mod config;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod state;
pub mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::notify::{LogNotifier, Permission};
use crate::state::AppState;
use crate::store::RecordStore;

/// Run the companion service until interrupted.
pub async fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env();
    let store = match RecordStore::open(settings.data_dir.clone()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(dir = %settings.data_dir.display(), error = %e, "cannot open record store");
            return;
        }
    };

    let client = assistant::GeminiClient::from_env();
    if client.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; chat assistant disabled");
    }

    let state = Arc::new(AppState::new(store, Arc::new(LogNotifier), client));

    // Armed timers do not survive a restart; rebuild them from the store.
    if state.permission() == Permission::Granted {
        state.scheduler.rearm_all(&state.store);
    }

    let mut server = match api::server::start(Arc::clone(&state), settings.port).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "cannot start API server");
            return;
        }
    };
    tracing::info!(addr = %server.addr, "ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    server.shutdown();
    state.scheduler.shutdown();
    tracing::info!("{} stopped", config::APP_NAME);
}
