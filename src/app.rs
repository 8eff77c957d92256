//! Application assembly: store construction, router, shutdown signal.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::{ServiceConfig, StoreKind};
use crate::persistence::{
    EmployeeStore, InMemoryEmployeeStore, MySqlEmployeeStore, StoreError,
};

/// Builds the store selected by `config.store`.
///
/// The MySQL pool connects lazily; only a malformed connection string
/// fails here.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the MySQL pool cannot be built.
pub fn build_store(config: &ServiceConfig) -> Result<Arc<dyn EmployeeStore>, StoreError> {
    let store: Arc<dyn EmployeeStore> = match config.store {
        StoreKind::MySql => Arc::new(MySqlEmployeeStore::connect_lazy(config)?),
        StoreKind::Memory => Arc::new(InMemoryEmployeeStore::with_timeout(
            config.store_op_timeout,
        )),
    };
    Ok(store)
}

/// Builds the complete application router around `store`.
pub fn build_app(store: Arc<dyn EmployeeStore>) -> Router {
    Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
