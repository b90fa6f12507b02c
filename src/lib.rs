pub mod api; // Dashboard HTTP API
pub mod assistant; // Canned-question chat
pub mod config;
pub mod db;
pub mod models;
pub mod reports; // Dashboard and analytics aggregates

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::db::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Store bootstrap failed: {0}")]
    Bootstrap(#[from] DatabaseError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Bootstrap the store and serve the dashboard until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    db::bootstrap(&db_path)?;

    let server = api::start_dashboard_server(db_path, config::default_bind_addr()).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        "Dashboard at http://{}/api/dashboard",
        server.session.server_addr
    );

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C, serving until killed: {e}");
            std::future::pending::<()>().await;
        }
    };

    server.run_until(ctrl_c).await?;
    Ok(())
}
