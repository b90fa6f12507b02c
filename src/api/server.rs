//! Dashboard server lifecycle: bind, spawn the axum server in a background
//! task, hand back a handle with a shutdown channel.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::dashboard_router;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind dashboard server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(std::io::Error),
    #[error("Dashboard server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Dashboard server stopped unexpectedly")]
    Stopped,
}

/// Session metadata for a running dashboard server.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSession {
    pub session_id: String,
    pub server_addr: SocketAddr,
    pub started_at: String,
}

/// Handle to a running dashboard server.
pub struct DashboardServer {
    pub session: DashboardSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl DashboardServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }

    /// Serve until `signal` resolves, then shut down and wait for the task.
    /// A server task that exits first is reported as [`ServerError::Stopped`].
    pub async fn run_until(
        mut self,
        signal: impl Future<Output = ()>,
    ) -> Result<(), ServerError> {
        tokio::select! {
            () = signal => {
                self.shutdown();
                self.task.await?;
                Ok(())
            }
            joined = &mut self.task => {
                joined?;
                tracing::error!("Dashboard server exited before shutdown was requested");
                Err(ServerError::Stopped)
            }
        }
    }
}

/// Bind `addr` and serve the dashboard API for the store at `db_path`.
/// Port 0 picks an ephemeral port; the bound address is in the session.
pub async fn start_dashboard_server(
    db_path: impl Into<PathBuf>,
    addr: SocketAddr,
) -> Result<DashboardServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let app = dashboard_router(db_path);

    let session = DashboardSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr,
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Dashboard server received shutdown signal");
        };

        tracing::info!(%addr, "Dashboard server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Dashboard server error: {e}");
        }

        tracing::info!("Dashboard server stopped");
    });

    Ok(DashboardServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
