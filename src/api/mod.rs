//! Dashboard HTTP API.
//!
//! One route group per dashboard page, nested under `/api/`. Handlers
//! open a store connection per request through `ApiContext`.
//!
//! The router is composable: `dashboard_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::dashboard_router;
pub use server::{start_dashboard_server, DashboardServer, DashboardSession, ServerError};
pub use types::ApiContext;
