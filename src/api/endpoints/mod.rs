//! API endpoint handlers, one module per dashboard page.
//!
//! Handlers open a connection through `ApiContext::open_db`, call into the
//! repository or report layer and drop the connection before returning.

pub mod analytics;
pub mod appointments;
pub mod assistant;
pub mod dashboard;
pub mod departments;
pub mod doctors;
pub mod health;
pub mod patients;
pub mod records;

use serde::Serialize;

/// Body returned by every create endpoint.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}
