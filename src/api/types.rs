//! Shared types for the dashboard API layer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;

use crate::db::sqlite::open_database;
use crate::db::DatabaseError;

/// Shared context for all API routes.
///
/// Holds only the store location. Each handler opens its own connection
/// through `open_db` and drops it before returning, so no connection is
/// shared between requests.
#[derive(Debug, Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
}

impl ApiContext {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection scoped to the calling request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        open_database(&self.db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_db_creates_schema_on_fresh_path() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ApiContext::new(tmp.path().join("hospital.db"));

        let conn = ctx.open_db().unwrap();
        let tables = crate::db::sqlite::count_tables(&conn).unwrap();
        assert_eq!(tables, 6);
        assert!(ctx.db_path().exists());
    }

    #[test]
    fn clones_share_path() {
        let ctx = ApiContext::new("/tmp/a.db");
        let other = ctx.clone();
        assert_eq!(ctx.db_path(), other.db_path());
    }
}
