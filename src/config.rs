use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Wardbook";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the hospital store inside the data directory.
pub const DATABASE_FILE: &str = "hospital.db";

/// Port the dashboard API listens on.
pub const DEFAULT_PORT: u16 = 8501;

/// Get the application data directory.
/// ~/Wardbook/ on all platforms, falling back to the working directory
/// when no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the SQLite store.
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Loopback address the API binds to.
pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT))
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,wardbook_lib=debug,tower_http=warn"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with(DATABASE_FILE));
    }

    #[test]
    fn app_data_dir_named_after_app() {
        assert!(app_data_dir().ends_with("Wardbook"));
    }

    #[test]
    fn bind_addr_is_loopback() {
        let addr = default_bind_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8501);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
