use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Carelog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the local API server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7380";

/// Get the application data directory
/// ~/Carelog/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Carelog")
}

/// Get the SQLite database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("carelog.db")
}

/// Bind address for the API server, overridable via `CARELOG_ADDR`.
pub fn bind_addr() -> String {
    std::env::var("CARELOG_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    "carelog=info,tower_http=warn".to_string()
}
