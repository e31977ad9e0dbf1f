use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Clearance Hub";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address when CLEARANCE_HUB_ADDR is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "clearance_hub=info,tower_http=warn".to_string()
}

/// Get the application data directory
/// ~/ClearanceHub/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("ClearanceHub")
}

/// Default path of the clearance database.
/// Overridable via the CLEARANCE_HUB_DB environment variable.
pub fn database_path() -> PathBuf {
    if let Ok(path) = std::env::var("CLEARANCE_HUB_DB") {
        return PathBuf::from(path);
    }
    app_data_dir().join("clearances.db")
}
