use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "Carevoice";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generative-text model used for all AI operations.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default base URL of the generative-text API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Bounded connect/read/write timeout for AI service calls, in seconds.
pub const AI_TIMEOUT_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,carevoice=debug"
}

/// Initialize tracing from RUST_LOG, falling back to the default filter.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .try_init();
}

/// Get the application data directory
/// ~/Carevoice/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Get the default path of the SQLite record store
pub fn records_db_path() -> PathBuf {
    app_data_dir().join("records.db")
}
