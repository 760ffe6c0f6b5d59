//! Logging and tracing configuration

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Loads the `.env` file, then builds the filter from `RUST_LOG`
///
/// The file is read first so a `RUST_LOG` it defines takes effect. Variables
/// already present in the process environment win over the file.
pub fn load_env_filter(dotenv_path: Option<&Path>) -> EnvFilter {
    let _ = match dotenv_path {
        Some(path) => dotenv::from_path(path),
        None => dotenv::dotenv().map(|_| ()),
    };

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Initialize tracing, loading `.env` from the working directory
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(load_env_filter(None))
        .init();
}
