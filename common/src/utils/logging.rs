use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global fmt subscriber. Filter comes from `RUST_LOG`, `info` otherwise.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
}
