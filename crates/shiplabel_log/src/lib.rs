//! `shiplabel_log` v1:
//! Logging bootstrap shared by the CLI and the Python bridge.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter directive when neither `RUST_LOG` nor a caller level is set.
pub const C_LOG_LEVEL_DEFAULT: &str = "info";

/// Build the effective filter: `RUST_LOG` when set and valid, otherwise `level`.
pub fn derive_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(C_LOG_LEVEL_DEFAULT))
}

/// Install a stderr `fmt` subscriber filtered by [`derive_env_filter`].
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is kept.
pub fn init_logging(level: &str) -> bool {
    let if_installed = tracing_subscriber::registry()
        .with(derive_env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok();
    if if_installed {
        tracing::debug!("Logging initialized");
    }
    if_installed
}
