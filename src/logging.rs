//! Logging configuration using tracing
//!
//! Progress messages are emitted at info level and are the CLI's normal
//! output, so the default filter is "info" rather than something quieter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set. Otherwise the filter is "info", or "debug" when
/// `verbose` is true (which also logs every git invocation).
///
/// # Example RUST_LOG values
/// - `RUST_LOG=warn` - Only problems
/// - `RUST_LOG=wksctl=debug,gitcmd=debug` - Show each git command
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init(verbose: bool) -> crate::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .without_time(),
        )
        .try_init()
        .map_err(|e| crate::WksctlError::Config(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init(true);
}
