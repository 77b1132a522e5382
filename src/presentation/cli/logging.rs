//! Logging setup

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over the level picked by the flags.
pub fn init_logging(verbose: bool, debug: bool) -> anyhow::Result<()> {
    let default_level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
