use std::io::IsTerminal;

use anyhow::anyhow;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber. `RUST_LOG` wins over `default_filter`.
/// Installing twice is harmless; the second call is logged and ignored.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
