//! Diagnostic logging for the CLI.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr subscriber. `RUST_LOG` overrides the level picked by
/// the `-v` count.
pub fn init(verbosity: u8) {
    static INITIALISED: OnceLock<()> = OnceLock::new();

    INITIALISED.get_or_init(|| {
        let directive = match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
