// Logging setup: one global tracing subscriber writing to stderr, with
// the level picked from `RUST_LOG` or the `-v` count.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Static var to indicate that the tracer has been initialized
static INIT_TRACER: OnceLock<()> = OnceLock::new();

/// Default filter for a verbosity level (`-v` count)
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the tracer. Logs go to stderr so stdout only carries the
/// command output; `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_tracer(verbosity: u8) {
    INIT_TRACER.get_or_init(|| {
        let layer_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
        let layer_stderr = fmt::layer().with_writer(std::io::stderr).with_target(false);

        // another subscriber may already be installed (tests)
        let _ = tracing_subscriber::registry()
            .with(layer_filter)
            .with(layer_stderr)
            .try_init();
    });
}
