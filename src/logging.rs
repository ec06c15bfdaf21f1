//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. `RUST_LOG` takes precedence; otherwise the
/// level is `info`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "nodeshell=debug,tower_http=debug"
        } else {
            "nodeshell=info,tower_http=info"
        })
    });

    let builder = fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
