use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber, logging to stderr.
///
/// `RUST_LOG` picks the level, defaulting to "info"; `verbose` forces "debug".
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
