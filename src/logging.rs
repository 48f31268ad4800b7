use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup console logging on stderr.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from `verbosity`:
/// 0 = warn, 1 = info, 2 = debug, 3+ = trace.
///
/// # Arguments
/// * `verbosity` - number of `-v` flags given
/// * `json` - emit one JSON object per event instead of plain text
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbosity: u8, json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()?;
    }

    tracing::debug!(verbosity, json, "Logging initialized");
    Ok(())
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
