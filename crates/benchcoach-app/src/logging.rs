// Tracing setup. Logs go to stderr so stdout carries only the report.

use anyhow::Context;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "benchcoach=info,warn";

/// Pick the filter directive: `RUST_LOG` wins, then the config, then the
/// default.
pub fn build_filter(config_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| match config_filter {
            Some(directive) => EnvFilter::try_new(directive),
            None => EnvFilter::try_new(DEFAULT_FILTER),
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
pub fn init_tracing(config_filter: Option<&str>) -> anyhow::Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(build_filter(config_filter))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
