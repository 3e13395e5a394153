//! Tracing subscriber setup for binaries.

use std::str::FromStr;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, VoyageError};

/// Expands a bare level (e.g. `"debug"`) so it applies to this crate while
/// dependencies stay at `warn`. Directive strings containing `,` or `=` are
/// kept verbatim.
pub fn filter_spec(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.is_empty() {
        return "warn,u_voyage=info".to_string();
    }
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("warn,u_voyage={normalized},voyage_report={normalized}")
    }
}

/// Installs the global subscriber: compact text or JSON lines on stderr.
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging(log_level: &str, json_format: bool) -> Result<()> {
    let spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_current_span(false);
        subscriber.with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();
        subscriber.with(fmt_layer).try_init()
    };
    installed.map_err(|e| VoyageError::Config(format!("logging already initialized: {e}")))?;

    tracing::debug!(
        filter = %spec,
        format = if json_format { "json" } else { "compact" },
        "logging initialized"
    );
    Ok(())
}
