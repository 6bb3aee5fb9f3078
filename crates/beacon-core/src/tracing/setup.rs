use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::TrackerSettings;

static INIT: Once = Once::new();

const LOG_ENV: &str = "BEACON_LOG";

/// Initialize the Beacon tracing/logging system with the default settings.
///
/// Reads the `BEACON_LOG` environment variable, e.g.
/// `BEACON_LOG=beacon_tracker=debug,beacon_collector=trace`.
/// Falls back to `beacon=info` if `BEACON_LOG` is not set or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_for(&TrackerSettings::default());
}

/// Like [`init_tracing`], falling back to `settings.log_filter`.
pub fn init_tracing_for(settings: &TrackerSettings) {
    install(resolve_filter(
        std::env::var(LOG_ENV).ok().as_deref(),
        &settings.log_filter,
    ));
}

/// Initialize tracing with an explicit filter string (for embedding or tests).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

/// Whether a previous call already ran.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

/// The env filter when it parses, otherwise `fallback`.
fn resolve_filter(env_value: Option<&str>, fallback: &str) -> EnvFilter {
    env_value
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // A host may already own the global subscriber; keep theirs.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_filter_applies_without_env() {
        let filter = resolve_filter(None, "beacon_tracker=debug");
        assert_eq!(filter.to_string(), "beacon_tracker=debug");
    }

    #[test]
    fn env_filter_wins_when_valid() {
        assert_eq!(resolve_filter(Some("warn"), "beacon=info").to_string(), "warn");
        assert_eq!(
            resolve_filter(Some("beacon=loud"), "beacon=info").to_string(),
            "beacon=info"
        );
    }

    #[test]
    fn init_is_idempotent() {
        let settings = TrackerSettings {
            log_filter: "beacon_core=debug".to_string(),
            ..TrackerSettings::default()
        };
        init_tracing_for(&settings);
        assert!(is_initialized());

        init_tracing_for(&settings);
        init_tracing();
        init_tracing_with_filter("off");
        assert!(is_initialized());
    }
}
