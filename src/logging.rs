//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with menu output. `HABITLOG_LOG`
//! takes precedence over the configured level and `-v` flags.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a full `EnvFilter` directive.
pub const LOG_ENV: &str = "HABITLOG_LOG";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Filter directive for a configured level raised by `verbosity` steps.
///
/// Unknown levels fall back to `warn`.
#[must_use]
pub fn filter_for(level: &str, verbosity: u8) -> &'static str {
    let base = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(level.trim()))
        .unwrap_or(1);
    let raised = (base + usize::from(verbosity)).min(LEVELS.len() - 1);
    LEVELS[raised]
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(level: &str, verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_for(level, verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_configured_level() {
        assert_eq!(filter_for("warn", 0), "warn");
        assert_eq!(filter_for("ERROR", 0), "error");
        assert_eq!(filter_for(" debug ", 0), "debug");
    }

    #[test]
    fn test_filter_for_verbosity_raises_level() {
        assert_eq!(filter_for("warn", 1), "info");
        assert_eq!(filter_for("warn", 2), "debug");
        assert_eq!(filter_for("warn", 9), "trace");
    }

    #[test]
    fn test_filter_for_unknown_level() {
        assert_eq!(filter_for("loud", 0), "warn");
    }

    #[test]
    fn test_init_twice() {
        init("warn", 0);
        init("debug", 1);
    }
}
