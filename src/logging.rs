//! Tracing subscriber setup for the binary.
//!
//! Console lines look like:
//!
//! ```text
//! 14:02:11  INFO nyt_article_source::source src/source.rs:212: Collected articles page=0 count=10
//! ```
//!
//! The level filter is read from `LOG_LEVEL` (any `EnvFilter` directive)
//! and defaults to `debug`.

use chrono::Local;
use std::fmt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Environment variable holding the filter directive.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const DEFAULT_LEVEL: &str = "debug";

/// Local wall-clock time as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTime;

impl FormatTime for ClockTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S"))
    }
}

/// Build the filter from `directive`, falling back to the default level
/// when it is absent or does not parse.
pub fn level_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Call once, at startup.
pub fn init() {
    let directive = std::env::var(LOG_LEVEL_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(level_filter(directive.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ClockTime)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_default() {
        assert_eq!(level_filter(None).to_string(), "debug");
    }

    #[test]
    fn test_level_filter_from_directive() {
        assert_eq!(level_filter(Some("info")).to_string(), "info");
        assert_eq!(
            level_filter(Some("nyt_article_source=trace")).to_string(),
            "nyt_article_source=trace"
        );
    }

    #[test]
    fn test_clock_time_format() {
        let mut buf = String::new();
        ClockTime.format_time(&mut Writer::new(&mut buf)).unwrap();
        assert_eq!(buf.len(), 8);
        assert_eq!(buf.as_bytes()[2], b':');
        assert_eq!(buf.as_bytes()[5], b':');
    }
}
