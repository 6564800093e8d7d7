//! Logging setup for Quarry.
//!
//! Structured logging is controlled through environment variables.
//!
//! # Environment Variables
//!
//! - `QUARRY_DEBUG=true|1|yes` - Enable debug logging
//! - `QUARRY_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `QUARRY_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use quarry_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//!
//! // Or with a fixed level
//! logging::init_with_level("trace");
//! ```
//!
//! The serializer emits `debug!` once per serialized root and `trace!` per
//! resolved field path, so `trace` shows every path cache hit and miss.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `QUARRY_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("QUARRY_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `QUARRY_LOG_LEVEL`.
///
/// Defaults to "debug" if `QUARRY_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };

    match env::var("QUARRY_LOG_LEVEL") {
        Ok(level) => parse_level(&level).unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Get the configured log format from `QUARRY_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("QUARRY_LOG_FORMAT")
        .map(|f| parse_format(&f))
        .unwrap_or("json")
}

fn parse_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

fn parse_format(format: &str) -> &'static str {
    match format.to_lowercase().as_str() {
        "pretty" => "pretty",
        "compact" => "compact",
        _ => "json",
    }
}

/// Initialize the Quarry logging system.
///
/// Subsequent calls are no-ops. Nothing is installed unless `QUARRY_DEBUG`
/// or `QUARRY_LOG_LEVEL` is set, and nothing at all without the
/// `tracing-subscriber` feature.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("QUARRY_LOG_LEVEL").is_err() {
            return;
        }

        install(get_log_level(), get_log_format());
    });
}

/// Initialize logging from the `[debug]` table of `quarry.toml`.
///
/// Environment variables still win over the configured values.
pub fn init_from_config(config: &quarry_schema::QuarryConfig) {
    INIT.call_once(|| {
        let configured = config.debug.log_level.as_deref().and_then(parse_level);
        let level = match env::var("QUARRY_LOG_LEVEL") {
            Ok(_) => Some(get_log_level()),
            Err(_) if is_debug_enabled() => Some("debug"),
            Err(_) => configured,
        };
        let Some(level) = level else {
            return;
        };

        let format = match env::var("QUARRY_LOG_FORMAT") {
            Ok(f) => parse_format(&f),
            Err(_) => parse_format(&config.debug.log_format),
        };
        install(level, format);
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call this early in your program before
/// spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("QUARRY_LOG_LEVEL", level);
    }
    init();
}

/// Initialize debug-level logging.
///
/// Equivalent to setting `QUARRY_DEBUG=true` and calling `init()`.
pub fn init_debug() {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("QUARRY_DEBUG", "true");
    }
    init();
}

#[cfg(feature = "tracing-subscriber")]
fn install(level: &str, format: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_new(format!(
        "quarry={},quarry_query={},quarry_schema={}",
        level, level, level
    ))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        "json" => registry.with(fmt::layer().json()).try_init(),
        "compact" => registry.with(fmt::layer().compact()).try_init(),
        _ => registry.with(fmt::layer().pretty()).try_init(),
    };

    if installed.is_ok() {
        tracing::info!(level = level, format = format, "Quarry logging initialized");
    }
}

#[cfg(not(feature = "tracing-subscriber"))]
fn install(_level: &str, _format: &str) {}

/// Debug log that only fires when `QUARRY_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! quarry_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Some("trace"));
        assert_eq!(parse_level("warn"), Some("warn"));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("Pretty"), "pretty");
        assert_eq!(parse_format("compact"), "compact");
        assert_eq!(parse_format("xml"), "json");
    }

    #[test]
    fn test_debug_disabled_by_default() {
        // SAFETY: test runs in isolation
        unsafe {
            env::remove_var("QUARRY_DEBUG");
        }
        assert!(!is_debug_enabled());
    }
}
