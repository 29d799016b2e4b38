//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with report output on stdout.
//! `TEMPLINT_LOG` takes precedence over `RUST_LOG`; both accept the usual
//! `EnvFilter` directives. Without either, `-v` flags pick the level.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted before `RUST_LOG`
pub const LOG_ENV_VAR: &str = "TEMPLINT_LOG";

/// Default filter for the given verbosity flags
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2);

    // Fails only if a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0, false), "warn");
        assert_eq!(default_directive(0, true), "error");
        assert_eq!(default_directive(1, false), "info");
        assert_eq!(default_directive(1, true), "info");
        assert_eq!(default_directive(2, false), "debug");
        assert_eq!(default_directive(5, false), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(0, true);
        init_logging(3, false);
    }
}
