//! Logging setup: a `tracing` fmt subscriber on stderr behind an `EnvFilter`.
//!
//! Stdout is reserved for command output and native-messaging frames, so
//! diagnostics never go there.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable checked first for a filter directive.
pub const LOG_ENV: &str = "PAGENOTE_LOG";

/// Directive used when nothing else is configured.
pub const DEFAULT_DIRECTIVE: &str = "pagenote=info";

/// Installs the global subscriber.
///
/// Directive precedence:
/// 1. `-v` / `-vv` (debug / trace for this crate)
/// 2. `PAGENOTE_LOG`, then `RUST_LOG`
/// 3. `configured` (the config file's `log` key)
/// 4. [`DEFAULT_DIRECTIVE`]
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(verbose: u8, configured: Option<&str>) {
    let from_env = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let directive = resolve_directive(verbose, from_env.as_deref(), configured);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("warning: ignoring invalid log filter '{directive}': {err}");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Picks the filter directive. Blank values count as unset.
pub fn resolve_directive(verbose: u8, from_env: Option<&str>, configured: Option<&str>) -> String {
    match verbose {
        0 => {}
        1 => return "pagenote=debug".to_string(),
        _ => return "pagenote=trace".to_string(),
    }

    [from_env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}
