//! Stderr logging setup.
//!
//! Stdout belongs to the hook protocol, so diagnostics always go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (EnvFilter syntax).
pub const LOG_ENV: &str = "CODE_HOOK_LOG";

/// Install the global stderr subscriber. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
