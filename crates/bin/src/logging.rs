//! Log subscriber setup. Logs go to stderr so reports on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Library modules pinned to `warn` regardless of the requested level.
pub(crate) const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Filter directives for `level`, with noisy modules held at `warn`.
pub(crate) fn directives(level: &str) -> String {
    NOISY_MODULES
        .iter()
        .fold(level.to_string(), |mut acc, module| {
            acc.push_str(&format!(",{module}=warn"));
            acc
        })
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case that one stays in effect.
pub(crate) fn init(level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
    {
        Ok(()) => {
            tracing::debug!(level, "logging initialized");
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "subscriber already installed, keeping it");
            false
        }
    }
}
