// SPDX-License-Identifier: MPL-2.0

//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` wins over `fallback_filter`.
/// Logs go to stderr; stdout carries command output.
pub fn init(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_and_bad_filter_do_not_panic() {
        init("photogram=debug");
        init("not a [valid filter");
        tracing::debug!("still logging");
    }
}
