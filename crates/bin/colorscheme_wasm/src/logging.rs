//! Console logging set-up.

use colorscheme_adapter_web::console::ConsoleMakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global subscriber, once per page.
///
/// Later calls keep the first subscriber. An unparsable `filter` falls back
/// to [`DEFAULT_LOG_FILTER`] and is reported once the subscriber is up.
pub fn init(filter: &str) {
    let (env_filter, rejected) = env_filter(filter);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_target(true)
        .try_init()
        .is_ok();

    if let Some(err) = rejected {
        tracing::warn!(
            filter,
            fallback = DEFAULT_LOG_FILTER,
            error = %err,
            "invalid log filter"
        );
    }
    if installed {
        tracing::debug!(filter, "console logging enabled");
    }
}

fn env_filter(filter: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_valid_filter() {
        let (filter, rejected) = env_filter("colorscheme_app=debug");
        assert!(rejected.is_none());
        assert_eq!(filter.to_string(), "colorscheme_app=debug");
    }

    #[test]
    fn should_fall_back_to_default_filter_when_invalid() {
        let (filter, rejected) = env_filter("colorscheme=loud");
        assert!(rejected.is_some());
        assert_eq!(filter.to_string(), DEFAULT_LOG_FILTER);
    }
}
