use crate::{
    utils::{module_colorizer, status_colorizer},
    DEFAULT_BACKOFF_MILLIS, DEFAULT_OUTPUT_NAME, DEFAULT_SCRAPE_ATTEMPTS, DEFAULT_USER_AGENT,
};
#[cfg(not(test))]
use std::process::exit;

/// simple helper to clean up some code reuse below; panics under test / exits in prod
pub(super) fn report_and_exit(err: &str) -> ! {
    eprintln!(
        "{} {}: {}",
        status_colorizer("ERROR"),
        module_colorizer("Configuration::new"),
        err
    );

    #[cfg(test)]
    panic!();
    #[cfg(not(test))]
    exit(1);
}

// the functions below provide defaults in the event that a pagesift-config.toml
// is found but one or more of the values isn't listed in the config. This way,
// we get the correct defaults upon Deserialization

/// default Configuration type for use in serialized output
pub(super) fn serialized_type() -> String {
    String::from("configuration")
}

/// default timeout value
pub(super) fn timeout() -> u64 {
    7
}

/// default user-agent
pub(super) fn user_agent() -> String {
    String::from(DEFAULT_USER_AGENT)
}

/// default number of connection attempts per scrape
pub(super) fn attempts() -> usize {
    DEFAULT_SCRAPE_ATTEMPTS
}

/// default base backoff wait in milliseconds
pub(super) fn delay() -> u64 {
    DEFAULT_BACKOFF_MILLIS
}

/// default output file
pub(super) fn output() -> String {
    String::from(DEFAULT_OUTPUT_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    /// report_and_exit should panic under test
    fn report_and_exit_panics_under_test() {
        report_and_exit("test");
    }

    #[test]
    /// deserialization defaults line up with the crate-level constants
    fn defaults_match_crate_constants() {
        assert_eq!(timeout(), 7);
        assert_eq!(attempts(), DEFAULT_SCRAPE_ATTEMPTS);
        assert_eq!(delay(), DEFAULT_BACKOFF_MILLIS);
        assert_eq!(user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(output(), DEFAULT_OUTPUT_NAME);
    }
}
