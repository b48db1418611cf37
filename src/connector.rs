//! bounded retry-with-backoff around a `Transport`
use std::time::Duration;

use reqwest::Url;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    error::SiftError, page::Page, transport::Transport, DEFAULT_BACKOFF_MILLIS,
    DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_SCRAPE_ATTEMPTS,
};

/// Attempt budget and backoff schedule governing one connection sequence
///
/// Immutable for the duration of one `connect` call; the orchestrator picks a
/// policy per operation (a single attempt for the connectivity probe, several
/// for a scrape).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RetryPolicy {
    /// total number of attempts to make before giving up; always at least 1
    max_attempts: usize,

    /// wait before the first retry
    initial_delay: Duration,

    /// growth factor applied to the wait after each retry
    multiplier: f64,
}

/// implement a default for RetryPolicy
impl Default for RetryPolicy {
    /// the multi-attempt schedule used by scrape operations
    fn default() -> Self {
        Self::new(
            DEFAULT_SCRAPE_ATTEMPTS,
            Duration::from_millis(DEFAULT_BACKOFF_MILLIS),
            DEFAULT_BACKOFF_MULTIPLIER,
        )
    }
}

/// RetryPolicy implementation
impl RetryPolicy {
    /// create a policy; a `max_attempts` of 0 is bumped to 1
    pub fn new(max_attempts: usize, initial_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            multiplier,
        }
    }

    /// single-attempt policy used by the connectivity probe; never sleeps
    pub fn single() -> Self {
        Self::new(1, Duration::ZERO, 1.0)
    }

    /// number of attempts this policy allows
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// wait before retry number `retry` (1-indexed)
    ///
    /// the first retry waits `initial_delay`; each one after that waits
    /// `multiplier` times longer than the previous
    pub fn delay_for(&self, retry: usize) -> Duration {
        debug_assert!(retry >= 1);
        self.initial_delay
            .mul_f64(self.multiplier.powi(retry as i32 - 1))
    }
}

/// Wraps a `Transport` with a bounded retry loop
///
/// Owns failure classification (anything the transport reports is retryable),
/// backoff timing, and retry exhaustion. A cancellation signal received while
/// waiting between attempts aborts the loop promptly instead of being folded
/// into another retry.
pub struct RetryingConnector<T: Transport> {
    /// underlying fetch implementation
    transport: T,

    /// the url every attempt targets
    url: Url,

    /// token used to abort a pending backoff wait
    cancel: CancellationToken,
}

/// RetryingConnector implementation
impl<T: Transport> RetryingConnector<T> {
    /// given a transport and a target url, create a `RetryingConnector`
    pub fn new(transport: T, url: Url, cancel: CancellationToken) -> Self {
        Self {
            transport,
            url,
            cancel,
        }
    }

    /// the url this connector targets
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// attempt to fetch the page, retrying failed attempts per `policy`
    ///
    /// the first success wins; no further attempts are made. each failure
    /// before the budget runs out is logged, then waited out according to the
    /// backoff schedule. the connection error is returned only once every
    /// attempt has failed
    pub async fn connect(&self, policy: &RetryPolicy) -> Result<Page, SiftError> {
        log::trace!("enter: connect({:?})", policy);

        let budget = policy.max_attempts();

        for attempt in 1..=budget {
            match self.transport.fetch(&self.url).await {
                Ok(page) => {
                    log::debug!("connected to {} on attempt {}", self.url, attempt);
                    log::trace!("exit: connect -> {}", page);
                    return Ok(page);
                }
                Err(err) => {
                    log::warn!(
                        "connection attempt {}/{} to {} failed: {:#}",
                        attempt,
                        budget,
                        self.url,
                        err
                    );
                }
            }

            if attempt < budget {
                let delay = policy.delay_for(attempt);
                log::info!("waiting {:?} before attempt {}", delay, attempt + 1);

                tokio::select! {
                    _ = self.cancel.cancelled() => {
                        log::warn!("cancelled while waiting to retry {}", self.url);
                        log::trace!("exit: connect -> Cancelled");
                        return Err(SiftError::Cancelled);
                    }
                    _ = sleep(delay) => {}
                }
            }
        }

        log::trace!("exit: connect -> Connection");
        Err(SiftError::Connection {
            url: self.url.to_string(),
            attempts: budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::bail;
    use async_trait::async_trait;

    use super::*;

    /// transport that fails its first `fail_times` calls and succeeds after
    struct FlakyTransport {
        fail_times: usize,
        calls: AtomicUsize,
    }

    impl FlakyTransport {
        fn new(fail_times: usize) -> Self {
            Self {
                fail_times,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FlakyTransport {
        async fn fetch(&self, url: &Url) -> anyhow::Result<Page> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

            if call <= self.fail_times {
                bail!("connection refused");
            }

            Ok(Page::faked(url.as_str(), "<html></html>"))
        }
    }

    /// a policy with waits short enough for tests
    fn quick_policy(max_attempts: usize) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(10), 2.0)
    }

    fn target() -> Url {
        Url::parse("http://localhost/").unwrap()
    }

    #[test]
    /// a zero attempt budget is clamped up to a single attempt
    fn policy_clamps_zero_attempts_to_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO, 2.0);
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    /// the wait before retry k is initial_delay * multiplier^(k-1)
    fn policy_backoff_schedule_is_exponential() {
        let policy = RetryPolicy::new(4, Duration::from_secs(2), 2.0);

        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    /// a non-doubling multiplier is honored by the schedule
    fn policy_backoff_schedule_honors_multiplier() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100), 3.0);

        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(300));
        assert_eq!(policy.delay_for(3), Duration::from_millis(900));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    /// a transport that succeeds immediately yields a page after one attempt,
    /// even when the budget allows more
    async fn connect_returns_on_first_success() {
        let transport = FlakyTransport::new(0);
        let connector = RetryingConnector::new(transport, target(), CancellationToken::new());

        let page = connector.connect(&quick_policy(3)).await.unwrap();

        assert_eq!(page.url().as_str(), "http://localhost/");
        assert_eq!(connector.transport.calls(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    /// failures on attempts 1..n-1 followed by success on attempt n yield a page
    async fn connect_succeeds_on_final_attempt() {
        let transport = FlakyTransport::new(2);
        let connector = RetryingConnector::new(transport, target(), CancellationToken::new());

        let page = connector.connect(&quick_policy(3)).await.unwrap();

        assert!(!page.text().is_empty());
        assert_eq!(connector.transport.calls(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    /// failing on every attempt exhausts the budget, makes exactly n attempts,
    /// and reports the count in the error
    async fn connect_exhausts_budget_and_reports_attempts() {
        let transport = FlakyTransport::new(usize::MAX);
        let connector = RetryingConnector::new(transport, target(), CancellationToken::new());

        let result = connector.connect(&quick_policy(3)).await;

        assert!(matches!(
            result,
            Err(SiftError::Connection { attempts: 3, .. })
        ));
        assert_eq!(connector.transport.calls(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    /// a single-attempt policy performs exactly one attempt and never sleeps
    async fn connect_single_attempt_never_sleeps() {
        let transport = FlakyTransport::new(usize::MAX);
        let connector = RetryingConnector::new(transport, target(), CancellationToken::new());

        let start = std::time::Instant::now();
        let result = connector.connect(&RetryPolicy::single()).await;

        assert!(matches!(
            result,
            Err(SiftError::Connection { attempts: 1, .. })
        ));
        assert_eq!(connector.transport.calls(), 1);
        // no backoff wait should have happened
        assert!(start.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    /// cancellation observed during the backoff wait aborts the loop instead of
    /// silently continuing into another attempt
    async fn connect_cancelled_during_backoff_aborts_promptly() {
        let transport = FlakyTransport::new(usize::MAX);
        let token = CancellationToken::new();
        token.cancel();

        let connector = RetryingConnector::new(transport, target(), token);

        // a wait long enough that only cancellation can explain a fast return
        let policy = RetryPolicy::new(3, Duration::from_secs(60), 2.0);

        let start = std::time::Instant::now();
        let result = connector.connect(&policy).await;

        assert!(matches!(result, Err(SiftError::Cancelled)));
        assert_eq!(connector.transport.calls(), 1);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
