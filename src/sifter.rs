//! the operation surface: probe, scrape, save
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Configuration,
    connector::{RetryPolicy, RetryingConnector},
    error::SiftError,
    extractor::{ExtractionTarget, ExtractorBuilder},
    fragment::Fragment,
    sink,
    transport::{HttpTransport, Transport},
};

/// Composes the connector, extractor, and sink into named scraping operations
///
/// One `Sifter` is bound to one endpoint (url plus the user agent baked into
/// its client) for its lifetime. Every scrape reconnects; no document is
/// cached between operations, so independent operations can run concurrently
/// against their own pages.
pub struct Sifter<T: Transport> {
    /// connection wrapper owning the retry/backoff behavior
    connector: RetryingConnector<T>,

    /// retry schedule used by the scrape operations
    scrape_policy: RetryPolicy,
}

/// Sifter implementation over the real http transport
impl Sifter<HttpTransport> {
    /// build a `Sifter` from the running configuration
    pub fn new(config: Arc<Configuration>, cancel: CancellationToken) -> Result<Self> {
        let url = Url::parse(&config.target_url)
            .with_context(|| format!("{} is not a valid url", config.target_url))?;

        let transport = HttpTransport::new(config.client.clone());

        Ok(Self::with_transport(
            transport,
            url,
            config.scrape_policy(),
            cancel,
        ))
    }
}

/// Sifter implementation
impl<T: Transport> Sifter<T> {
    /// build a `Sifter` over any transport; the seam used by tests
    pub fn with_transport(
        transport: T,
        url: Url,
        scrape_policy: RetryPolicy,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            connector: RetryingConnector::new(transport, url, cancel),
            scrape_policy,
        }
    }

    /// probe the endpoint with a single connection attempt
    ///
    /// never returns an error: a failed probe is `false` plus a diagnostic
    pub async fn test_connection(&self) -> bool {
        log::trace!("enter: test_connection");

        let outcome = match self.connector.connect(&RetryPolicy::single()).await {
            Ok(page) => {
                log::info!("successfully connected to {}", page.url());
                true
            }
            Err(err) => {
                log::warn!("connection could not be established: {}", err);
                false
            }
        };

        log::trace!("exit: test_connection -> {}", outcome);
        outcome
    }

    /// reconnect and extract heading-level elements (h1 through h4)
    pub async fn scrape_titles(&self) -> Result<Vec<Fragment>, SiftError> {
        self.scrape(ExtractionTarget::Titles).await
    }

    /// reconnect and extract anchor elements that carry a link target
    pub async fn scrape_links(&self) -> Result<Vec<Fragment>, SiftError> {
        self.scrape(ExtractionTarget::Links).await
    }

    /// reconnect and extract elements matching the given css selector
    pub async fn scrape_by_selector(&self, expression: &str) -> Result<Vec<Fragment>, SiftError> {
        self.scrape(ExtractionTarget::Selector(expression.to_string()))
            .await
    }

    /// write the given fragments to `path`, one record per line, replacing
    /// any previous content
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        fragments: &[Fragment],
    ) -> Result<usize, SiftError> {
        sink::save(path, fragments)
    }

    /// connect under the multi-attempt scrape policy, then extract `target`
    /// from the fetched page
    ///
    /// connection exhaustion is fatal here, unlike in `test_connection`
    async fn scrape(&self, target: ExtractionTarget) -> Result<Vec<Fragment>, SiftError> {
        log::trace!("enter: scrape({:?})", target);

        let page = self.connector.connect(&self.scrape_policy).await?;

        let fragments = ExtractorBuilder::with_page(&page)
            .target(target)
            .build()
            .extract()?;

        log::trace!("exit: scrape -> {} fragments", fragments.len());
        Ok(fragments)
    }
}
