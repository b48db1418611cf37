//! the seam between the retry loop and the actual network
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::page::Page;

/// A single GET attempt: given a url, produce a `Page` or a transport failure
///
/// The retry loop never looks inside a failure; any error returned here is
/// treated as retryable until the attempt budget runs out. A fake
/// implementation of this trait backs the unit tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// fetch the document at `url`, following the client's configured policies
    async fn fetch(&self, url: &Url) -> Result<Page>;
}

/// `Transport` implemented over a configured `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Instance of [reqwest::Client](https://docs.rs/reqwest/latest/reqwest/struct.Client.html)
    client: Client,
}

impl HttpTransport {
    /// given a configured client, create an `HttpTransport`
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// issue one GET; an error status from the server is a failed attempt,
    /// the same as a refused connection
    async fn fetch(&self, url: &Url) -> Result<Page> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("could not reach {url}"))?
            .error_for_status()
            .with_context(|| format!("{url} answered with an error status"))?;

        Page::from_response(response).await
    }
}
