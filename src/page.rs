use std::fmt;

use anyhow::Result;
use reqwest::{Response, StatusCode, Url};

/// A fetched page, derived from a `Response` to a submitted GET
///
/// One `Page` is produced per successful connection attempt and owned by the
/// operation that fetched it; nothing caches a `Page` across operations.
#[derive(Debug, Clone)]
pub struct Page {
    /// The final `Url` of this `Page`
    url: Url,

    /// The `StatusCode` the server answered with
    status: StatusCode,

    /// The full response text
    text: String,
}

/// implement Default trait for Page
impl Default for Page {
    /// return a default reqwest::Url and then normal defaults after that
    fn default() -> Self {
        Self {
            url: Url::parse("http://localhost").unwrap(),
            status: Default::default(),
            text: String::new(),
        }
    }
}

/// Implement Display for Page
impl fmt::Display for Page {
    /// formatter for Display
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Page {{ url: {}, status: {}, length: {} }}",
            self.url(),
            self.status(),
            self.text.len()
        )
    }
}

/// `Page` implementation
impl Page {
    /// Get the final `Url` of this `Page`
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the `StatusCode` of this `Page`
    pub fn status(&self) -> &StatusCode {
        &self.status
    }

    /// Get the full response text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Create a new `Page` from the given `Response`, consuming its body
    pub async fn from_response(response: Response) -> Result<Self> {
        let url = response.url().clone();
        let status = response.status();

        // .text() consumes the response
        let text = response.text().await?;

        Ok(Self { url, status, text })
    }

    /// constructor used by tests that need a page without a live server
    #[cfg(test)]
    pub fn faked(url: &str, text: &str) -> Self {
        Self {
            url: Url::parse(url).unwrap(),
            status: StatusCode::OK,
            text: text.to_string(),
        }
    }
}
