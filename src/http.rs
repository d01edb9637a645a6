//! Blocking HTTP implementation of [`Fetcher`], behind the `http` feature.

use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::options::ReaderOptions;
use reqwest::blocking::Client;
use tracing::debug;

/// Fetches blog pages from the live platform.
///
/// Non-success status codes are reported as [`FetchError`]s. No retries are
/// attempted.
///
/// ```rust,no_run
/// use skyblog_reader::{HttpFetcher, ReaderOptions, SkyblogReader};
///
/// let options = ReaderOptions::default();
/// let fetcher = HttpFetcher::new(&options)?;
/// let profile = SkyblogReader::new(options).read("alice", &fetcher)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    options: ReaderOptions,
}

impl HttpFetcher {
    pub fn new(options: &ReaderOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()
            .map_err(|e| FetchError::new(options.blog_url("*"), e.to_string()))?;

        Ok(Self {
            client,
            options: options.clone(),
        })
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Requesting page");
        self.client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| FetchError::new(url, e.to_string()))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_page(&self, identifier: &str, page: u32) -> Result<String, FetchError> {
        self.get(&self.options.page_url(identifier, page))
    }

    fn fetch_resource(&self, url: &str) -> Result<String, FetchError> {
        self.get(url)
    }
}
