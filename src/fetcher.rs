//! The boundary between the extraction engine and the network.
//!
//! The reader only ever asks for two things: a numbered page of a blog, and an
//! arbitrary resource (the linked stylesheet, the profile picture page). How
//! those are retrieved, retried or cached is up to the implementation.

use crate::error::FetchError;

/// Source of raw page text.
///
/// Implementations must be [`Sync`] so that a session configured with several
/// page workers can share one fetcher across threads.
///
/// ## Example
///
/// ```rust
/// use skyblog_reader::{FetchError, Fetcher};
/// use std::collections::HashMap;
///
/// struct Canned(HashMap<String, String>);
///
/// impl Fetcher for Canned {
///     fn fetch_page(&self, identifier: &str, page: u32) -> Result<String, FetchError> {
///         self.fetch_resource(&format!("{}/{}", identifier, page))
///     }
///
///     fn fetch_resource(&self, url: &str) -> Result<String, FetchError> {
///         self.0
///             .get(url)
///             .cloned()
///             .ok_or_else(|| FetchError::new(url, "not found"))
///     }
/// }
/// ```
pub trait Fetcher: Sync {
    /// Fetch page `page` (starting at 1) of the blog named `identifier`.
    fn fetch_page(&self, identifier: &str, page: u32) -> Result<String, FetchError>;

    /// Fetch any other resource by absolute URL.
    fn fetch_resource(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch_page(&self, identifier: &str, page: u32) -> Result<String, FetchError> {
        (**self).fetch_page(identifier, page)
    }

    fn fetch_resource(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_resource(url)
    }
}
