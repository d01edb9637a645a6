//! Configuration options for a reading session.
//!
//! This module provides [`ReaderOptions`] and [`ReaderOptionsBuilder`]
//! for configuring where blogs live and how a session fetches them.
//!
//! ## Example
//!
//! ```rust
//! use skyblog_reader::ReaderOptions;
//!
//! // Using default options
//! let options = ReaderOptions::default();
//! assert_eq!(options.page_url("alice", 2), "https://alice.skyrock.com/2.html");
//!
//! // Using builder for custom options
//! let options = ReaderOptions::builder()
//!     .max_pages(20)
//!     .page_workers(4)
//!     .fetch_profile_picture(false)
//!     .build();
//! ```

use std::time::Duration;
use url::Url;

/// Configuration options for [`SkyblogReader`](crate::SkyblogReader).
///
/// ## Creating Options
///
/// ```rust
/// use skyblog_reader::ReaderOptions;
///
/// let options = ReaderOptions::builder()
///     .blog_domain("skyrock.com")
///     .page_workers(2)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// Domain every blog is a subdomain of.
    ///
    /// Default: `"skyrock.com"`
    pub blog_domain: String,

    /// Page, relative to the blog root, that shows the full profile picture.
    ///
    /// Default: `"photo.html"`
    pub profile_picture_page: String,

    /// Fetch the profile picture page during theme extraction.
    ///
    /// When `false` the profile picture falls back directly to the avatar
    /// shown on the first page, saving one request per blog.
    ///
    /// Default: `true`
    pub fetch_profile_picture: bool,

    /// Upper bound on the number of pages read for one blog.
    ///
    /// The resolved page count is clamped to this value. Set to 0 to disable
    /// the limit.
    ///
    /// Default: `0` (no limit)
    pub max_pages: u32,

    /// Number of pages fetched at the same time.
    ///
    /// Pages are always returned in ascending order regardless of this value.
    /// Keep it small to stay polite with the remote service.
    ///
    /// Default: `1`
    pub page_workers: usize,

    /// User agent sent by the HTTP fetcher.
    pub user_agent: String,

    /// Per-request timeout used by the HTTP fetcher.
    ///
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            blog_domain: "skyrock.com".to_string(),
            profile_picture_page: "photo.html".to_string(),
            fetch_profile_picture: true,
            max_pages: 0,
            page_workers: 1,
            user_agent: concat!("skyblog-reader/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ReaderOptions {
    /// Creates a new builder for ReaderOptions
    pub fn builder() -> ReaderOptionsBuilder {
        ReaderOptionsBuilder::default()
    }

    /// Root URL of a blog, with a trailing slash
    pub fn blog_url(&self, username: &str) -> String {
        format!("https://{}.{}/", username, self.blog_domain)
    }

    /// URL of one page of posts; pages are numbered from 1
    pub fn page_url(&self, username: &str, page: u32) -> String {
        format!("{}{}.html", self.blog_url(username), page)
    }

    /// URL of the page holding the full-size profile picture
    pub fn profile_picture_url(&self, username: &str) -> String {
        format!("{}{}", self.blog_url(username), self.profile_picture_page)
    }

    /// Resolve a possibly relative or protocol-relative reference found on a
    /// blog page. Unresolvable references are returned untouched.
    pub fn resolve_url(&self, username: &str, reference: &str) -> String {
        Url::parse(&self.blog_url(username))
            .and_then(|base| base.join(reference))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| reference.to_string())
    }

    /// Page count after applying [`max_pages`](Self::max_pages)
    pub(crate) fn clamp_pages(&self, pages: u32) -> u32 {
        if self.max_pages == 0 {
            pages
        } else {
            pages.min(self.max_pages)
        }
    }
}

/// Builder for [`ReaderOptions`].
#[derive(Default)]
pub struct ReaderOptionsBuilder {
    blog_domain: Option<String>,
    profile_picture_page: Option<String>,
    fetch_profile_picture: Option<bool>,
    max_pages: Option<u32>,
    page_workers: Option<usize>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl ReaderOptionsBuilder {
    /// Set the domain blogs are hosted under
    pub fn blog_domain(mut self, domain: impl Into<String>) -> Self {
        self.blog_domain = Some(domain.into());
        self
    }

    /// Set the profile picture page
    pub fn profile_picture_page(mut self, page: impl Into<String>) -> Self {
        self.profile_picture_page = Some(page.into());
        self
    }

    /// Enable or disable the profile picture page request
    pub fn fetch_profile_picture(mut self, fetch: bool) -> Self {
        self.fetch_profile_picture = Some(fetch);
        self
    }

    /// Set the maximum number of pages to read
    pub fn max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// Set the number of concurrent page fetches; 0 is treated as 1
    pub fn page_workers(mut self, workers: usize) -> Self {
        self.page_workers = Some(workers.max(1));
        self
    }

    /// Set the HTTP user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the HTTP request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the ReaderOptions
    pub fn build(self) -> ReaderOptions {
        let defaults = ReaderOptions::default();
        ReaderOptions {
            blog_domain: self.blog_domain.unwrap_or(defaults.blog_domain),
            profile_picture_page: self
                .profile_picture_page
                .unwrap_or(defaults.profile_picture_page),
            fetch_profile_picture: self
                .fetch_profile_picture
                .unwrap_or(defaults.fetch_profile_picture),
            max_pages: self.max_pages.unwrap_or(defaults.max_pages),
            page_workers: self.page_workers.unwrap_or(defaults.page_workers),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let options = ReaderOptions::default();
        assert_eq!(options.blog_url("bob"), "https://bob.skyrock.com/");
        assert_eq!(options.page_url("bob", 7), "https://bob.skyrock.com/7.html");
        assert_eq!(
            options.profile_picture_url("bob"),
            "https://bob.skyrock.com/photo.html"
        );
    }

    #[test]
    fn test_resolve_url() {
        let options = ReaderOptions::default();
        assert_eq!(
            options.resolve_url("bob", "//static.skyrock.net/css/blog.css"),
            "https://static.skyrock.net/css/blog.css"
        );
        assert_eq!(
            options.resolve_url("bob", "css/perso.css"),
            "https://bob.skyrock.com/css/perso.css"
        );
        assert_eq!(
            options.resolve_url("bob", "http://other.net/a.css"),
            "http://other.net/a.css"
        );
    }

    #[test]
    fn test_builder_overrides_and_clamp() {
        let options = ReaderOptions::builder()
            .blog_domain("example.org")
            .max_pages(3)
            .page_workers(0)
            .build();

        assert_eq!(options.page_url("bob", 1), "https://bob.example.org/1.html");
        assert_eq!(options.page_workers, 1);
        assert_eq!(options.clamp_pages(10), 3);
        assert_eq!(options.clamp_pages(2), 2);
        assert_eq!(ReaderOptions::default().clamp_pages(99), 99);
        assert!(options.fetch_profile_picture);
    }
}
