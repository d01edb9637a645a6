//! Error types for the skyblog reader.

use std::fmt;
use thiserror::Error;

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, SkyblogError>;

/// Failure reported by a [`Fetcher`](crate::Fetcher) implementation.
///
/// The reader never retries; whatever policy the fetcher applies has already
/// been exhausted by the time this error surfaces.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch {url}: {reason}")]
pub struct FetchError {
    /// The page or resource URL that could not be retrieved
    pub url: String,
    /// Human readable cause
    pub reason: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while reading a blog
#[derive(Error, Debug)]
pub enum SkyblogError {
    /// A page or resource could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The pagination control exists but its page count is unreadable
    #[error("Malformed pagination: {0}")]
    MalformedPagination(String),

    /// A post is missing one of its mandatory elements
    #[error("Malformed article {post_id}: missing {missing}")]
    MalformedArticle {
        post_id: String,
        missing: &'static str,
    },

    /// A reading session aborted; wraps the underlying cause
    #[error("Reading blog \"{username}\" failed while {stage}: {source}")]
    Session {
        username: String,
        stage: Stage,
        #[source]
        source: Box<SkyblogError>,
    },
}

impl SkyblogError {
    /// Stage at which a session failed, if this is a session error
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SkyblogError::Session { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Steps of a reading session, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchingFirstPage,
    ResolvingPagination,
    FetchingPage(u32),
    ExtractingArticles(u32),
    ExtractingTheme,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::FetchingFirstPage => write!(f, "fetching the first page"),
            Stage::ResolvingPagination => write!(f, "resolving pagination"),
            Stage::FetchingPage(page) => write!(f, "fetching page {}", page),
            Stage::ExtractingArticles(page) => write!(f, "extracting articles of page {}", page),
            Stage::ExtractingTheme => write!(f, "extracting the theme"),
        }
    }
}
