//! # skyblog-reader
//!
//! Extraction engine for archiving Skyrock blogs ("skyblogs").
//!
//! ## Overview
//!
//! Skyblog pages were written over many years by the platform and by their
//! owners, and come in two layouts that keep their theme in different places.
//! This crate turns the pages of one blog into a [`BlogProfile`]: its posts in
//! order, its title and description, its five theme colors and its pictures,
//! ready to be rendered into a static archive.
//!
//! ## Key Features
//!
//! - **Pagination**: discovers how many pages of posts a blog has
//! - **Posts**: title, verbatim body markup, optional image and date of every post
//! - **Theme**: colors from either a pasted inline stylesheet or a linked one,
//!   each attribute with its own default
//! - **Pictures**: background picture and profile picture URLs
//! - **Pluggable fetching**: all network access goes through the [`Fetcher`] trait;
//!   enable the `http` feature for a ready-made blocking client
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use skyblog_reader::{Fetcher, FetchError, SkyblogReader};
//!
//! struct Offline;
//!
//! impl Fetcher for Offline {
//!     fn fetch_page(&self, identifier: &str, page: u32) -> Result<String, FetchError> {
//!         std::fs::read_to_string(format!("dump/{}/{}.html", identifier, page))
//!             .map_err(|e| FetchError::new(identifier, e.to_string()))
//!     }
//!
//!     fn fetch_resource(&self, url: &str) -> Result<String, FetchError> {
//!         Err(FetchError::new(url, "offline"))
//!     }
//! }
//!
//! let profile = SkyblogReader::default().read("alice", &Offline)?;
//! println!("{}: {} posts", profile.title, profile.posts.len());
//! # Ok::<(), skyblog_reader::SkyblogError>(())
//! ```
//!
//! ## Building Blocks
//!
//! Each step is also usable on its own, on an already parsed page:
//!
//! ```rust
//! use scraper::Html;
//! use skyblog_reader::{extract_posts, resolve_page_count, ColorAttribute, ThemeSource};
//!
//! let page = Html::parse_document("<html><body></body></html>");
//! assert_eq!(resolve_page_count(&page).unwrap(), 1);
//! assert!(extract_posts(&page).unwrap().is_empty());
//!
//! let source = ThemeSource::inline("\nbody{background-color:#112233}\n");
//! assert_eq!(source.color(ColorAttribute::Background), "112233");
//! ```
//!
//! ## Error Handling
//!
//! Structural problems (an unreadable page count, a post without title or
//! date) and fetch failures abort the whole session with
//! [`SkyblogError::Session`]. Theme lookups never fail; they fall back to
//! documented defaults instead.
//!
//! ## Logging
//!
//! Progress is reported through [`tracing`] events. Install a subscriber in the
//! application to see them.

mod articles;
mod constants;
mod error;
mod fetcher;
#[cfg(feature = "http")]
mod http;
mod metadata;
mod options;
mod pagination;
mod post;
mod reader;
mod stylesheet;
mod theme;

// Public exports
pub use articles::extract_posts;
pub use error::{FetchError, Result, SkyblogError, Stage};
pub use fetcher::Fetcher;
#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use metadata::{get_blog_metadata, Metadata};
pub use options::{ReaderOptions, ReaderOptionsBuilder};
pub use pagination::resolve_page_count;
pub use post::{BlogProfile, Post};
pub use reader::SkyblogReader;
pub use stylesheet::{Declaration, Rule, Stylesheet};
pub use theme::{
    background_image_url, extract_theme, profile_picture_url, ColorAttribute, InlineStyle, Theme,
    ThemeColors, ThemeSource,
};
