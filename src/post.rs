//! Data structures produced by a reading session.
//!
//! A session yields one [`BlogProfile`] which owns every [`Post`] of the blog
//! in page order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skyblog_reader::{Fetcher, FetchError, SkyblogReader};
//! # struct Offline;
//! # impl Fetcher for Offline {
//! #     fn fetch_page(&self, _: &str, _: u32) -> Result<String, FetchError> { unimplemented!() }
//! #     fn fetch_resource(&self, _: &str) -> Result<String, FetchError> { unimplemented!() }
//! # }
//!
//! let profile = SkyblogReader::default().read("alice", &Offline)?;
//!
//! println!("Title: {}", profile.title);
//! for post in &profile.posts {
//!     println!("{} ({})", post.title, post.published_date);
//! }
//! # Ok::<(), skyblog_reader::SkyblogError>(())
//! ```

use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// One blog entry.
///
/// The body is kept as the original markup so the archive writer can render
/// it verbatim; it is never re-parsed by the reader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Text of the first link of the post, usually its headline.
    pub title: String,

    /// Outer HTML of the combined text and image block.
    pub text_body: String,

    /// Source of the image shown above the text, if any.
    pub image_url: Option<String>,

    /// Publication date exactly as the platform prints it.
    pub published_date: String,
}

/// Everything extracted from one blog.
///
/// ## Serialization
///
/// ```rust,no_run
/// # use skyblog_reader::BlogProfile;
/// # fn demo(profile: &BlogProfile) {
/// let json = serde_json::to_string_pretty(profile).unwrap();
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogProfile {
    /// Identifier of the blog, the subdomain on the platform.
    pub username: String,

    /// Blog title, empty when the page shows none.
    pub title: String,

    /// Outer HTML of the description paragraph, empty when absent.
    pub description: String,

    /// Number of pages of posts that were read.
    pub max_page_number: u32,

    pub background_image_url: Option<String>,
    pub profile_picture_url: Option<String>,

    /// Page background color.
    ///
    /// Like every color field below this holds hex digits without a leading
    /// `#`, the attribute's default, or an empty string when an inline
    /// stylesheet carries no value for it (blogs without posts).
    pub color_background: String,
    pub color_theme: String,
    pub color_block_title: String,
    pub color_text_title: String,
    pub color_articles_background: String,

    /// Posts ordered by page, then by position on the page.
    pub posts: Vec<Post>,
}

impl BlogProfile {
    pub(crate) fn assemble(
        username: &str,
        title: String,
        description: String,
        max_page_number: u32,
        theme: Theme,
        posts: Vec<Post>,
    ) -> Self {
        let Theme {
            colors,
            background_image_url,
            profile_picture_url,
        } = theme;

        Self {
            username: username.to_string(),
            title,
            description,
            max_page_number,
            background_image_url,
            profile_picture_url,
            color_background: colors.background,
            color_theme: colors.theme,
            color_block_title: colors.block_title,
            color_text_title: colors.text_title,
            color_articles_background: colors.articles_background,
            posts,
        }
    }
}
