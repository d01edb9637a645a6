//! Blog title and description, read from the first page.

use crate::constants::SELECTORS;
use scraper::Html;

/// Descriptive metadata of a blog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Trimmed text of the blog title, empty when absent
    pub title: String,
    /// Outer HTML of the description paragraph, empty when absent.
    ///
    /// Kept as markup because bloggers format it with links and line breaks.
    pub description: String,
}

pub fn get_blog_metadata(document: &Html) -> Metadata {
    let title = document
        .select(&SELECTORS.blog_title)
        .next()
        .map(|h1| h1.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&SELECTORS.description)
        .next()
        .map(|p| p.html())
        .unwrap_or_default();

    Metadata { title, description }
}
