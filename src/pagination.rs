//! Page count discovery.
//!
//! A blog shows five posts per page. When it has more, the first page carries
//! a pagination list whose last item is a "next" arrow and whose second to
//! last item is the highest page number.

use crate::constants::SELECTORS;
use crate::error::{Result, SkyblogError};
use scraper::Html;

/// Number of pages of posts, read from the first page.
///
/// Returns `1` when the page has no pagination control.
///
/// # Errors
/// [`SkyblogError::MalformedPagination`] when the control exists but does not
/// end with a positive page number followed by the "next" item.
pub fn resolve_page_count(document: &Html) -> Result<u32> {
    let Some(pagination) = document.select(&SELECTORS.pagination).next() else {
        return Ok(1);
    };

    let items: Vec<_> = pagination.select(&SELECTORS.list_item).collect();
    if items.len() < 2 {
        return Err(SkyblogError::MalformedPagination(format!(
            "expected at least 2 items, found {}",
            items.len()
        )));
    }

    // Truncated lists render the last page as "...12"
    let raw = items[items.len() - 2].text().collect::<String>();
    let cleaned = raw.replace('.', "");
    let cleaned = cleaned.trim();

    match cleaned.parse::<u32>() {
        Ok(0) | Err(_) => Err(SkyblogError::MalformedPagination(format!(
            "{:?} is not a page number",
            raw.trim()
        ))),
        Ok(pages) => Ok(pages),
    }
}
