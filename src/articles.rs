//! Post extraction from one page of a blog.

use crate::constants::SELECTORS;
use crate::error::{Result, SkyblogError};
use crate::post::Post;
use scraper::{ElementRef, Html};

/// Extract the posts of one page, in document order.
///
/// A page without an articles container is an empty blog (or an empty page)
/// and yields no posts. Posts repeated by the platform are kept as-is.
///
/// # Errors
/// [`SkyblogError::MalformedArticle`] when a post lacks its title link, its
/// text block or its creation date.
pub fn extract_posts(document: &Html) -> Result<Vec<Post>> {
    let Some(container) = document.select(&SELECTORS.articles_container).next() else {
        return Ok(Vec::new());
    };

    container.select(&SELECTORS.post).map(extract_post).collect()
}

fn extract_post(element: ElementRef) -> Result<Post> {
    let post_id = element.value().id().unwrap_or_default();
    let missing = |what: &'static str| SkyblogError::MalformedArticle {
        post_id: post_id.to_string(),
        missing: what,
    };

    let title = element
        .select(&SELECTORS.anchor)
        .next()
        .map(|a| a.text().collect::<String>())
        .ok_or_else(|| missing("title link"))?;

    let text_body = element
        .select(&SELECTORS.text_image_container)
        .next()
        .map(|block| block.html())
        .ok_or_else(|| missing("text block"))?;

    let published_date = element
        .select(&SELECTORS.date_created)
        .next()
        .map(|time| time.text().collect::<String>())
        .ok_or_else(|| missing("creation date"))?;

    Ok(Post {
        title,
        text_body,
        image_url: post_image(element),
        published_date,
    })
}

fn post_image(element: ElementRef) -> Option<String> {
    element
        .select(&SELECTORS.image_container)
        .next()?
        .select(&SELECTORS.image)
        .next()?
        .value()
        .attr("src")
        .map(str::to_string)
}
