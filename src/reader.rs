//! Main reader struct driving one extraction session per blog.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skyblog_reader::{Fetcher, FetchError, ReaderOptions, SkyblogReader};
//! # struct Offline;
//! # impl Fetcher for Offline {
//! #     fn fetch_page(&self, _: &str, _: u32) -> Result<String, FetchError> { unimplemented!() }
//! #     fn fetch_resource(&self, _: &str) -> Result<String, FetchError> { unimplemented!() }
//! # }
//! # let fetcher = Offline;
//!
//! let reader = SkyblogReader::new(ReaderOptions::builder().page_workers(3).build());
//! let profile = reader.read("alice", &fetcher)?;
//!
//! println!("{} pages, {} posts", profile.max_page_number, profile.posts.len());
//! println!("Background: #{}", profile.color_background);
//! # Ok::<(), skyblog_reader::SkyblogError>(())
//! ```

use crate::{
    articles::extract_posts,
    error::{Result, SkyblogError, Stage},
    fetcher::Fetcher,
    metadata::get_blog_metadata,
    options::ReaderOptions,
    pagination::resolve_page_count,
    post::{BlogProfile, Post},
    theme::extract_theme,
};
use scraper::Html;
use std::thread;
use tracing::{debug, info, warn};

/// Reads whole blogs into [`BlogProfile`]s.
///
/// ## Lifecycle
///
/// A session fetches the first page, resolves how many pages the blog has,
/// reads the posts of every page in ascending order, then resolves the theme
/// from the first page. Any failure ends the session with
/// [`SkyblogError::Session`], naming the blog and the stage that failed; no
/// partial profile is ever returned.
///
/// The reader holds no per-blog state and can be reused for any number of
/// blogs.
#[derive(Debug, Clone, Default)]
pub struct SkyblogReader {
    options: ReaderOptions,
}

impl SkyblogReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Read every page of `username`'s blog through `fetcher`.
    pub fn read<F: Fetcher + ?Sized>(&self, username: &str, fetcher: &F) -> Result<BlogProfile> {
        info!(username = %username, "Reading blog");

        let first_page = fetcher
            .fetch_page(username, 1)
            .map_err(SkyblogError::from)
            .map_err(fail(username, Stage::FetchingFirstPage))?;
        let document = Html::parse_document(&first_page);

        let page_count =
            resolve_page_count(&document).map_err(fail(username, Stage::ResolvingPagination))?;
        let max_page_number = self.options.clamp_pages(page_count);
        if max_page_number < page_count {
            warn!(
                username = %username,
                pages = page_count,
                max_pages = self.options.max_pages,
                "Page count exceeds the configured limit, reading the first pages only"
            );
        }
        debug!(pages = max_page_number, "Number of pages");

        let mut posts =
            extract_posts(&document).map_err(fail(username, Stage::ExtractingArticles(1)))?;
        debug!(page = 1, count = posts.len(), "Extracted posts");
        posts.extend(self.read_remaining_pages(username, fetcher, max_page_number)?);
        debug!(count = posts.len(), "Retrieved articles");

        let metadata = get_blog_metadata(&document);
        debug!(title = %metadata.title, "Blog title");

        let theme = extract_theme(&document, username, fetcher, &self.options)
            .map_err(fail(username, Stage::ExtractingTheme))?;

        info!(
            username = %username,
            pages = max_page_number,
            posts = posts.len(),
            "Finished reading blog"
        );
        Ok(BlogProfile::assemble(
            username,
            metadata.title,
            metadata.description,
            max_page_number,
            theme,
            posts,
        ))
    }

    /// Posts of pages 2 to `last`, in page order.
    ///
    /// With more than one worker, pages are fetched in batches of
    /// `page_workers` scoped threads; each batch is joined in page order.
    fn read_remaining_pages<F: Fetcher + ?Sized>(
        &self,
        username: &str,
        fetcher: &F,
        last: u32,
    ) -> Result<Vec<Post>> {
        let pages: Vec<u32> = (2..=last).collect();
        let mut posts = Vec::new();

        if self.options.page_workers <= 1 {
            for page in pages {
                posts.extend(read_page(username, fetcher, page)?);
            }
            return Ok(posts);
        }

        for batch in pages.chunks(self.options.page_workers) {
            let results: Vec<Result<Vec<Post>>> = thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|&page| scope.spawn(move || read_page(username, fetcher, page)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect()
            });

            for result in results {
                posts.extend(result?);
            }
        }

        Ok(posts)
    }
}

fn read_page<F: Fetcher + ?Sized>(username: &str, fetcher: &F, page: u32) -> Result<Vec<Post>> {
    let markup = fetcher
        .fetch_page(username, page)
        .map_err(SkyblogError::from)
        .map_err(fail(username, Stage::FetchingPage(page)))?;
    let posts = extract_posts(&Html::parse_document(&markup))
        .map_err(fail(username, Stage::ExtractingArticles(page)))?;
    debug!(page = page, count = posts.len(), "Extracted posts");
    Ok(posts)
}

/// Wrap a failure into a session error for `username` at `stage`
fn fail(username: &str, stage: Stage) -> impl FnOnce(SkyblogError) -> SkyblogError + '_ {
    move |source| SkyblogError::Session {
        username: username.to_string(),
        stage,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn page(titles: &[&str], pagination: Option<u32>) -> String {
        let posts: String = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                format!(
                    r#"<div id="a-{i}"><a href="/">{title}</a><div class="text-image-container"><p>{title}</p></div><time itemprop="dateCreated">jour {i}</time></div>"#
                )
            })
            .collect();
        let pagination = pagination
            .map(|last| {
                let items: String = (1..=last).map(|n| format!("<li>{n}</li>")).collect();
                format!(r#"<ul class="pagination">{items}<li>»</li></ul>"#)
            })
            .unwrap_or_default();
        format!(
            r#"<html><head></head><body><h1 class="blogtitle">Blog</h1><div id="articles_container">{posts}</div>{pagination}</body></html>"#
        )
    }

    struct Pages {
        pages: HashMap<u32, String>,
        fetched: Mutex<Vec<u32>>,
    }

    impl Pages {
        fn new(pages: Vec<String>) -> Self {
            Self {
                pages: (1..).zip(pages).collect(),
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    impl Fetcher for Pages {
        fn fetch_page(&self, identifier: &str, page: u32) -> std::result::Result<String, FetchError> {
            self.fetched.lock().unwrap().push(page);
            self.pages
                .get(&page)
                .cloned()
                .ok_or_else(|| FetchError::new(format!("{identifier}/{page}"), "404"))
        }

        fn fetch_resource(&self, url: &str) -> std::result::Result<String, FetchError> {
            Err(FetchError::new(url, "404"))
        }
    }

    fn reader() -> SkyblogReader {
        SkyblogReader::new(ReaderOptions::builder().fetch_profile_picture(false).build())
    }

    #[test]
    fn test_read_single_page_blog() {
        let fetcher = Pages::new(vec![page(&["A", "B"], None)]);
        let profile = reader().read("bob", &fetcher).unwrap();

        assert_eq!(profile.max_page_number, 1);
        assert_eq!(profile.title, "Blog");
        assert_eq!(profile.posts.len(), 2);
        assert_eq!(*fetcher.fetched.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_posts_follow_page_order() {
        let fetcher = Pages::new(vec![
            page(&["1a", "1b"], Some(3)),
            page(&["2a"], Some(3)),
            page(&["3a", "1b"], Some(3)),
        ]);
        let profile = reader().read("bob", &fetcher).unwrap();

        let titles: Vec<_> = profile.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["1a", "1b", "2a", "3a", "1b"]);
        assert_eq!(profile.max_page_number, 3);
    }

    #[test]
    fn test_concurrent_pages_keep_order() {
        let pages: Vec<String> = (1..=7)
            .map(|n| page(&[format!("p{n}-a").as_str(), format!("p{n}-b").as_str()], Some(7)))
            .collect();
        let fetcher = Pages::new(pages);
        let reader = SkyblogReader::new(
            ReaderOptions::builder()
                .fetch_profile_picture(false)
                .page_workers(3)
                .build(),
        );

        let profile = reader.read("bob", &fetcher).unwrap();
        let titles: Vec<_> = profile.posts.iter().map(|p| p.title.clone()).collect();
        let expected: Vec<_> = (1..=7)
            .flat_map(|n| [format!("p{n}-a"), format!("p{n}-b")])
            .collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_max_pages_clamps_page_count() {
        let fetcher = Pages::new(vec![page(&["a"], Some(50)), page(&["b"], Some(50))]);
        let reader = SkyblogReader::new(
            ReaderOptions::builder()
                .fetch_profile_picture(false)
                .max_pages(2)
                .build(),
        );

        let profile = reader.read("bob", &fetcher).unwrap();
        assert_eq!(profile.max_page_number, 2);
        assert_eq!(profile.posts.len(), 2);
    }

    #[test]
    fn test_missing_page_fails_session() {
        let fetcher = Pages::new(vec![page(&["a"], Some(3)), page(&["b"], Some(3))]);
        let err = reader().read("bob", &fetcher).unwrap_err();

        match err {
            SkyblogError::Session { username, stage, source } => {
                assert_eq!(username, "bob");
                assert_eq!(stage, Stage::FetchingPage(3));
                assert!(matches!(*source, SkyblogError::Fetch(_)));
            }
            other => panic!("expected session error, got {other:?}"),
        }
    }

    #[test]
    fn test_first_page_failure() {
        let fetcher = Pages::new(Vec::new());
        let err = reader().read("nobody", &fetcher).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::FetchingFirstPage));
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_malformed_article_fails_session() {
        let broken = r#"<html><body><div id="articles_container"><div id="a-1"><p>no link</p></div></div></body></html>"#;
        let fetcher = Pages::new(vec![broken.to_string()]);
        let err = reader().read("bob", &fetcher).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::ExtractingArticles(1)));
    }

    #[test]
    fn test_malformed_pagination_fails_session() {
        let broken = r#"<html><body><div id="articles_container"></div><ul class="pagination"><li>suite</li><li>»</li></ul></body></html>"#;
        let fetcher = Pages::new(vec![broken.to_string()]);
        let err = reader().read("bob", &fetcher).unwrap_err();

        assert_eq!(err.stage(), Some(Stage::ResolvingPagination));
        match err {
            SkyblogError::Session { source, .. } => {
                assert!(matches!(*source, SkyblogError::MalformedPagination(_)));
            }
            other => panic!("expected session error, got {other:?}"),
        }
        assert_eq!(*fetcher.fetched.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_profile_picture_fetch_failure_fails_session() {
        let fetcher = Pages::new(vec![page(&["a"], None)]);
        let err = SkyblogReader::default().read("bob", &fetcher).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::ExtractingTheme));
    }
}
