//! Selectors and patterns describing the Skyrock page layout.
//!
//! Everything here is compiled once. The literals are fixed by the platform's
//! markup and stylesheets.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in regex {pattern:?}: {e}"))
}

pub(crate) struct Selectors {
    pub pagination: Selector,
    pub list_item: Selector,
    pub articles_container: Selector,
    pub post: Selector,
    pub anchor: Selector,
    pub text_image_container: Selector,
    pub image_container: Selector,
    pub image: Selector,
    pub date_created: Selector,
    pub inline_stylesheet: Selector,
    pub stylesheet_link: Selector,
    pub body: Selector,
    pub profile_photo: Selector,
    pub avatar: Selector,
    pub blog_title: Selector,
    pub description: Selector,
}

pub(crate) static SELECTORS: Lazy<Selectors> = Lazy::new(|| Selectors {
    pagination: selector("ul.pagination"),
    list_item: selector("li"),
    articles_container: selector("div#articles_container"),
    post: selector(r#"div[id^="a-"]"#),
    anchor: selector("a"),
    text_image_container: selector("div.text-image-container"),
    image_container: selector("div.image-container"),
    image: selector("img"),
    date_created: selector(r#"time[itemprop="dateCreated"]"#),
    inline_stylesheet: selector("style#template_css_perso"),
    stylesheet_link: selector("link#template_css"),
    body: selector("body"),
    profile_photo: selector("img#laphoto"),
    avatar: selector("img.avatar"),
    blog_title: selector("h1.blogtitle"),
    description: selector("p.description"),
});

pub(crate) struct Regexps {
    pub inline_background: Regex,
    pub inline_text_title: Regex,
    pub inline_articles_background: Regex,
    pub url_literal: Regex,
}

pub(crate) static REGEXPS: Lazy<Regexps> = Lazy::new(|| Regexps {
    inline_background: regex(r"body\{background-color:#([a-fA-F0-9]{3,6})"),
    inline_text_title: regex(r"#linkPopup\{color:#([a-fA-F0-9]{3,6})"),
    inline_articles_background: regex(
        r"#promos_ads\{color:#[a-fA-F0-9]{3,6};background-color:#([a-fA-F0-9]{3,6})",
    ),
    url_literal: regex(r#"https?://[^\s)'";]+"#),
});

/// Selector fragments matched against stylesheet rules.
pub(crate) const CLASS_CONSULT: &str = ".consult,";
pub(crate) const CLASS_DESCRIPTION: &str = ".bloc-description";
pub(crate) const CLASS_BLOCK_TITLE: &str = ".bloc_title";
pub(crate) const CLASS_BLOCK: &str = ".bloc,";
