//! Theme color and picture extraction.
//!
//! Skyrock pages carry their colors in one of two places:
//!
//! - **inline**: a personalised stylesheet pasted into
//!   `<style id="template_css_perso">`, minified, where most values are found
//!   by matching fixed fragments of the raw text;
//! - **external**: a stylesheet linked through `<link id="template_css">`,
//!   fetched once and scanned rule by rule.
//!
//! The layout is detected once per blog into a [`ThemeSource`]. Each of the
//! five colors then goes through the row of the color rule table describing it:
//! its default, how each layout finds it, and what an inline miss means.
//!
//! Inline misses on the background, title text and articles background colors
//! yield an empty string rather than the default. The platform emits those
//! fragments only for blogs that have posts, so the empty value tells the
//! archive writer the blog is empty. External lookups always fall back to the
//! default.

use crate::constants::{
    CLASS_BLOCK, CLASS_BLOCK_TITLE, CLASS_CONSULT, CLASS_DESCRIPTION, REGEXPS, SELECTORS,
};
use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::options::ReaderOptions;
use crate::stylesheet::Stylesheet;
use scraper::Html;
use tracing::{debug, warn};

/// The five theme colors of a blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: String,
    pub theme: String,
    pub block_title: String,
    pub text_title: String,
    pub articles_background: String,
}

/// Colors and pictures making up a blog's look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub colors: ThemeColors,
    pub background_image_url: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorAttribute {
    Background,
    Theme,
    BlockTitle,
    TextTitle,
    ArticlesBackground,
}

impl ColorAttribute {
    pub const ALL: [ColorAttribute; 5] = [
        ColorAttribute::Background,
        ColorAttribute::Theme,
        ColorAttribute::BlockTitle,
        ColorAttribute::TextTitle,
        ColorAttribute::ArticlesBackground,
    ];

    /// Value used when a lookup finds nothing
    pub fn default_value(self) -> &'static str {
        self.rule().default
    }

    fn rule(self) -> &'static ColorRule {
        // COLOR_RULES is indexed in declaration order
        let rule = &COLOR_RULES[self as usize];
        debug_assert_eq!(rule.attribute, self);
        rule
    }
}

/// What an unsuccessful inline lookup resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineMiss {
    Empty,
    Default,
}

struct ColorRule {
    attribute: ColorAttribute,
    default: &'static str,
    inline: fn(&InlineStyle) -> Option<String>,
    inline_miss: InlineMiss,
    external: fn(&Stylesheet) -> Option<String>,
}

static COLOR_RULES: [ColorRule; 5] = [
    ColorRule {
        attribute: ColorAttribute::Background,
        default: "ffffff",
        inline: inline_background,
        inline_miss: InlineMiss::Empty,
        external: external_background,
    },
    ColorRule {
        attribute: ColorAttribute::Theme,
        default: "000000",
        inline: inline_theme,
        inline_miss: InlineMiss::Default,
        external: external_theme,
    },
    ColorRule {
        attribute: ColorAttribute::BlockTitle,
        default: "000000",
        inline: inline_block_title,
        inline_miss: InlineMiss::Default,
        external: external_block_title,
    },
    ColorRule {
        attribute: ColorAttribute::TextTitle,
        default: "fff",
        inline: inline_text_title,
        inline_miss: InlineMiss::Empty,
        external: external_text_title,
    },
    ColorRule {
        attribute: ColorAttribute::ArticlesBackground,
        default: "ffffff",
        inline: inline_articles_background,
        inline_miss: InlineMiss::Empty,
        external: external_articles_background,
    },
];

/// Text of the personalised stylesheet, along with its rules.
///
/// The pasted stylesheet is minified onto its second line; only that line is
/// read as rules, while fragment lookups run over the whole text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineStyle {
    pub raw: String,
    pub rules: Stylesheet,
}

impl InlineStyle {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let rules = Stylesheet::parse(raw.lines().nth(1).unwrap_or(&raw));
        Self { raw, rules }
    }
}

/// Where a blog's colors come from, decided once per blog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    Inline(InlineStyle),
    External(Stylesheet),
}

impl ThemeSource {
    /// Inspect the first page and, for the external layout, fetch the linked
    /// stylesheet.
    ///
    /// A page with neither an inline stylesheet nor a stylesheet link is
    /// treated as an external layout with no rules.
    pub fn detect<F: Fetcher + ?Sized>(
        document: &Html,
        username: &str,
        fetcher: &F,
        options: &ReaderOptions,
    ) -> Result<Self> {
        if let Some(style) = document.select(&SELECTORS.inline_stylesheet).next() {
            debug!("Using inline theme stylesheet");
            return Ok(ThemeSource::inline(style.text().collect::<String>()));
        }

        let href = document
            .select(&SELECTORS.stylesheet_link)
            .next()
            .and_then(|link| link.value().attr("href"));
        let Some(href) = href else {
            warn!(username = %username, "No theme stylesheet found, using default colors");
            return Ok(ThemeSource::External(Stylesheet::default()));
        };

        let url = options.resolve_url(username, href);
        debug!(url = %url, "Fetching theme stylesheet");
        let css = fetcher.fetch_resource(&url)?;
        Ok(ThemeSource::external(&css))
    }

    /// Inline layout over the pasted stylesheet text
    pub fn inline(css: impl Into<String>) -> Self {
        ThemeSource::Inline(InlineStyle::new(css))
    }

    /// External layout over the fetched stylesheet text
    pub fn external(css: &str) -> Self {
        ThemeSource::External(Stylesheet::parse(css))
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ThemeSource::Inline(_))
    }

    /// Resolve one color. Never fails: misses become the attribute's default,
    /// or an empty string for the inline attributes that signal an empty blog.
    pub fn color(&self, attribute: ColorAttribute) -> String {
        let rule = attribute.rule();
        let found = match self {
            ThemeSource::Inline(style) => (rule.inline)(style),
            ThemeSource::External(sheet) => (rule.external)(sheet),
        };

        match found {
            Some(color) => color,
            None if self.is_inline() && rule.inline_miss == InlineMiss::Empty => String::new(),
            None => rule.default.to_string(),
        }
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors {
            background: self.color(ColorAttribute::Background),
            theme: self.color(ColorAttribute::Theme),
            block_title: self.color(ColorAttribute::BlockTitle),
            text_title: self.color(ColorAttribute::TextTitle),
            articles_background: self.color(ColorAttribute::ArticlesBackground),
        }
    }
}

/// Resolve the complete theme of a blog from its first page.
pub fn extract_theme<F: Fetcher + ?Sized>(
    document: &Html,
    username: &str,
    fetcher: &F,
    options: &ReaderOptions,
) -> Result<Theme> {
    let source = ThemeSource::detect(document, username, fetcher, options)?;
    let colors = source.colors();
    debug!(inline = source.is_inline(), colors = ?colors, "Resolved theme colors");

    let background_image_url = background_image_url(document);
    debug!(url = ?background_image_url, "Background picture");

    let profile_picture_url = profile_picture_url(document, username, fetcher, options)?;
    debug!(url = ?profile_picture_url, "Profile picture");

    Ok(Theme {
        colors,
        background_image_url,
        profile_picture_url,
    })
}

/// URL of the page background picture, read from the `style` attribute of
/// `<body>`.
pub fn background_image_url(document: &Html) -> Option<String> {
    let style = document.select(&SELECTORS.body).next()?.value().attr("style")?;
    REGEXPS
        .url_literal
        .find(style)
        .map(|literal| literal.as_str().to_string())
}

/// URL of the profile picture.
///
/// The full-size photo page is preferred; the avatar on the first page is
/// used when the photo page has none or when fetching it is disabled.
pub fn profile_picture_url<F: Fetcher + ?Sized>(
    document: &Html,
    username: &str,
    fetcher: &F,
    options: &ReaderOptions,
) -> Result<Option<String>> {
    if options.fetch_profile_picture {
        let url = options.profile_picture_url(username);
        debug!(url = %url, "Fetching profile picture page");
        let page = Html::parse_document(&fetcher.fetch_resource(&url)?);
        if let Some(src) = image_source(&page, &SELECTORS.profile_photo) {
            return Ok(Some(src));
        }
    }

    Ok(image_source(document, &SELECTORS.avatar))
}

fn image_source(document: &Html, selector: &scraper::Selector) -> Option<String> {
    document
        .select(selector)
        .next()?
        .value()
        .attr("src")
        .filter(|src| !src.trim().is_empty())
        .map(str::to_string)
}

fn first_capture(regex: &regex::Regex, text: &str) -> Option<String> {
    regex.captures(text).map(|caps| caps[1].to_string())
}

/// Hex color of `property` in the first rule matching `fragment` that
/// declares it. A value without a hex color is a miss.
fn rule_value(sheet: &Stylesheet, fragment: &str, property: &str) -> Option<String> {
    sheet
        .find_rule(fragment, |rule| rule.declaration(property).is_some())?
        .declaration(property)?
        .hex_color()
        .map(str::to_string)
}

fn inline_background(style: &InlineStyle) -> Option<String> {
    first_capture(&REGEXPS.inline_background, &style.raw)
}

fn inline_theme(style: &InlineStyle) -> Option<String> {
    rule_value(&style.rules, CLASS_DESCRIPTION, "background-color")
}

fn inline_block_title(style: &InlineStyle) -> Option<String> {
    rule_value(&style.rules, CLASS_BLOCK_TITLE, "color")
}

fn inline_text_title(style: &InlineStyle) -> Option<String> {
    first_capture(&REGEXPS.inline_text_title, &style.raw)
}

fn inline_articles_background(style: &InlineStyle) -> Option<String> {
    first_capture(&REGEXPS.inline_articles_background, &style.raw)
}

fn external_background(sheet: &Stylesheet) -> Option<String> {
    rule_value(sheet, CLASS_CONSULT, "background")
}

fn external_theme(sheet: &Stylesheet) -> Option<String> {
    rule_value(sheet, CLASS_DESCRIPTION, "background")
}

// Same class as the title text color, but the platform stores the block color
// in `background` here while the inline layout uses `color`.
fn external_block_title(sheet: &Stylesheet) -> Option<String> {
    rule_value(sheet, CLASS_BLOCK_TITLE, "background")
}

fn external_text_title(sheet: &Stylesheet) -> Option<String> {
    rule_value(sheet, CLASS_BLOCK_TITLE, "color")
}

fn external_articles_background(sheet: &Stylesheet) -> Option<String> {
    let is_background = |name: &str| name.contains("background");
    sheet
        .find_rule(CLASS_BLOCK, |rule| {
            rule.declarations.iter().any(|d| is_background(&d.name))
        })?
        .declarations
        .iter()
        .find(|d| is_background(&d.name))?
        .hex_color()
        .map(str::to_string)
}
