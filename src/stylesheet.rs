//! Stylesheet rules, parsed with `cssparser`.
//!
//! Theme colors are looked up by scanning rules in document order and taking
//! the first one whose selector text contains a given class fragment. That is
//! all this module supports: no specificity, no cascade, no selector matching.
//! At-rules (`@import`, `@media`, ...) are skipped along with their blocks, and
//! comments or braces inside strings and `url()` never end a rule.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};
use tracing::trace;

/// One `property: value` pair of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name
    pub name: String,
    /// Raw value text, trimmed
    pub value: String,
    /// Hash tokens of the value, in order, without their `#`
    hashes: Vec<String>,
}

impl Declaration {
    /// First 3 or 6 digit hex color of the value, without its `#`.
    ///
    /// `url(fond.png) #0044cc repeat-x` gives `0044cc`; `red` gives `None`.
    pub fn hex_color(&self) -> Option<&str> {
        self.hashes
            .iter()
            .map(String::as_str)
            .find(|hash| is_hex_color(hash))
    }
}

fn is_hex_color(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector text as written, trimmed
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// First declaration for exactly this property
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}

/// Style rules in the order they appear in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn parse(css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rule_parser = TopLevelParser;

        let rules = StyleSheetParser::new(&mut parser, &mut rule_parser)
            .filter_map(|result| match result {
                Ok(rule) => Some(rule),
                Err((_, skipped)) => {
                    trace!(skipped = skipped, "Skipping stylesheet rule");
                    None
                }
            })
            .collect();

        Self { rules }
    }

    /// First rule, in document order, whose selector contains `fragment` and
    /// that satisfies `predicate`.
    pub fn find_rule<P>(&self, fragment: &str, predicate: P) -> Option<&Rule>
    where
        P: Fn(&Rule) -> bool,
    {
        self.rules
            .iter()
            .find(|rule| rule.selector.contains(fragment) && predicate(rule))
    }
}

/// Consume the rest of `input` and return its source text, trimmed
fn remaining_text(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next().is_ok() {}
    input.slice_from(start).trim().to_string()
}

/// Style rules at the top level. At-rules use the rejecting defaults, so they
/// come out of the iterator as errors and are dropped.
struct TopLevelParser;

impl<'i> QualifiedRuleParser<'i> for TopLevelParser {
    type Prelude = String;
    type QualifiedRule = Rule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(remaining_text(input))
    }

    fn parse_block<'t>(
        &mut self,
        selector: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let mut body_parser = DeclarationListParser;
        let declarations = RuleBodyParser::new(input, &mut body_parser)
            .filter_map(|result| result.ok())
            .collect();
        Ok(Rule {
            selector,
            declarations,
        })
    }
}

impl<'i> AtRuleParser<'i> for TopLevelParser {
    type Prelude = ();
    type AtRule = Rule;
    type Error = ();
}

/// Declarations of one rule block; nested rules are not supported.
struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        let mut hashes = Vec::new();
        while let Ok(token) = input.next() {
            if let Token::Hash(value) | Token::IDHash(value) = token {
                hashes.push(value.to_string());
            }
        }

        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value: input.slice_from(start).trim().to_string(),
            hashes,
        })
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_in_document_order() {
        let sheet = Stylesheet::parse(
            ".consult, .page { background: #123456 url(a.png); color:#fff }\n.bloc_title{background:#aabbcc}",
        );

        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(sheet.rules[0].selector, ".consult, .page");
        assert_eq!(
            sheet.rules[0].declaration("background").and_then(|d| d.hex_color()),
            Some("123456")
        );
        assert_eq!(sheet.rules[0].declaration("color").unwrap().value, "#fff");
        assert_eq!(sheet.rules[1].selector, ".bloc_title");
    }

    #[test]
    fn test_comments_and_at_rules_are_skipped() {
        let css = r#"
            @charset "utf-8";
            /* .bloc_title { color: #000 } */
            @media screen { .bloc_title { color: #111 } .x { color: #222 } }
            .bloc_title { COLOR: #333; }
        "#;
        let sheet = Stylesheet::parse(css);

        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].declaration("color").unwrap().value, "#333");
    }

    #[test]
    fn test_comment_markers_inside_strings() {
        let sheet = Stylesheet::parse(
            r#".a:after{content:"/*"} .bloc_title{background:#aabbcc} .b:after{content:"*/"}"#,
        );

        let selectors: Vec<_> = sheet.rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec![".a:after", ".bloc_title", ".b:after"]);
        assert_eq!(
            sheet.rules[1].declaration("background").and_then(|d| d.hex_color()),
            Some("aabbcc")
        );
    }

    #[test]
    fn test_braces_inside_strings_and_urls() {
        let sheet = Stylesheet::parse(
            r#".a { content: "}"; background: url("x}.png") #010203 } .b { color: #040506 }"#,
        );

        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(
            sheet.rules[0].declaration("background").and_then(|d| d.hex_color()),
            Some("010203")
        );
        assert_eq!(sheet.rules[1].selector, ".b");
    }

    #[test]
    fn test_hex_color_skips_other_tokens() {
        let sheet = Stylesheet::parse(
            ".x { background: url(fond.png) #0044cc repeat-x; color: red; border-color: #12345 #abc }",
        );
        let rule = &sheet.rules[0];

        assert_eq!(rule.declaration("background").unwrap().hex_color(), Some("0044cc"));
        assert_eq!(rule.declaration("color").unwrap().hex_color(), None);
        assert_eq!(rule.declaration("border-color").unwrap().hex_color(), Some("abc"));
    }

    #[test]
    fn test_find_rule_takes_first_structural_match() {
        let sheet = Stylesheet::parse(
            ".bloc_title { color: #111 } .bloc_title { background: #222 } .bloc_title { background: #333 }",
        );

        let rule = sheet
            .find_rule(".bloc_title", |r| r.declaration("background").is_some())
            .unwrap();
        assert_eq!(rule.declaration("background").unwrap().value, "#222");
        assert!(sheet.find_rule(".bloc-description", |_| true).is_none());
    }

    #[test]
    fn test_unterminated_block() {
        let sheet = Stylesheet::parse(".a { color: red } .b { color: blue");
        let selectors: Vec<_> = sheet.rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec![".a", ".b"]);
        assert_eq!(sheet.rules[1].declaration("color").unwrap().value, "blue");
    }

    #[test]
    fn test_empty_input() {
        assert!(Stylesheet::parse("").rules.is_empty());
        assert!(Stylesheet::parse("   \n").rules.is_empty());
    }
}
