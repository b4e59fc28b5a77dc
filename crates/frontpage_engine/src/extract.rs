//! Field extractors for story fragments and their metadata rows.
//!
//! Each extractor locates exactly one class-matched node under its scope,
//! reads the first child text node and parses it into the typed field.
//! Zero or several matches, a missing or non-text child, and unparsable
//! text are all errors: a field that cannot be parsed means the markup
//! format changed, and must not turn into a silent zero.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use url::Url;

use crate::dom::{by_class, find_all, first_attribute, previous_element_sibling, NodeHandle};

/// Titles and author names longer than this are truncated, not rejected.
const MAX_TEXT_CHARS: usize = 256;

static SCORE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D*points?").expect("score label pattern"));
static COMMENT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D*comments?").expect("comment label pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("expected exactly one {what} node, found {found}")]
    NotExactlyOne { what: &'static str, found: usize },
    #[error("{what} node has no child")]
    NoChild { what: &'static str },
    #[error("{what} node child is not a text node")]
    NotText { what: &'static str },
    #[error("{what} node is not an anchor element")]
    NotAnchor { what: &'static str },
    #[error("{what} node has no {attribute} attribute")]
    MissingAttribute {
        what: &'static str,
        attribute: &'static str,
    },
    #[error("link target is not a valid uri: {message}")]
    InvalidLink { message: String },
    #[error("no element precedes the last child of the subtext node")]
    MissingCommentLink,
    #[error("{what} text {text:?} is not a number")]
    NotANumber { what: &'static str, text: String },
}

/// Story title, from the fragment's sole `storylink` anchor.
pub fn story_title(fragment: NodeHandle<'_>) -> Result<String, ExtractError> {
    let anchor = sole_match(fragment.first_child(), "storylink", "title")?;
    let text = child_text(anchor, "title")?;
    Ok(truncate_chars(text, MAX_TEXT_CHARS))
}

/// Story link, from the `href` of the fragment's sole `storylink` anchor.
///
/// Absolute targets are normalized by a parse and re-stringify round trip;
/// relative targets are kept verbatim.
pub fn story_link(fragment: NodeHandle<'_>) -> Result<String, ExtractError> {
    let anchor = sole_match(fragment.first_child(), "storylink", "link")?;
    let element = anchor
        .value()
        .as_element()
        .filter(|element| element.name() == "a")
        .ok_or(ExtractError::NotAnchor { what: "link" })?;
    let href = first_attribute(element, "href").ok_or(ExtractError::MissingAttribute {
        what: "link",
        attribute: "href",
    })?;
    match Url::parse(href) {
        Ok(url) => Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(href.to_string()),
        Err(err) => Err(ExtractError::InvalidLink {
            message: err.to_string(),
        }),
    }
}

/// Author name, searched from the metadata row root itself.
pub fn story_author(row: NodeHandle<'_>) -> Result<String, ExtractError> {
    let node = sole_match(Some(row), "hnuser", "author")?;
    let text = child_text(node, "author")?;
    Ok(truncate_chars(text, MAX_TEXT_CHARS))
}

/// On-page rank, e.g. `"7."` parses to 7.
pub fn story_rank(fragment: NodeHandle<'_>) -> Result<u32, ExtractError> {
    let node = sole_match(fragment.first_child(), "rank", "rank")?;
    let text = child_text(node, "rank")?;
    let digits = text.strip_suffix('.').unwrap_or(text);
    digits.parse().map_err(|_| ExtractError::NotANumber {
        what: "rank",
        text: text.to_string(),
    })
}

/// Score, e.g. `"133 points"` parses to 133.
pub fn story_score(row: NodeHandle<'_>) -> Result<u32, ExtractError> {
    let node = sole_match(Some(row), "score", "score")?;
    let text = child_text(node, "score")?;
    parse_labelled_count(&SCORE_LABEL, text, "score")
}

/// Comment count, e.g. `"80 comments"` parses to 80. A `"discuss"` link
/// means no comments yet, which is a real zero, not an absent field.
pub fn comment_count(row: NodeHandle<'_>) -> Result<u32, ExtractError> {
    let text = comment_label(row)?;
    if text == "discuss" {
        return Ok(0);
    }
    parse_labelled_count(&COMMENT_LABEL, text, "comment")
}

/// Whether the metadata row belongs to a promoted entry.
///
/// Promoted rows have no comment link, so the locator lands on the `hide`
/// link instead. A locator failure propagates: unrecognizable markup is
/// not the same as "not promoted".
pub fn is_promoted(row: NodeHandle<'_>) -> Result<bool, ExtractError> {
    Ok(comment_label(row)? == "hide")
}

/// Text of the comment link: under the sole `subtext` node, the nearest
/// element sibling walking backwards from the last child.
fn comment_label(row: NodeHandle<'_>) -> Result<&str, ExtractError> {
    let subtext = sole_match(Some(row), "subtext", "subtext")?;
    let tail = subtext
        .last_child()
        .ok_or(ExtractError::NoChild { what: "subtext" })?;
    let link = previous_element_sibling(tail).ok_or(ExtractError::MissingCommentLink)?;
    child_text(link, "comment link")
}

fn sole_match<'a>(
    root: Option<NodeHandle<'a>>,
    class: &str,
    what: &'static str,
) -> Result<NodeHandle<'a>, ExtractError> {
    let matches = find_all(root, by_class(class));
    if matches.len() != 1 {
        return Err(ExtractError::NotExactlyOne {
            what,
            found: matches.len(),
        });
    }
    Ok(matches[0])
}

fn child_text<'a>(node: NodeHandle<'a>, what: &'static str) -> Result<&'a str, ExtractError> {
    let child = node
        .first_child()
        .ok_or(ExtractError::NoChild { what })?;
    match child.value() {
        Node::Text(text) => Ok(&**text),
        _ => Err(ExtractError::NotText { what }),
    }
}

fn parse_labelled_count(
    label: &Regex,
    text: &str,
    what: &'static str,
) -> Result<u32, ExtractError> {
    label
        .replace_all(text, "")
        .parse()
        .map_err(|_| ExtractError::NotANumber {
            what,
            text: text.to_string(),
        })
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
