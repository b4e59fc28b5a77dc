use frontpage_engine::{
    by_class, comment_count, find_all, is_promoted, story_author, story_link, story_rank,
    story_score, story_title, ExtractError, NodeHandle,
};
use pretty_assertions::assert_eq;
use scraper::Html;

const STORY_SUBTEXT: &str = r#"<span class="score">133 points</span> by <a class="hnuser">franciskim</a> | <a href="hide?id=1">hide</a> | <a href="item?id=1">80 comments</a> "#;

fn listing_page(rank: &str, href: &str, title: &str, subtext: &str) -> String {
    format!(
        r#"<html><body><table><tr class="athing"><td><span class="rank">{rank}</span></td><td><a class="storylink" href="{href}">{title}</a></td></tr><tr><td class="subtext">{subtext}</td></tr></table></body></html>"#
    )
}

fn default_page() -> String {
    listing_page("1.", "https://example.com/story", "A story", STORY_SUBTEXT)
}

fn fragment(document: &Html) -> NodeHandle<'_> {
    let fragments = find_all(Some(document.tree.root()), by_class("athing"));
    assert_eq!(fragments.len(), 1, "fixture should hold one fragment");
    fragments[0]
}

fn metadata_row(fragment: NodeHandle<'_>) -> NodeHandle<'_> {
    fragment
        .next_sibling()
        .and_then(|sibling| sibling.first_child())
        .expect("fixture should hold a metadata row")
}

#[test]
fn title_is_the_storylink_text() {
    let document = Html::parse_document(&default_page());
    assert_eq!(story_title(fragment(&document)).unwrap(), "A story");
}

#[test]
fn overlong_title_is_truncated_not_rejected() {
    let long = "x".repeat(300);
    let document = Html::parse_document(&listing_page(
        "1.",
        "https://example.com/story",
        &long,
        STORY_SUBTEXT,
    ));
    let title = story_title(fragment(&document)).unwrap();
    assert_eq!(title.chars().count(), 256);
}

#[test]
fn absolute_link_is_normalized() {
    let document = Html::parse_document(&listing_page(
        "1.",
        "HTTPS://EXAMPLE.COM",
        "A story",
        STORY_SUBTEXT,
    ));
    assert_eq!(
        story_link(fragment(&document)).unwrap(),
        "https://example.com/"
    );
}

#[test]
fn relative_link_is_kept_verbatim() {
    let document = Html::parse_document(&listing_page(
        "1.",
        "item?id=42",
        "A story",
        STORY_SUBTEXT,
    ));
    assert_eq!(story_link(fragment(&document)).unwrap(), "item?id=42");
}

#[test]
fn author_comes_from_the_metadata_row() {
    let document = Html::parse_document(&default_page());
    let row = metadata_row(fragment(&document));
    assert_eq!(story_author(row).unwrap(), "franciskim");
}

#[test]
fn rank_drops_the_trailing_dot() {
    let document = Html::parse_document(&default_page());
    assert_eq!(story_rank(fragment(&document)).unwrap(), 1);
}

#[test]
fn non_numeric_rank_is_an_error() {
    let document = Html::parse_document(&listing_page(
        "x.",
        "https://example.com/story",
        "A story",
        STORY_SUBTEXT,
    ));
    assert_eq!(
        story_rank(fragment(&document)).unwrap_err(),
        ExtractError::NotANumber {
            what: "rank",
            text: "x.".to_string(),
        }
    );
}

#[test]
fn score_strips_the_points_label() {
    let document = Html::parse_document(&default_page());
    let row = metadata_row(fragment(&document));
    assert_eq!(story_score(row).unwrap(), 133);
}

#[test]
fn singular_point_label_also_parses() {
    let subtext = r#"<span class="score">1 point</span> by <a class="hnuser">pg</a> | <a href="hide?id=1">hide</a> | <a href="item?id=1">discuss</a> "#;
    let document = Html::parse_document(&listing_page(
        "1.",
        "https://example.com/story",
        "A story",
        subtext,
    ));
    let row = metadata_row(fragment(&document));
    assert_eq!(story_score(row).unwrap(), 1);
}

#[test]
fn missing_score_is_a_structural_error() {
    let subtext = r#"by <a class="hnuser">franciskim</a> | <a href="hide?id=1">hide</a> | <a href="item?id=1">80 comments</a> "#;
    let document = Html::parse_document(&listing_page(
        "1.",
        "https://example.com/story",
        "A story",
        subtext,
    ));
    let row = metadata_row(fragment(&document));
    assert_eq!(
        story_score(row).unwrap_err(),
        ExtractError::NotExactlyOne {
            what: "score",
            found: 0,
        }
    );
}

#[test]
fn duplicated_storylink_is_a_structural_error() {
    let html = r#"<html><body><table><tr class="athing"><td><a class="storylink" href="a">one</a><a class="storylink" href="b">two</a></td></tr></table></body></html>"#;
    let document = Html::parse_document(html);
    assert_eq!(
        story_title(fragment(&document)).unwrap_err(),
        ExtractError::NotExactlyOne {
            what: "title",
            found: 2,
        }
    );
}

#[test]
fn comment_count_strips_the_comments_label() {
    let document = Html::parse_document(&default_page());
    let row = metadata_row(fragment(&document));
    assert_eq!(comment_count(row).unwrap(), 80);
}

#[test]
fn comment_count_handles_non_breaking_spaces() {
    let subtext = "<span class=\"score\">5 points</span> by <a class=\"hnuser\">pg</a> | <a href=\"hide?id=1\">hide</a> | <a href=\"item?id=1\">80\u{a0}comments</a> ";
    let document = Html::parse_document(&listing_page(
        "1.",
        "https://example.com/story",
        "A story",
        subtext,
    ));
    let row = metadata_row(fragment(&document));
    assert_eq!(comment_count(row).unwrap(), 80);
}

#[test]
fn discuss_means_zero_comments() {
    let subtext = r#"<span class="score">5 points</span> by <a class="hnuser">pg</a> | <a href="hide?id=1">hide</a> | <a href="item?id=1">discuss</a> "#;
    let document = Html::parse_document(&listing_page(
        "1.",
        "https://example.com/story",
        "A story",
        subtext,
    ));
    let row = metadata_row(fragment(&document));
    assert_eq!(comment_count(row).unwrap(), 0);
}

#[test]
fn row_ending_in_a_hide_link_is_promoted() {
    let subtext = r#"<span class="age">4 hours ago</span> | <a href="hide?id=2">hide</a> "#;
    let document = Html::parse_document(&listing_page(
        "2.",
        "https://sponsor.example/offer",
        "Sponsored thing",
        subtext,
    ));
    let row = metadata_row(fragment(&document));
    assert!(is_promoted(row).unwrap());
}

#[test]
fn ordinary_row_is_not_promoted() {
    let document = Html::parse_document(&default_page());
    let row = metadata_row(fragment(&document));
    assert!(!is_promoted(row).unwrap());
}

#[test]
fn promotion_check_fails_loudly_on_unrecognizable_markup() {
    // A missing subtext container is an error, not "not promoted".
    let html = r#"<html><body><table><tr class="athing"><td><a class="storylink" href="a">one</a></td></tr><tr><td class="other">nothing here</td></tr></table></body></html>"#;
    let document = Html::parse_document(html);
    let row = metadata_row(fragment(&document));
    assert_eq!(
        is_promoted(row).unwrap_err(),
        ExtractError::NotExactlyOne {
            what: "subtext",
            found: 0,
        }
    );
}
