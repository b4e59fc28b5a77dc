//! Walks story fragments of one listing page and builds `Story` records.

use scraper::Html;

use crate::dom::{by_class, find_all};
use crate::extract::{self, ExtractError};
use crate::types::Story;

/// Parse one listing page and assemble its stories in document order.
///
/// Each `athing` fragment yields one record. The metadata row is the
/// fragment's next sibling's first child; a fragment without one is a
/// truncated trailing entry and is skipped. Promoted entries keep their
/// title, link and rank but carry no author, score or comment count. Any
/// extractor failure aborts the whole page.
pub fn assemble_listing(html: &str) -> Result<Vec<Story>, ExtractError> {
    let document = Html::parse_document(html);
    let mut stories = Vec::new();

    for fragment in find_all(Some(document.tree.root()), by_class("athing")) {
        let title = extract::story_title(fragment)?;
        let link = extract::story_link(fragment)?;

        let Some(row) = fragment.next_sibling().and_then(|sibling| sibling.first_child()) else {
            continue;
        };

        let (author, score, comments) = if extract::is_promoted(row)? {
            (None, None, None)
        } else {
            (
                Some(extract::story_author(row)?),
                Some(extract::story_score(row)?),
                Some(extract::comment_count(row)?),
            )
        };

        let rank = extract::story_rank(fragment)?;

        stories.push(Story {
            title,
            link,
            author,
            score,
            comments,
            rank,
        });
    }

    Ok(stories)
}
