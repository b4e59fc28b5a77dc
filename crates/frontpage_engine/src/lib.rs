//! Frontpage engine: listing retrieval and DOM extraction pipeline.
mod assemble;
mod decode;
mod dom;
mod extract;
mod fetch;
mod pipeline;
mod types;

pub use assemble::assemble_listing;
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use dom::{
    by_attribute, by_class, find_all, first_attribute, previous_element_sibling, NodeHandle,
};
pub use extract::{
    comment_count, is_promoted, story_author, story_link, story_rank, story_score, story_title,
    ExtractError,
};
pub use fetch::{FetchSettings, PageFetcher, ReqwestFetcher};
pub use pipeline::{scrape_listing, ResultBuffer, DEFAULT_PAGE_CAPACITY};
pub use types::{
    FetchError, FetchFailure, Listing, PageBytes, PageMetadata, ScrapeError, Story,
};
