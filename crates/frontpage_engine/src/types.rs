use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use crate::decode::DecodeError;
use crate::extract::ExtractError;

/// Which listing feed to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Listing {
    #[default]
    FrontPage,
    Newest,
}

impl Listing {
    pub fn path(self) -> &'static str {
        match self {
            Listing::FrontPage => "news",
            Listing::Newest => "newest",
        }
    }
}

/// One ranked listing entry.
///
/// Promoted entries carry no author, score or comment count; those fields
/// are `None` and serialize as `null`. `rank` is the entry's 1-based
/// position on its source page, taken from the page markup as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    pub title: String,
    #[serde(rename = "uri")]
    pub link: String,
    pub author: Option<String>,
    #[serde(rename = "points")]
    pub score: Option<u32>,
    pub comments: Option<u32>,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBytes {
    pub bytes: Bytes,
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub page: u32,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchFailure,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FetchFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::InvalidUrl => write!(f, "invalid url"),
            FetchFailure::HttpStatus(code) => write!(f, "http status {code}"),
            FetchFailure::Timeout => write!(f, "timeout"),
            FetchFailure::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FetchFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FetchFailure::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FetchFailure::Network => write!(f, "network error"),
        }
    }
}

/// A failed run. The page number identifies which retrieval task hit the
/// error first; sibling tasks are cancelled and their outcomes discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("page {page}: {source}")]
    Fetch { page: u32, source: FetchError },
    #[error("page {page}: {source}")]
    Decode { page: u32, source: DecodeError },
    #[error("page {page}: {source}")]
    Extract { page: u32, source: ExtractError },
    #[error("page {page}: task aborted")]
    Aborted { page: u32 },
    #[error("{merged} of {expected} page tasks reported back")]
    Incomplete { merged: usize, expected: usize },
}
