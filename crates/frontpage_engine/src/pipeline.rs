//! Concurrent page retrieval and rank-ordered merge.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::assemble::assemble_listing;
use crate::decode::decode_page;
use crate::fetch::PageFetcher;
use crate::types::{ScrapeError, Story};

/// Stories per listing page on the upstream site.
pub const DEFAULT_PAGE_CAPACITY: usize = 30;

/// Retrieve `requested` stories from the listing behind `fetcher`.
///
/// One task per page runs fetch, decode and assembly concurrently; results
/// arrive in completion order and are merged positionally, so the output
/// is rank-ordered no matter which page finishes first. The first failed
/// page wins. The run returns its error with no partial output, and a
/// cancellation token stops the sibling tasks at their next await point.
/// The output ends at the first unfilled slot, so a short final page
/// shortens the result instead of padding it.
pub async fn scrape_listing(
    fetcher: Arc<dyn PageFetcher>,
    requested: usize,
    page_capacity: usize,
) -> Result<Vec<Story>, ScrapeError> {
    let page_count = requested.div_ceil(page_capacity);
    let cancel = CancellationToken::new();
    let (outcome_tx, mut outcome_rx) = mpsc::channel(page_count.max(1));

    for page in 1..=page_count as u32 {
        let fetcher = Arc::clone(&fetcher);
        let outcome_tx = outcome_tx.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => Err(ScrapeError::Aborted { page }),
                outcome = scrape_page(fetcher.as_ref(), page) => outcome,
            };
            let _ = outcome_tx.send((page, outcome)).await;
        });
    }
    drop(outcome_tx);

    let mut buffer = ResultBuffer::new(requested, page_capacity);
    let mut merged = 0;
    while let Some((page, outcome)) = outcome_rx.recv().await {
        match outcome {
            Ok(stories) => {
                log::debug!("page {page}: merged {} stories", stories.len());
                buffer.insert_page(page, stories);
                merged += 1;
            }
            Err(err) => {
                cancel.cancel();
                return Err(err);
            }
        }
    }
    if merged < page_count {
        return Err(ScrapeError::Incomplete {
            merged,
            expected: page_count,
        });
    }
    Ok(buffer.finish())
}

async fn scrape_page(fetcher: &dyn PageFetcher, page: u32) -> Result<Vec<Story>, ScrapeError> {
    let output = fetcher
        .fetch_page(page)
        .await
        .map_err(|source| ScrapeError::Fetch { page, source })?;
    let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref())
        .map_err(|source| ScrapeError::Decode { page, source })?;
    assemble_listing(&decoded.html).map_err(|source| ScrapeError::Extract { page, source })
}

/// Pre-sized, positionally addressed merge target.
///
/// Page `p` owns the index block starting at `(p - 1) * page_capacity`,
/// so pages never write overlapping slots and arrival order cannot change
/// the final contents. Records past the buffer's capacity are dropped.
#[derive(Debug)]
pub struct ResultBuffer {
    slots: Vec<Option<Story>>,
    page_capacity: usize,
}

impl ResultBuffer {
    pub fn new(capacity: usize, page_capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            page_capacity,
        }
    }

    pub fn insert_page(&mut self, page: u32, stories: Vec<Story>) {
        let offset = (page as usize - 1) * self.page_capacity;
        for (index, story) in stories.into_iter().enumerate() {
            match self.slots.get_mut(offset + index) {
                Some(slot) => *slot = Some(story),
                None => break,
            }
        }
    }

    /// Stories in rank order, ending at the first unfilled slot.
    pub fn finish(self) -> Vec<Story> {
        self.slots.into_iter().map_while(|slot| slot).collect()
    }
}
