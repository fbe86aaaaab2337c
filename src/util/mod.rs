use crate::models::FeedItem;

pub(crate) const FEED_PAGE_SIZE: u32 = 20;
pub(crate) const FEED_PAGES: u32 = 10;

/// One page of the demo feed. Pages past the end are empty.
pub(crate) fn feed_page(page: u32, page_size: u32) -> Vec<FeedItem> {
    if page >= FEED_PAGES {
        return Vec::new();
    }

    let start = page * page_size;
    (start..start + page_size)
        .map(|id| FeedItem {
            id,
            title: format!("Item #{}", id + 1),
        })
        .collect()
}

/// Counts top-edge triggers of the demo feed.
///
/// Resetting a scrolled feed jumps it back to the top, which produces one
/// native scroll event at offset 0; that trigger is not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TopHits {
    count: u32,
    skip_next: bool,
}

impl TopHits {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn record(&mut self) {
        if self.skip_next {
            self.skip_next = false;
        } else {
            self.count += 1;
        }
    }

    /// `was_scrolled`: the feed was away from the top when reset.
    pub fn reset(&mut self, was_scrolled: bool) {
        self.count = 0;
        self.skip_next = was_scrolled;
    }
}
