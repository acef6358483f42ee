//! Row selection bookkeeping and the "select first N rows" loop

use crate::api::{ApiError, PageSource};
use crate::types::{Artwork, PageSelection};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Artwork id -> selected. Deselected rows keep their key with `false`.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    marks: HashMap<u64, bool>,
}

impl Selection {
    pub fn is_selected(&self, id: u64) -> bool {
        self.marks.get(&id).copied().unwrap_or(false)
    }

    /// Flip one row; returns the new state
    pub fn toggle(&mut self, id: u64) -> bool {
        let next = !self.is_selected(id);
        self.marks.insert(id, next);
        next
    }

    pub fn set_many(&mut self, ids: impl IntoIterator<Item = u64>, selected: bool) {
        for id in ids {
            self.marks.insert(id, selected);
        }
    }

    pub fn count(&self) -> usize {
        self.marks.values().filter(|&&v| v).count()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Selected ids in ascending order
    pub fn selected_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .marks
            .iter()
            .filter_map(|(&id, &v)| v.then_some(id))
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn page_state(&self, ids: &[u64]) -> PageSelection {
        let selected = ids.iter().filter(|&&id| self.is_selected(id)).count();
        if selected == 0 {
            PageSelection::None
        } else if selected == ids.len() {
            PageSelection::All
        } else {
            PageSelection::Partial
        }
    }
}

/// Result of a bulk selection run
#[derive(Debug, Default)]
pub struct BulkSelectOutcome {
    pub requested: usize,
    /// Ids to mark selected, in table order
    pub ids: Vec<u64>,
    pub pages_fetched: u32,
    /// The listing ran out before `requested` rows were found
    pub exhausted: bool,
    pub cancelled: bool,
    pub error: Option<ApiError>,
}

/// Collect the first `n` row ids starting at the top of the current page.
///
/// Rows already in memory are used first; following pages are fetched one at
/// a time. The loop stops on an empty page, past `total_pages` (when known),
/// on cancellation, or on the first fetch error. Ids gathered before a stop
/// are always returned.
pub async fn select_first_n<S: PageSource>(
    source: &S,
    current_rows: &[Artwork],
    current_page: u32,
    total_pages: u32,
    n: usize,
    cancel: &CancellationToken,
) -> BulkSelectOutcome {
    let mut outcome = BulkSelectOutcome {
        requested: n,
        ..Default::default()
    };

    outcome
        .ids
        .extend(current_rows.iter().take(n).map(|a| a.id));

    let mut page = current_page;
    while outcome.ids.len() < n {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }

        page += 1;
        if total_pages > 0 && page > total_pages {
            outcome.exhausted = true;
            break;
        }

        let fetched = tokio::select! {
            _ = cancel.cancelled() => {
                outcome.cancelled = true;
                break;
            }
            res = source.fetch_page(page) => res,
        };

        match fetched {
            Ok(next) => {
                outcome.pages_fetched += 1;
                if next.data.is_empty() {
                    outcome.exhausted = true;
                    break;
                }
                let remaining = n - outcome.ids.len();
                outcome
                    .ids
                    .extend(next.data.iter().take(remaining).map(|a| a.id));
                debug!(page, collected = outcome.ids.len(), requested = n, "Bulk select progress");
            }
            Err(e) => {
                warn!(page, error = %e, "Bulk select aborted");
                outcome.error = Some(e);
                break;
            }
        }
    }

    info!(
        requested = n,
        collected = outcome.ids.len(),
        pages_fetched = outcome.pages_fetched,
        cancelled = outcome.cancelled,
        "Bulk select finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArtworkPage, Pagination};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    fn artwork(id: u64) -> Artwork {
        Artwork {
            id,
            title: Some(format!("Artwork {}", id)),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Pages of `page_size` sequential ids, `total` rows overall
    struct FakeSource {
        page_size: u64,
        total: u64,
        fail_on: Option<u32>,
        /// This page never answers; `entered` fires once it is requested
        stall_on: Option<u32>,
        entered: Notify,
        requested: Mutex<Vec<u32>>,
    }

    impl FakeSource {
        fn new(page_size: u64, total: u64) -> Self {
            Self {
                page_size,
                total,
                fail_on: None,
                stall_on: None,
                entered: Notify::new(),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn rows(&self, page: u32) -> Vec<Artwork> {
            let start = (page as u64 - 1) * self.page_size + 1;
            let end = (start + self.page_size).min(self.total + 1);
            (start..end).map(artwork).collect()
        }

        fn requested(&self) -> Vec<u32> {
            self.requested.lock().unwrap().clone()
        }
    }

    impl PageSource for FakeSource {
        async fn fetch_page(&self, page: u32) -> Result<ArtworkPage, ApiError> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(ApiError::Status { status: 500, url: format!("fake://{}", page) });
            }
            if self.stall_on == Some(page) {
                self.entered.notify_one();
                return std::future::pending().await;
            }
            Ok(ArtworkPage {
                pagination: Pagination {
                    total: self.total,
                    current_page: page,
                    ..Default::default()
                },
                data: self.rows(page),
            })
        }
    }

    #[test]
    fn toggle_and_count_track_true_entries() {
        let mut sel = Selection::default();
        assert!(sel.toggle(7));
        sel.set_many([8], true);
        sel.set_many([9], false);
        assert_eq!(sel.count(), 2);

        assert!(!sel.toggle(7));
        assert_eq!(sel.count(), 1);
        assert!(!sel.is_selected(7));
        assert_eq!(sel.selected_ids(), vec![8]);
    }

    #[test]
    fn page_state_reports_none_partial_all() {
        let mut sel = Selection::default();
        let ids = [1, 2, 3];
        assert_eq!(sel.page_state(&ids), PageSelection::None);
        sel.set_many([2], true);
        assert_eq!(sel.page_state(&ids), PageSelection::Partial);
        sel.set_many(ids, true);
        assert_eq!(sel.page_state(&ids), PageSelection::All);
        sel.clear();
        assert_eq!(sel.count(), 0);
    }

    #[tokio::test]
    async fn fits_in_current_page_without_fetching() {
        let source = FakeSource::new(5, 100);
        let rows = source.rows(1);
        let out = select_first_n(&source, &rows, 1, 20, 3, &CancellationToken::new()).await;

        assert_eq!(out.ids, vec![1, 2, 3]);
        assert_eq!(out.pages_fetched, 0);
        assert!(source.requested().is_empty());
    }

    #[tokio::test]
    async fn spans_following_pages_taking_prefixes() {
        let source = FakeSource::new(5, 100);
        let rows = source.rows(2);
        let out = select_first_n(&source, &rows, 2, 20, 12, &CancellationToken::new()).await;

        assert_eq!(out.ids, (6..=17).collect::<Vec<u64>>());
        assert_eq!(source.requested(), vec![3, 4]);
        assert_eq!(out.pages_fetched, 2);
        assert!(!out.exhausted);
        assert!(out.error.is_none());
    }

    #[tokio::test]
    async fn stops_when_listing_runs_out() {
        let source = FakeSource::new(5, 12);
        let rows = source.rows(1);
        // total_pages unknown: relies on the empty page
        let out = select_first_n(&source, &rows, 1, 0, 50, &CancellationToken::new()).await;

        assert_eq!(out.ids.len(), 12);
        assert!(out.exhausted);
        assert_eq!(source.requested(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn does_not_fetch_past_total_pages() {
        let source = FakeSource::new(5, 10);
        let rows = source.rows(1);
        let out = select_first_n(&source, &rows, 1, 2, 50, &CancellationToken::new()).await;

        assert_eq!(out.ids.len(), 10);
        assert!(out.exhausted);
        assert_eq!(source.requested(), vec![2]);
    }

    #[tokio::test]
    async fn error_keeps_rows_collected_so_far() {
        let mut source = FakeSource::new(5, 100);
        source.fail_on = Some(3);
        let rows = source.rows(1);
        let out = select_first_n(&source, &rows, 1, 20, 20, &CancellationToken::new()).await;

        assert_eq!(out.ids, (1..=10).collect::<Vec<u64>>());
        assert!(matches!(out.error, Some(ApiError::Status { status: 500, .. })));
        assert_eq!(source.requested(), vec![2, 3]);
    }

    #[tokio::test]
    async fn cancelled_before_fetching_returns_current_page_rows() {
        let source = FakeSource::new(5, 100);
        let rows = source.rows(1);
        let token = CancellationToken::new();
        token.cancel();
        let out = select_first_n(&source, &rows, 1, 20, 20, &token).await;

        assert!(out.cancelled);
        assert_eq!(out.ids, vec![1, 2, 3, 4, 5]);
        assert!(source.requested().is_empty());
    }

    #[tokio::test]
    async fn cancel_during_fetch_keeps_earlier_rows() {
        let mut source = FakeSource::new(5, 100);
        source.stall_on = Some(3);
        let rows = source.rows(1);
        let token = CancellationToken::new();

        let (out, _) = tokio::join!(
            select_first_n(&source, &rows, 1, 20, 20, &token),
            async {
                source.entered.notified().await;
                token.cancel();
            }
        );

        assert!(out.cancelled);
        assert!(out.error.is_none());
        assert_eq!(out.ids, (1..=10).collect::<Vec<u64>>());
        assert_eq!(out.pages_fetched, 1);
        assert_eq!(source.requested(), vec![2, 3]);
    }

    #[tokio::test]
    async fn zero_rows_requested_is_a_no_op() {
        let source = FakeSource::new(5, 100);
        let rows = source.rows(1);
        let out = select_first_n(&source, &rows, 1, 20, 0, &CancellationToken::new()).await;
        assert!(out.ids.is_empty());
        assert!(source.requested().is_empty());
    }
}
