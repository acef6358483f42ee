//! Table state: current page, rows, selection and pending notifications.
//!
//! Kept free of egui so page loads, stale responses and bulk selection
//! results can be exercised without a window.

use crate::api::ApiError;
use crate::selection::{BulkSelectOutcome, Selection};
use crate::types::{Artwork, PageSelection, Pagination, Toast};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct Browser {
    pub page: u32,
    pub rows: Vec<Artwork>,
    pub pagination: Pagination,
    pub loading: bool,
    pub selection: Selection,
    /// Bulk select running in the background
    pub bulk_running: bool,
    /// Latest page request; older responses are dropped
    request_seq: u64,
    last_loaded: Option<chrono::DateTime<chrono::Local>>,
    pending_toast: Option<Toast>,
}

impl Browser {
    pub fn new(start_page: u32) -> Self {
        Self {
            page: start_page.max(1),
            ..Default::default()
        }
    }

    /// Mark `page` as loading and hand out the id its response must carry
    pub fn begin_load(&mut self, page: u32) -> u64 {
        self.request_seq += 1;
        self.page = page.max(1);
        self.loading = true;
        debug!(page = self.page, request = self.request_seq, "Page load started");
        self.request_seq
    }

    pub fn finish_load(&mut self, request: u64, result: Result<crate::types::ArtworkPage, ApiError>) {
        if request != self.request_seq {
            debug!(request, latest = self.request_seq, "Dropping stale page response");
            return;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                info!(
                    page = self.page,
                    rows = page.data.len(),
                    total = page.pagination.total,
                    "Page loaded"
                );
                self.pagination = page.pagination;
                self.rows = page.data;
                self.last_loaded = Some(chrono::Local::now());
            }
            Err(e) => {
                warn!(page = self.page, error = %e, "Page load failed");
                // Keep showing the previous rows, but put the paginator back.
                // Before any successful load there is nothing to go back to.
                if self.last_loaded.is_some() {
                    self.page = self.rows_page();
                }
                self.pending_toast = Some(Toast::error(format!("Failed to load artworks: {}", e)));
            }
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.pagination.total_pages > 0 {
            self.pagination.total_pages
        } else if self.pagination.limit > 0 {
            self.pagination.total.div_ceil(self.pagination.limit as u64) as u32
        } else {
            1
        }
    }

    /// 1-based (first, last) row numbers shown on this page, if any
    pub fn visible_range(&self) -> Option<(u64, u64)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.pagination.offset + 1;
        Some((first, self.pagination.offset + self.rows.len() as u64))
    }

    /// Page the rows on screen came from; `page` runs ahead while a load is pending
    pub fn rows_page(&self) -> u32 {
        self.pagination.current_page.max(1)
    }

    /// Bulk select starts from the rows on screen, so not while they are being replaced
    pub fn can_start_bulk(&self) -> bool {
        !self.bulk_running && !self.loading && !self.rows.is_empty()
    }

    pub fn last_loaded(&self) -> Option<chrono::DateTime<chrono::Local>> {
        self.last_loaded
    }

    pub fn row_ids(&self) -> Vec<u64> {
        self.rows.iter().map(|a| a.id).collect()
    }

    pub fn toggle_row(&mut self, id: u64) -> bool {
        self.selection.toggle(id)
    }

    pub fn current_page_state(&self) -> PageSelection {
        self.selection.page_state(&self.row_ids())
    }

    /// Header checkbox: select or deselect every row on the visible page
    pub fn set_current_page_selected(&mut self, selected: bool) {
        let ids = self.row_ids();
        self.selection.set_many(ids, selected);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.pending_toast = Some(Toast::info("Selection cleared"));
    }

    /// Validate the overlay input; queues an error toast on bad input
    pub fn parse_bulk_count(&mut self, input: &str) -> Option<usize> {
        match input.trim().parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                self.pending_toast = Some(Toast::error("Enter a positive number of rows"));
                None
            }
        }
    }

    pub fn apply_bulk_outcome(&mut self, outcome: BulkSelectOutcome) {
        self.bulk_running = false;
        let marked = outcome.ids.len();
        self.selection.set_many(outcome.ids, true);

        let toast = if let Some(e) = outcome.error {
            Toast::error(format!("Selected {} of {} rows before an error: {}", marked, outcome.requested, e))
        } else if outcome.cancelled {
            Toast::info(format!("Cancelled after selecting {} of {} rows", marked, outcome.requested))
        } else if outcome.exhausted && marked < outcome.requested {
            Toast::info(format!("Only {} rows available, all selected", marked))
        } else {
            Toast::info(format!("Selected {} rows", marked))
        };
        self.pending_toast = Some(toast);
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.pending_toast.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageSource;
    use crate::selection::select_first_n;
    use crate::types::{ArtworkPage, ToastKind};
    use tokio_util::sync::CancellationToken;

    fn artwork(id: u64) -> Artwork {
        Artwork {
            id,
            title: None,
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    fn page(current_page: u32, ids: &[u64]) -> ArtworkPage {
        ArtworkPage {
            pagination: Pagination {
                total: 30,
                limit: 3,
                offset: (current_page as u64 - 1) * 3,
                total_pages: 10,
                current_page,
            },
            data: ids.iter().copied().map(artwork).collect(),
        }
    }

    #[test]
    fn load_replaces_rows_and_pagination() {
        let mut b = Browser::new(1);
        let req = b.begin_load(2);
        assert!(b.loading);
        b.finish_load(req, Ok(page(2, &[4, 5, 6])));

        assert!(!b.loading);
        assert_eq!(b.row_ids(), vec![4, 5, 6]);
        assert_eq!(b.total_pages(), 10);
        assert_eq!(b.visible_range(), Some((4, 6)));
        assert!(b.last_loaded().is_some());
        assert!(b.take_toast().is_none());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut b = Browser::new(1);
        let first = b.begin_load(2);
        let second = b.begin_load(3);
        b.finish_load(second, Ok(page(3, &[7, 8, 9])));
        b.finish_load(first, Ok(page(2, &[4, 5, 6])));

        assert_eq!(b.page, 3);
        assert_eq!(b.row_ids(), vec![7, 8, 9]);
    }

    #[test]
    fn failed_load_keeps_previous_rows_and_queues_toast() {
        let mut b = Browser::new(1);
        let req = b.begin_load(1);
        b.finish_load(req, Ok(page(1, &[1, 2, 3])));

        let req = b.begin_load(2);
        b.finish_load(req, Err(ApiError::InvalidPage(0)));

        assert!(!b.loading);
        assert_eq!(b.page, 1);
        assert_eq!(b.row_ids(), vec![1, 2, 3]);
        assert_eq!(b.take_toast().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn selection_survives_page_changes() {
        let mut b = Browser::new(1);
        let req = b.begin_load(1);
        b.finish_load(req, Ok(page(1, &[1, 2, 3])));
        b.toggle_row(2);

        let req = b.begin_load(2);
        b.finish_load(req, Ok(page(2, &[4, 5, 6])));
        b.set_current_page_selected(true);
        assert_eq!(b.current_page_state(), PageSelection::All);
        assert_eq!(b.selection.count(), 4);

        let req = b.begin_load(1);
        b.finish_load(req, Ok(page(1, &[1, 2, 3])));
        assert_eq!(b.current_page_state(), PageSelection::Partial);
    }

    #[test]
    fn first_load_failure_keeps_restored_page() {
        let mut b = Browser::new(7);
        let req = b.begin_load(7);
        b.finish_load(req, Err(ApiError::Status { status: 503, url: "x".into() }));

        assert_eq!(b.page, 7);
        assert!(b.rows.is_empty());
        assert_eq!(b.take_toast().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn bulk_select_blocked_while_page_changes() {
        let mut b = Browser::new(1);
        assert!(!b.can_start_bulk());
        let req = b.begin_load(1);
        b.finish_load(req, Ok(page(1, &[1, 2, 3])));
        assert!(b.can_start_bulk());

        b.begin_load(5);
        assert_eq!(b.page, 5);
        assert_eq!(b.rows_page(), 1);
        assert!(!b.can_start_bulk());

        b.bulk_running = true;
        let req = b.begin_load(5);
        b.finish_load(req, Ok(page(5, &[13, 14, 15])));
        assert!(!b.can_start_bulk());
    }

    struct SequentialPages;

    impl PageSource for SequentialPages {
        async fn fetch_page(&self, n: u32) -> Result<ArtworkPage, ApiError> {
            let first = (n as u64 - 1) * 3 + 1;
            Ok(page(n, &[first, first + 1, first + 2]))
        }
    }

    #[tokio::test]
    async fn bulk_select_continues_after_the_rows_on_screen() {
        let mut b = Browser::new(1);
        let req = b.begin_load(1);
        b.finish_load(req, Ok(page(1, &[1, 2, 3])));
        // A later page is requested but has not arrived
        b.begin_load(5);

        let out = select_first_n(
            &SequentialPages,
            &b.rows,
            b.rows_page(),
            b.total_pages(),
            6,
            &CancellationToken::new(),
        )
        .await;
        assert_eq!(out.ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn bulk_count_must_be_positive_integer() {
        let mut b = Browser::new(1);
        assert_eq!(b.parse_bulk_count(" 25 "), Some(25));
        assert!(b.take_toast().is_none());
        assert_eq!(b.parse_bulk_count("0"), None);
        assert_eq!(b.take_toast().map(|t| t.kind), Some(ToastKind::Error));
        assert_eq!(b.parse_bulk_count("ten"), None);
        assert_eq!(b.parse_bulk_count("-3"), None);
    }

    #[test]
    fn bulk_outcome_marks_ids_and_reports() {
        let mut b = Browser::new(1);
        b.bulk_running = true;
        b.apply_bulk_outcome(BulkSelectOutcome {
            requested: 5,
            ids: vec![1, 2, 3, 4, 5],
            pages_fetched: 1,
            ..Default::default()
        });

        assert!(!b.bulk_running);
        assert_eq!(b.selection.count(), 5);
        let toast = b.take_toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.message, "Selected 5 rows");
    }

    #[test]
    fn bulk_outcome_with_error_keeps_partial_selection() {
        let mut b = Browser::new(1);
        b.apply_bulk_outcome(BulkSelectOutcome {
            requested: 10,
            ids: vec![1, 2, 3],
            error: Some(ApiError::Status { status: 502, url: "x".into() }),
            ..Default::default()
        });

        assert_eq!(b.selection.count(), 3);
        assert_eq!(b.take_toast().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[test]
    fn total_pages_falls_back_to_total_over_limit() {
        let mut b = Browser::new(1);
        b.pagination = Pagination { total: 25, limit: 12, offset: 0, total_pages: 0, current_page: 1 };
        assert_eq!(b.total_pages(), 3);
    }
}
