//! Page loading and background event polling

use super::{App, AppEvent};
use crate::api::{ArtworkClient, PageSource};
use eframe::egui;
use tracing::{info, warn};

impl App {
    /// Fetch `page` in the background; the result arrives through `poll_events`
    pub fn load_page(&mut self, ctx: &egui::Context, page: u32) {
        let request = self.browser.begin_load(page);
        let page = self.browser.page;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = client.fetch_page(page).await;
            // Receiver only goes away when the app is closing
            let _ = tx.send(AppEvent::PageLoaded { request, result });
            ctx.request_repaint();
        });
    }

    pub fn reload_current_page(&mut self, ctx: &egui::Context) {
        let page = self.browser.page;
        self.load_page(ctx, page);
    }

    /// Drain results from background tasks into browser state
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AppEvent::PageLoaded { request, result } => {
                    self.browser.finish_load(request, result);
                }
                AppEvent::BulkSelectDone(outcome) => {
                    self.bulk_cancel = None;
                    self.browser.apply_bulk_outcome(outcome);
                }
            }
        }

        if let Some(toast) = self.browser.take_toast() {
            self.show_toast(toast);
        }
    }

    /// Rebuild the HTTP client after the API URL or page size changed and
    /// start again from the first page
    pub fn rebuild_client(&mut self, ctx: &egui::Context) {
        let base_url = self.settings.api_base_url();
        match ArtworkClient::new(&base_url, self.settings.page_size()) {
            Ok(client) => {
                info!(base_url = %base_url, page_size = client.page_size(), "Artwork client rebuilt");
                self.client = client;
                self.load_page(ctx, 1);
            }
            Err(e) => {
                warn!(error = %e, "Failed to rebuild artwork client");
                self.show_toast(crate::types::Toast::error(format!("Could not apply settings: {}", e)));
            }
        }
    }
}
