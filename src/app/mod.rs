//! App module - contains the main application state and logic

mod bulk_select;
mod context_menu;
mod loading;
mod modals;
mod paginator;
mod table;
mod toast;

use crate::api::{ApiError, ArtworkClient};
use crate::browser::Browser;
use crate::selection::BulkSelectOutcome;
use crate::settings::Settings;
use crate::theme;
use crate::types::{ArtworkPage, Toast};
use eframe::egui;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] ApiError),
}

/// Results posted back from background tasks
pub(crate) enum AppEvent {
    PageLoaded {
        request: u64,
        result: Result<ArtworkPage, ApiError>,
    },
    BulkSelectDone(BulkSelectOutcome),
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) browser: Browser,
    pub(crate) client: ArtworkClient,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) events_tx: mpsc::UnboundedSender<AppEvent>,
    pub(crate) events_rx: mpsc::UnboundedReceiver<AppEvent>,
    pub(crate) initial_load_done: bool,
    // Bulk select overlay
    pub(crate) show_select_overlay: bool,
    pub(crate) select_anchor: Option<egui::Pos2>,
    pub(crate) select_input: String,
    pub(crate) focus_select_input: bool,
    pub(crate) bulk_cancel: Option<CancellationToken>,
    // Settings window (edits a draft, applied on Save)
    pub(crate) show_settings: bool,
    pub(crate) settings_draft: Settings,
    // Central panel rect for toast positioning
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Toast notification
    pub(crate) toast: Option<Toast>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, StartupError> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let base_url = settings.api_base_url();
        let client = ArtworkClient::new(&base_url, settings.page_size())?;
        info!(base_url = %base_url, page_size = client.page_size(), "Artwork client ready");

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            browser: Browser::new(settings.last_page),
            client,
            settings_draft: settings.clone(),
            settings,
            data_dir,
            runtime,
            events_tx,
            events_rx,
            initial_load_done: false,
            show_select_overlay: false,
            select_anchor: None,
            select_input: String::new(),
            focus_select_input: false,
            bulk_cancel: None,
            show_settings: false,
            central_panel_rect: None,
            toast: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.last_page = self.browser.page;
        self.settings.save(&self.data_dir);
    }

    /// True while any popup that owns keyboard input is open
    pub(crate) fn modal_open(&self) -> bool {
        self.show_settings || self.show_select_overlay
    }
}
