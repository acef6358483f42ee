//! Context menu for table rows

use super::App;
use crate::theme;
use crate::types::Artwork;
use crate::utils::artwork_web_url;
use eframe::egui;
use tracing::warn;

impl App {
    pub(crate) fn row_context_menu(&mut self, ui: &mut egui::Ui, artwork: &Artwork) {
        ui.spacing_mut().item_spacing.y = 2.0;
        let is_selected = self.browser.selection.is_selected(artwork.id);
        let selected_count = self.browser.selection.count();

        let toggle_label = if is_selected { "Deselect" } else { "Select" };
        let labels = [
            format!("{}  {}", egui_phosphor::regular::CHECK_SQUARE, toggle_label),
            format!("{}  Open on artic.edu", egui_phosphor::regular::ARROW_SQUARE_OUT),
            format!("{}  Copy {} selected IDs", egui_phosphor::regular::COPY, selected_count),
            format!("{}  Deselect All ({})", egui_phosphor::regular::X_SQUARE, selected_count),
        ];
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        theme::set_menu_width(ui, &label_refs);

        if theme::menu_item(ui, egui_phosphor::regular::CHECK_SQUARE, toggle_label) {
            self.browser.toggle_row(artwork.id);
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::ARROW_SQUARE_OUT, "Open on artic.edu") {
            let url = artwork_web_url(artwork.id);
            if let Err(e) = open::that(&url) {
                warn!(error = %e, url = %url, "Failed to open browser");
            }
            ui.close_menu();
        }
        ui.separator();
        if selected_count > 0
            && theme::menu_item(ui, egui_phosphor::regular::COPY, &format!("Copy {} selected IDs", selected_count))
        {
            let ids: Vec<String> = self
                .browser
                .selection
                .selected_ids()
                .iter()
                .map(|id| id.to_string())
                .collect();
            ui.ctx().copy_text(ids.join(","));
            ui.close_menu();
        }
        if selected_count > 0
            && theme::menu_item(
                ui,
                egui_phosphor::regular::X_SQUARE,
                &format!("Deselect All ({})", selected_count),
            )
        {
            self.browser.clear_selection();
            ui.close_menu();
        }
    }
}
