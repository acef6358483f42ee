//! Settings modal (column visibility, page size, API endpoint)

use super::App;
use crate::constants::MAX_PAGE_SIZE;
use crate::theme;
use crate::types::TableColumn;
use eframe::egui;
use tracing::info;

impl App {
    pub fn open_settings(&mut self) {
        self.settings_draft = self.settings.clone();
        self.show_settings = true;
    }

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut save = false;
        let mut cancel = false;

        let modal = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(320.0);
            ui.horizontal(|ui| {
                ui.colored_label(theme::ACCENT, egui_phosphor::regular::GEAR);
                ui.label(egui::RichText::new("Settings").size(theme::FONT_TITLE).strong());
            });
            ui.add_space(theme::SPACING_LG);

            ui.label(egui::RichText::new("COLUMNS").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            ui.add_space(theme::SPACING_SM);
            for col in TableColumn::ALL {
                let visible = self.settings_draft.column_visible(col);
                let enabled = col != TableColumn::Title;
                if theme::settings_checkbox(ui, visible, col.label(), enabled) {
                    self.settings_draft.set_column_visible(col, !visible);
                }
            }

            ui.add_space(theme::SPACING_LG);
            ui.label(egui::RichText::new("LISTING").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                ui.label("Rows per page");
                ui.add(egui::DragValue::new(&mut self.settings_draft.rows_per_page).range(1..=MAX_PAGE_SIZE));
            });

            ui.add_space(theme::SPACING_LG);
            ui.label(egui::RichText::new("API").size(theme::FONT_SMALL).color(theme::TEXT_DIM));
            ui.add_space(theme::SPACING_SM);
            let mut url = self.settings_draft.api_base_url.clone().unwrap_or_default();
            let url_resp = ui.add(
                egui::TextEdit::singleline(&mut url)
                    .hint_text(self.settings.api_base_url())
                    .desired_width(f32::INFINITY),
            );
            if url_resp.changed() {
                self.settings_draft.api_base_url = Some(url).filter(|s| !s.trim().is_empty());
            }

            ui.add_space(theme::SPACING_XL);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button_accent("Save")).clicked() {
                        save = true;
                    }
                    if ui.add(theme::button("Cancel")).clicked() {
                        cancel = true;
                    }
                });
            });
        });

        if save {
            self.apply_settings_draft(ctx);
        } else if cancel || response.should_close() {
            self.show_settings = false;
        }
    }

    fn apply_settings_draft(&mut self, ctx: &egui::Context) {
        self.show_settings = false;
        let needs_reload = self.settings_draft.page_size() != self.settings.page_size()
            || self.settings_draft.api_base_url != self.settings.api_base_url;

        // Geometry and last page are tracked live, not edited here
        let draft = std::mem::take(&mut self.settings_draft);
        self.settings = crate::settings::Settings {
            window_x: self.settings.window_x,
            window_y: self.settings.window_y,
            window_w: self.settings.window_w,
            window_h: self.settings.window_h,
            last_page: self.settings.last_page,
            ..draft
        };
        self.settings_draft = self.settings.clone();
        info!(needs_reload, "Settings applied");

        self.save_settings();
        if needs_reload {
            self.rebuild_client(ctx);
        }
    }
}
