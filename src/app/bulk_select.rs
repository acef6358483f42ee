//! "Select rows" overlay and the background bulk select task

use super::{App, AppEvent};
use crate::selection::select_first_n;
use crate::theme;
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::info;

impl App {
    pub fn start_bulk_select(&mut self, ctx: &egui::Context) {
        if !self.browser.can_start_bulk() {
            return;
        }
        let Some(n) = self.browser.parse_bulk_count(&self.select_input) else {
            return;
        };

        let page = self.browser.rows_page();
        info!(requested = n, page, "Starting bulk select");

        let cancel = CancellationToken::new();
        self.bulk_cancel = Some(cancel.clone());
        self.browser.bulk_running = true;

        let client = self.client.clone();
        let rows = self.browser.rows.clone();
        let total_pages = self.browser.pagination.total_pages;
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let outcome = select_first_n(&client, &rows, page, total_pages, n, &cancel).await;
            let _ = tx.send(AppEvent::BulkSelectDone(outcome));
            ctx.request_repaint();
        });

        self.show_select_overlay = false;
        self.select_input.clear();
    }

    pub fn cancel_bulk_select(&mut self) {
        if let Some(token) = &self.bulk_cancel {
            info!("Cancelling bulk select");
            token.cancel();
        }
    }

    /// Popup anchored under the "Select rows" button
    pub(crate) fn render_select_overlay(&mut self, ctx: &egui::Context) {
        if !self.show_select_overlay {
            return;
        }
        let Some(anchor) = self.select_anchor else {
            return;
        };

        let mut submit = false;
        let mut close = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        let area = egui::Area::new(egui::Id::new("select_rows_overlay"))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                theme::modal_frame().show(ui, |ui| {
                    ui.set_width(theme::OVERLAY_WIDTH);
                    ui.horizontal(|ui| {
                        ui.colored_label(theme::ACCENT, egui_phosphor::regular::LIST_CHECKS);
                        ui.strong("Select rows");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .add(egui::Button::new(egui_phosphor::regular::X).frame(false))
                                .clicked()
                            {
                                close = true;
                            }
                        });
                    });
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new("Marks rows from the top of this page onward")
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_DIM),
                    );
                    ui.add_space(theme::SPACING_MD);

                    let input = ui.add(
                        egui::TextEdit::singleline(&mut self.select_input)
                            .hint_text("Number of rows")
                            .desired_width(f32::INFINITY),
                    );
                    if self.focus_select_input {
                        self.focus_select_input = false;
                        input.request_focus();
                    }
                    if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }

                    ui.add_space(theme::SPACING_MD);
                    ui.horizontal(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.add(theme::button_accent("Submit")).clicked() {
                                submit = true;
                            }
                        });
                    });
                });
            });

        // Click outside closes
        if ctx.input(|i| i.pointer.any_pressed()) && !area.response.contains_pointer() {
            close = true;
        }

        if submit {
            self.start_bulk_select(ctx);
        } else if close {
            self.show_select_overlay = false;
        }
    }

    /// Progress strip shown in the header bar while a bulk select runs
    pub(crate) fn render_bulk_progress(&mut self, ui: &mut egui::Ui) {
        if !self.browser.bulk_running {
            return;
        }
        ui.spinner();
        ui.label(egui::RichText::new("Selecting rows...").size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
        if ui.add(theme::button_danger("Cancel")).clicked() {
            self.cancel_bulk_select();
        }
    }
}
