//! Artwork table rendering

use super::App;
use crate::theme;
use crate::types::{PageSelection, TableColumn};
use crate::ui::components::{cell_text, tri_state_checkbox};
use crate::utils::format_year;
use eframe::egui;

impl App {
    pub(crate) fn render_table(&mut self, ui: &mut egui::Ui) {
        use egui_extras::{Column, TableBuilder};

        let full_rect = ui.available_rect_before_wrap();
        ui.painter().rect_filled(
            egui::Rect::from_min_size(full_rect.min, egui::vec2(full_rect.width(), theme::TABLE_HEADER_HEIGHT)),
            0.0,
            theme::BG_ELEVATED,
        );

        let visible_cols: Vec<TableColumn> = TableColumn::ALL
            .iter()
            .copied()
            .filter(|&c| self.settings.column_visible(c))
            .collect();
        let total_parts: f32 = visible_cols.iter().map(|c| c.width_parts()).sum();
        let part = (ui.available_width() - theme::CHECKBOX_COLUMN_WIDTH) / total_parts.max(1.0);

        let mut table = TableBuilder::new(ui)
            .striped(false)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0)
            .column(Column::exact(theme::CHECKBOX_COLUMN_WIDTH));
        for col in &visible_cols {
            table = table.column(Column::exact(part * col.width_parts()).clip(true));
        }

        let page_state = self.browser.current_page_state();
        let has_rows = !self.browser.rows.is_empty();
        let mut header_toggle = false;

        table
            .header(theme::TABLE_HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.centered_and_justified(|ui| {
                        let sense = if has_rows { egui::Sense::click() } else { egui::Sense::hover() };
                        let resp = tri_state_checkbox(ui, page_state, theme::CHECKBOX_SIZE, sense)
                            .on_hover_text("Select / deselect this page");
                        if resp.clicked() {
                            header_toggle = true;
                        }
                    });
                });
                for col in &visible_cols {
                    header.col(|ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(col.label())
                                    .size(theme::FONT_LABEL)
                                    .strong()
                                    .color(theme::TEXT_SECONDARY),
                            )
                            .selectable(false),
                        );
                    });
                }
            })
            .body(|mut body| {
                body.ui_mut().visuals_mut().selection.bg_fill = theme::TABLE_ROW_SELECTED;
                let rows = self.browser.rows.clone();

                body.rows(theme::TABLE_ROW_HEIGHT, rows.len(), |mut row| {
                    let artwork = &rows[row.index()];
                    let is_selected = self.browser.selection.is_selected(artwork.id);
                    row.set_selected(is_selected);

                    // Hover sense so the whole row takes the click
                    row.col(|ui| {
                        ui.centered_and_justified(|ui| {
                            let state = if is_selected { PageSelection::All } else { PageSelection::None };
                            tri_state_checkbox(ui, state, theme::CHECKBOX_SIZE, egui::Sense::hover());
                        });
                    });

                    for col in &visible_cols {
                        row.col(|ui| {
                            let (text, strong) = match col {
                                TableColumn::Title => (cell_text(artwork.title.as_deref()), true),
                                TableColumn::PlaceOfOrigin => (cell_text(artwork.place_of_origin.as_deref()), false),
                                TableColumn::Artist => (cell_text(artwork.artist_display.as_deref()), false),
                                TableColumn::Inscriptions => (cell_text(artwork.inscriptions.as_deref()), false),
                                TableColumn::DateStart => (format_year(artwork.date_start), false),
                                TableColumn::DateEnd => (format_year(artwork.date_end), false),
                            };
                            let rich = if strong {
                                egui::RichText::new(text).size(theme::FONT_BODY).strong()
                            } else {
                                egui::RichText::new(text).size(theme::FONT_LABEL).color(theme::TEXT_MUTED)
                            };
                            ui.add(egui::Label::new(rich).truncate().selectable(false));
                        });
                    }

                    let response = row.response();
                    if response.hovered() {
                        response.ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if response.clicked_by(egui::PointerButton::Primary) {
                        self.browser.toggle_row(artwork.id);
                    }
                    response.context_menu(|ui| {
                        self.row_context_menu(ui, artwork);
                    });
                });
            });

        if header_toggle {
            let select = page_state != PageSelection::All;
            self.browser.set_current_page_selected(select);
        }

        if !has_rows && !self.browser.loading {
            ui.add_space(theme::SPACING_XL);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("No artworks to show").color(theme::TEXT_DIM));
            });
        }

        // Loading mask over the table area
        if self.browser.loading {
            ui.painter().rect_filled(full_rect, 0.0, egui::Color32::from_black_alpha(120));
            let spinner_rect = egui::Rect::from_center_size(full_rect.center(), egui::vec2(32.0, 32.0));
            ui.put(spinner_rect, egui::Spinner::new().size(32.0).color(theme::ACCENT));
        }
    }
}
