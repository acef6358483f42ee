//! Paginator bar under the table

use super::App;
use crate::constants::PAGINATOR_LINKS;
use crate::theme;
use crate::utils::page_window;
use eframe::egui;

impl App {
    /// Returns the page the user asked for, if any
    pub(crate) fn render_paginator(&mut self, ui: &mut egui::Ui) -> Option<u32> {
        let current = self.browser.page;
        let total_pages = self.browser.total_pages();
        let enabled = !self.browser.loading;
        let mut target = None;

        ui.horizontal_centered(|ui| {
            let summary = match self.browser.visible_range() {
                Some((first, last)) => format!(
                    "Showing {} to {} of {} entries",
                    first, last, self.browser.pagination.total
                ),
                None => "No entries".to_string(),
            };
            ui.label(egui::RichText::new(summary).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                // Right-to-left: last control first
                if page_button(ui, egui_phosphor::regular::CARET_DOUBLE_RIGHT, false, enabled && current < total_pages) {
                    target = Some(total_pages);
                }
                if page_button(ui, egui_phosphor::regular::CARET_RIGHT, false, enabled && current < total_pages) {
                    target = Some(current + 1);
                }
                for page in page_window(current, total_pages, PAGINATOR_LINKS).rev() {
                    if page_button(ui, &page.to_string(), page == current, enabled && page != current) {
                        target = Some(page);
                    }
                }
                if page_button(ui, egui_phosphor::regular::CARET_LEFT, false, enabled && current > 1) {
                    target = Some(current - 1);
                }
                if page_button(ui, egui_phosphor::regular::CARET_DOUBLE_LEFT, false, enabled && current > 1) {
                    target = Some(1);
                }
            });
        });

        target
    }
}

fn page_button(ui: &mut egui::Ui, label: &str, active: bool, enabled: bool) -> bool {
    let fill = if active {
        theme::BTN_ACCENT
    } else if enabled {
        theme::BTN_DEFAULT
    } else {
        theme::BTN_DISABLED
    };
    let color = if active {
        theme::ACCENT_TEXT
    } else if enabled {
        theme::TEXT_SECONDARY
    } else {
        theme::TEXT_DIM
    };
    let button = egui::Button::new(egui::RichText::new(label).size(theme::FONT_LABEL).color(color))
        .fill(fill)
        .corner_radius(theme::RADIUS_DEFAULT)
        .min_size(egui::vec2(theme::PAGE_BUTTON_SIZE, theme::PAGE_BUTTON_SIZE));
    ui.add_enabled(enabled, button).clicked()
}
