//! Reusable UI components
//!
//! Standalone widgets and formatting helpers shared by the table,
//! paginator and overlays.

use crate::theme;
use crate::types::PageSelection;
use crate::utils::single_line;
use eframe::egui;

/// Text for an optional API field, "N/A" when missing or blank
pub fn cell_text(value: Option<&str>) -> String {
    match value.map(single_line) {
        Some(s) if !s.is_empty() => s,
        _ => "N/A".to_string(),
    }
}

/// Checkbox with an indeterminate state for the page header
pub fn tri_state_checkbox(
    ui: &mut egui::Ui,
    state: PageSelection,
    size: f32,
    sense: egui::Sense,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), sense);

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        match state {
            PageSelection::All => {
                painter.rect_filled(rect, rounding, theme::ACCENT);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::CHECK,
                    egui::FontId::proportional(size * 0.7),
                    egui::Color32::WHITE,
                );
            }
            PageSelection::Partial => {
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(theme::STROKE_MEDIUM, theme::ACCENT),
                    egui::StrokeKind::Inside,
                );
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::MINUS,
                    egui::FontId::proportional(size * 0.7),
                    theme::ACCENT,
                );
            }
            PageSelection::None => {
                painter.rect_stroke(
                    rect,
                    rounding,
                    egui::Stroke::new(theme::STROKE_MEDIUM, theme::BORDER_DEFAULT),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    response
}

/// Pill showing how many rows are selected
pub fn count_badge(ui: &mut egui::Ui, count: usize) -> egui::Response {
    let text = format!("{} {} selected", egui_phosphor::regular::CHECK_SQUARE, count);
    let fill = if count > 0 { theme::TABLE_ROW_SELECTED } else { theme::BG_SURFACE };
    let color = if count > 0 { theme::TEXT_PRIMARY } else { theme::TEXT_MUTED };
    egui::Frame::new()
        .fill(fill)
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(color))
                    .selectable(false),
            );
        })
        .response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_fields_show_na() {
        assert_eq!(cell_text(None), "N/A");
        assert_eq!(cell_text(Some("  \n ")), "N/A");
        assert_eq!(cell_text(Some("France")), "France");
    }
}
