//! Toast notification (bottom-right of the table panel)

use super::App;
use crate::constants::{TOAST_FADE_SECS, TOAST_VISIBLE_SECS};
use crate::theme;
use crate::types::{Toast, ToastKind};
use eframe::egui;

impl App {
    pub fn show_toast(&mut self, toast: Toast) {
        self.toast = Some(toast);
        self.toast_start = Some(std::time::Instant::now());
    }

    /// Visible for a few seconds then fades; hovering pauses the timer
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(toast), Some(panel_rect)) = (self.toast.clone(), self.central_panel_rect) else {
            return;
        };

        let total_duration = TOAST_VISIBLE_SECS + TOAST_FADE_SECS;
        let margin = 12.0;
        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > TOAST_VISIBLE_SECS {
            ((total_duration - elapsed) / TOAST_FADE_SECS).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let (icon, edge) = match toast.kind {
            ToastKind::Info => (egui_phosphor::regular::INFO, theme::ACCENT),
            ToastKind::Error => (egui_phosphor::regular::WARNING_CIRCLE, theme::STATUS_ERROR),
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::with_alpha(egui::Color32::from_rgb(0x1e, 0x1b, 0x19), 0.9 * alpha))
                    .stroke(egui::Stroke::new(1.0, theme::with_alpha(edge, 0.4 * alpha)))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.set_max_width(420.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icon).color(theme::with_alpha(edge, alpha)));
                            ui.label(
                                egui::RichText::new(&toast.message)
                                    .color(theme::with_alpha(theme::TEXT_PRIMARY, alpha)),
                            );
                        });
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= total_duration {
            self.toast = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}
