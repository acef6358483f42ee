#![windows_subsystem = "windows"]
//! Artwork Browser - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod browser;
mod constants;
mod selection;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use ui::components::count_badge;
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "artwork-browser.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artwork_browser=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Artwork Browser starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1280.0, 760.0)))
        .with_min_inner_size([900.0, 520.0])
        .with_title(APP_NAME);

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir).map_err(|e| {
                tracing::error!(error = %e, "Failed to initialize application");
                e
            })?;
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Fetch on mount
        if !self.initial_load_done {
            self.initial_load_done = true;
            self.reload_current_page(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        self.poll_events();

        // Arrow keys page through the listing when nothing else wants them
        if !self.modal_open() && !ctx.wants_keyboard_input() && !self.browser.loading {
            let (left, right) = ctx.input(|i| {
                (i.key_pressed(egui::Key::ArrowLeft), i.key_pressed(egui::Key::ArrowRight))
            });
            let page = self.browser.page;
            if left && page > 1 {
                self.load_page(ctx, page - 1);
            } else if right && page < self.browser.total_pages() {
                self.load_page(ctx, page + 1);
            }
        }

        self.render_settings_modal(ctx);

        // Header bar: title, selection count, actions
        egui::TopBottomPanel::top("header_bar")
            .exact_height(theme::HEADER_BAR_HEIGHT)
            .show_separator_line(false)
            .frame(theme::bar_frame())
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(egui_phosphor::regular::PAINT_BRUSH)
                            .size(theme::FONT_TITLE)
                            .color(theme::ACCENT),
                    );
                    ui.label(egui::RichText::new("Artworks").size(theme::FONT_TITLE).strong());
                    ui.add_space(theme::SPACING_MD);
                    count_badge(ui, self.browser.selection.count());
                    ui.add_space(theme::SPACING_MD);
                    self.render_bulk_progress(ui);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(egui_phosphor::regular::GEAR))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.open_settings();
                        }

                        let refresh = ui
                            .add_enabled(
                                !self.browser.loading,
                                theme::button(egui_phosphor::regular::ARROW_CLOCKWISE),
                            )
                            .on_hover_text("Reload page");
                        if refresh.clicked() {
                            self.reload_current_page(ctx);
                        }

                        let select_label = format!("{}  Select rows", egui_phosphor::regular::LIST_CHECKS);
                        let select_btn = ui.add_enabled(
                            self.browser.can_start_bulk(),
                            theme::button_accent(select_label),
                        );
                        if select_btn.clicked() {
                            self.show_select_overlay = !self.show_select_overlay;
                            self.focus_select_input = self.show_select_overlay;
                            self.select_anchor = Some(
                                select_btn.rect.left_bottom() + egui::vec2(0.0, theme::SPACING_SM),
                            );
                        }

                        if let Some(at) = self.browser.last_loaded() {
                            ui.label(
                                egui::RichText::new(format!("Updated {}", at.format("%H:%M:%S")))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });

        // Paginator (must be added BEFORE CentralPanel)
        let mut requested_page = None;
        egui::TopBottomPanel::bottom("paginator")
            .exact_height(theme::PAGINATOR_HEIGHT)
            .show_separator_line(false)
            .frame(theme::bar_frame())
            .show(ctx, |ui| {
                requested_page = self.render_paginator(ui);
            });
        if let Some(page) = requested_page {
            self.load_page(ctx, page);
        }

        // Central panel - artwork table (MUST be added LAST after all side/top/bottom panels)
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_XL as i8)),
            )
            .show(ctx, |ui| {
                // Store panel rect for toast positioning
                self.central_panel_rect = Some(ui.max_rect());
                self.render_table(ui);
            });

        self.render_select_overlay(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.cancel_bulk_select();
        self.save_settings();
    }
}
