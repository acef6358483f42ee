//! Centralized theme constants for Artwork Browser
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x0c, 0x0a, 0x09); // stone-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x1c, 0x19, 0x17); // stone-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x29, 0x25, 0x24); // stone-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x22, 0x14, 0x16); // faint crimson hover

// =============================================================================
// COLORS - Accent (Crimson)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0xe1, 0x1d, 0x48); // rose-600
pub const ACCENT_TEXT: Color32 = Color32::from_rgb(0xff, 0xf1, 0xf2); // rose-50

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe7, 0xe5, 0xe4); // stone-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa8, 0xa2, 0x9e); // stone-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x78, 0x71, 0x6c); // stone-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x29, 0x25, 0x24); // stone-800
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x44, 0x40, 0x3c); // stone-700

// =============================================================================
// COLORS - Selection / Status
// =============================================================================
pub const TABLE_ROW_SELECTED: Color32 = Color32::from_rgb(0x2a, 0x12, 0x17);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x44, 0x40, 0x3c); // stone-700
pub const BTN_ACCENT: Color32 = ACCENT;
pub const BTN_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600
pub const BTN_DISABLED: Color32 = Color32::from_rgb(0x29, 0x25, 0x24); // stone-800

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const HEADER_BAR_HEIGHT: f32 = 56.0;
pub const PAGINATOR_HEIGHT: f32 = 52.0;
pub const TABLE_ROW_HEIGHT: f32 = 34.0;
pub const TABLE_HEADER_HEIGHT: f32 = 40.0;
pub const CHECKBOX_SIZE: f32 = 16.0;
pub const CHECKBOX_COLUMN_WIDTH: f32 = 40.0;
pub const PAGE_BUTTON_SIZE: f32 = 30.0;
pub const OVERLAY_WIDTH: f32 = 260.0;

// =============================================================================
// CORNER RADIUS / STROKES / SPACING
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_MEDIUM: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 8.0;

pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: true,
        panel_fill: BG_BASE,
        window_fill: Color32::from_rgb(0x1e, 0x1b, 0x19), // Slightly elevated for popups/menus
        extreme_bg_color: BG_BASE,
        faint_bg_color: BG_ELEVATED,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: Color32::from_rgb(0x3f, 0x3a, 0x37),
            stroke: egui::Stroke::NONE,
        },
        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_ELEVATED,
                weak_bg_fill: BG_SURFACE,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: Color32::TRANSPARENT,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_HOVER,
                weak_bg_fill: Color32::from_rgb(0x33, 0x2e, 0x2b),
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_MEDIUM, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: Color32::from_rgb(0x30, 0x2b, 0x28),
                weak_bg_fill: Color32::from_rgb(0x30, 0x2b, 0x28),
                bg_stroke: egui::Stroke::NONE,
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: -2.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_SURFACE,
                weak_bg_fill: BG_ELEVATED,
                bg_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
                fg_stroke: egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY),
                corner_radius: RADIUS_DEFAULT.into(),
                expansion: 0.0,
            },
        },
        striped: false,
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(80),
        },
        window_stroke: egui::Stroke::new(1.0, Color32::from_rgb(0x2e, 0x2a, 0x27)),
        window_corner_radius: egui::CornerRadius::same(8),
        menu_corner_radius: egui::CornerRadius::same(8),
        ..egui::Visuals::dark()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.menu_margin = egui::Margin::symmetric(6, 4);
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgb(0x14, 0x12, 0x11))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

pub fn bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .inner_margin(egui::Margin::symmetric(16, 8))
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Accent button for primary actions (Submit)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(ACCENT_TEXT))
        .fill(BTN_ACCENT)
        .corner_radius(RADIUS_DEFAULT)
}

/// Danger red button (for destructive actions like Cancel)
pub fn button_danger(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_PRIMARY))
        .fill(BTN_DANGER)
        .corner_radius(RADIUS_DEFAULT)
}

/// Context menu item with icon. Returns true if clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let w = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(egui::vec2(w, 24.0), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(rect, RADIUS_DEFAULT, lighten(BG_SURFACE, 0.12));
    }
    ui.painter().text(
        rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(FONT_LABEL),
        TEXT_SECONDARY,
    );
    response.clicked()
}

/// Sets context menu width to 1.5x the widest label.
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let max_text = labels
        .iter()
        .map(|l| {
            ui.fonts(|f| {
                f.layout_no_wrap(l.to_string(), egui::FontId::proportional(FONT_LABEL), TEXT_SECONDARY)
                    .rect
                    .width()
            })
        })
        .fold(0.0_f32, f32::max);
    let w = (max_text + 16.0) * 1.5;
    ui.set_min_width(w);
    ui.set_max_width(w);
}

/// Settings checkbox row. Returns true if toggled.
pub fn settings_checkbox(ui: &mut egui::Ui, checked: bool, label: &str, enabled: bool) -> bool {
    let full_width = ui.available_width();
    let (row_rect, row_resp) =
        ui.allocate_exact_size(egui::vec2(full_width, 20.0), egui::Sense::click());
    if enabled && row_resp.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let painter = ui.painter();
    let cb_rect = egui::Rect::from_min_size(
        egui::pos2(row_rect.min.x, row_rect.center().y - CHECKBOX_SIZE / 2.0),
        egui::vec2(CHECKBOX_SIZE, CHECKBOX_SIZE),
    );
    if checked {
        painter.rect_stroke(cb_rect, 3.0, egui::Stroke::new(1.5, ACCENT), egui::StrokeKind::Inside);
        painter.rect_filled(cb_rect.shrink(3.0), 2.0, ACCENT);
    } else {
        painter.rect_stroke(cb_rect, 3.0, egui::Stroke::new(1.5, BORDER_DEFAULT), egui::StrokeKind::Inside);
    }
    let color = if enabled { TEXT_PRIMARY } else { TEXT_DIM };
    painter.text(
        egui::pos2(cb_rect.max.x + 8.0, row_rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(FONT_BODY),
        color,
    );
    enabled && row_resp.clicked()
}

pub fn lighten(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 + (255.0 - c.r() as f32) * amount) as u8;
    let g = (c.g() as f32 + (255.0 - c.g() as f32) * amount) as u8;
    let b = (c.b() as f32 + (255.0 - c.b() as f32) * amount) as u8;
    Color32::from_rgb(r, g, b)
}

/// Copy of `c` with alpha scaled by `alpha` (0..=1), for fading overlays
pub fn with_alpha(c: Color32, alpha: f32) -> Color32 {
    let a = (c.a() as f32 * alpha.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}
