//! UI theme constants: dark plum surfaces with the brand pink accent

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BG_PRIMARY: Color32 = Color32::from_rgb(28, 18, 26);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(44, 26, 40);
pub const BG_SURFACE: Color32 = Color32::from_rgb(74, 29, 61);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(236, 230, 234);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(172, 160, 170);
pub const ACCENT: Color32 = Color32::from_rgb(217, 27, 96);
pub const USER_BUBBLE: Color32 = Color32::from_rgb(96, 38, 80);
pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const ERROR_BG: Color32 = Color32::from_rgb(60, 20, 24);
pub const WARNING: Color32 = Color32::from_rgb(250, 204, 21);
pub const TABLE_HEADER: Color32 = Color32::from_rgb(59, 130, 246);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(10);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Colour of a key-finding change: green when it starts with `+`,
/// red with `-`, neutral otherwise.
pub fn change_color(change: &str) -> Color32 {
    match change.trim_start().chars().next() {
        Some('+') => SUCCESS,
        Some('-') | Some('−') => ERROR,
        _ => TEXT_SECONDARY,
    }
}

/// Apply the dark theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_PRIMARY;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.weak_bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    style.visuals.widgets.hovered.bg_fill = USER_BUBBLE;
    style.visuals.widgets.hovered.weak_bg_fill = USER_BUBBLE;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.active.bg_fill = ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);

    style.visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
