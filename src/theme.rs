//! Slate light/dark palettes for the board chrome

use egui::Color32;

use crate::constellation::Rgba;
use crate::core::ThemeMode;

/// Dark palette, matched to the night sky behind the constellation
pub mod dark {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(15, 23, 42); // slate-900
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(30, 41, 59); // slate-800
    pub const BG_HOVER: Color32 = Color32::from_rgb(51, 65, 85); // slate-700

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(241, 245, 249);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139);

    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85);
    pub const ACCENT: Color32 = Color32::from_rgb(147, 197, 253); // blue-300
}

/// Light palette, matched to the daytime network backdrop
pub mod light {
    use super::Color32;

    pub const BG_PRIMARY: Color32 = Color32::from_rgb(248, 250, 252); // slate-50
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BG_HOVER: Color32 = Color32::from_rgb(241, 245, 249); // slate-100

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(15, 23, 42);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(71, 85, 105);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 163, 184);

    pub const BORDER: Color32 = Color32::from_rgb(226, 232, 240);
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246); // blue-500
}

/// Status colours shared by both palettes
pub const STAR_GOLD: Color32 = Color32::from_rgb(250, 204, 21);
pub const OK_GREEN: Color32 = Color32::from_rgb(34, 197, 94);
pub const WARN_AMBER: Color32 = Color32::from_rgb(245, 158, 11);
pub const ERROR_RED: Color32 = Color32::from_rgb(239, 68, 68);

/// Colours the widgets pick per mode
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg_elevated: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    pub accent: Color32,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                bg_elevated: dark::BG_ELEVATED,
                text_primary: dark::TEXT_PRIMARY,
                text_secondary: dark::TEXT_SECONDARY,
                text_muted: dark::TEXT_MUTED,
                border: dark::BORDER,
                accent: dark::ACCENT,
            },
            ThemeMode::Light => Self {
                bg_elevated: light::BG_ELEVATED,
                text_primary: light::TEXT_PRIMARY,
                text_secondary: light::TEXT_SECONDARY,
                text_muted: light::TEXT_MUTED,
                border: light::BORDER,
                accent: light::ACCENT,
            },
        }
    }
}

/// Convert a field colour for the egui painter
pub fn to_color32(c: Rgba) -> Color32 {
    let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// egui Visuals for the given mode
pub fn visuals_for(mode: ThemeMode) -> egui::Visuals {
    let (mut visuals, bg, elevated, hover, text, secondary, muted, border) = match mode {
        ThemeMode::Dark => (
            egui::Visuals::dark(),
            dark::BG_PRIMARY,
            dark::BG_ELEVATED,
            dark::BG_HOVER,
            dark::TEXT_PRIMARY,
            dark::TEXT_SECONDARY,
            dark::TEXT_MUTED,
            dark::BORDER,
        ),
        ThemeMode::Light => (
            egui::Visuals::light(),
            light::BG_PRIMARY,
            light::BG_ELEVATED,
            light::BG_HOVER,
            light::TEXT_PRIMARY,
            light::TEXT_SECONDARY,
            light::TEXT_MUTED,
            light::BORDER,
        ),
    };
    let accent = Palette::for_mode(mode).accent;

    visuals.panel_fill = bg;
    visuals.window_fill = elevated;
    visuals.extreme_bg_color = elevated;
    visuals.faint_bg_color = hover;
    visuals.override_text_color = Some(text);

    visuals.widgets.noninteractive.bg_fill = bg;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, muted);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, border);

    visuals.widgets.inactive.bg_fill = elevated;
    visuals.widgets.inactive.weak_bg_fill = elevated;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, secondary);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, border);

    visuals.widgets.hovered.bg_fill = hover;
    visuals.widgets.hovered.weak_bg_fill = hover;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, text);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, accent);

    visuals.widgets.active.bg_fill = hover;
    visuals.widgets.active.weak_bg_fill = hover;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, text);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, accent);

    visuals.selection.bg_fill = accent.linear_multiply(0.4);
    visuals.selection.stroke = egui::Stroke::new(1.0, text);
    visuals.hyperlink_color = accent;

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
