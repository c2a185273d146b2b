use egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::analysis_api::PriorityTier;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_red: Color32,
    pub accent_orange: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
    pub success: Color32,
    pub error_text: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(15, 23, 42),
        bg_secondary: Color32::from_rgb(24, 24, 27),
        bg_tertiary: Color32::from_rgb(30, 41, 59),
        panel_outline: Color32::from_rgb(51, 65, 85),
        text_primary: Color32::from_rgb(241, 245, 249),
        text_muted: Color32::from_rgb(203, 213, 225),
        accent_red: Color32::from_rgb(239, 68, 68),
        accent_orange: Color32::from_rgb(251, 146, 60),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(234, 179, 8),
        success: Color32::from_rgb(34, 197, 94),
        error_text: Color32::from_rgb(248, 113, 113),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_tertiary;
    visuals.faint_bg_color = palette.bg_primary;
    visuals.error_fg_color = palette.error_text;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_primary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_widget_fill(&mut visuals.widgets.inactive, palette);
    set_widget_fill(&mut visuals.widgets.hovered, palette);
    set_widget_fill(&mut visuals.widgets.active, palette);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_widget_fill(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(6);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Accent used for a card's left edge.
pub fn tier_color(tier: PriorityTier) -> Color32 {
    let palette = palette();
    match tier {
        PriorityTier::Critical => palette.accent_red,
        PriorityTier::Warning => palette.warning,
        PriorityTier::Normal => palette.success,
    }
}

pub fn card_fill() -> Color32 {
    palette().bg_primary
}

pub fn card_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Error,
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => palette.text_muted,
        StatusTone::Busy => palette.accent_ice,
        StatusTone::Info => palette.success,
        StatusTone::Error => palette.accent_red,
    }
}
