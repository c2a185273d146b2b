use eframe::egui::{self, RichText};

use super::{APP_TITLE, style};

const TAGLINE: &str = "India-focused AI for Urban Safety & Civic Intelligence";

pub(super) fn render_header(ui: &mut egui::Ui) {
    let palette = style::palette();
    ui.label(
        RichText::new(format!("⚠ {APP_TITLE}"))
            .size(32.0)
            .strong()
            .color(palette.text_primary),
    );
    ui.add_space(4.0);
    ui.label(RichText::new(TAGLINE).color(palette.text_muted));
}
