use egui::{Frame, Margin, RichText};

use super::style;
use crate::egui_app::state::StatusBarState;

pub(super) fn render_status_bar(ctx: &egui::Context, status: &StatusBarState) {
    let palette = style::palette();
    egui::TopBottomPanel::bottom("status_bar")
        .frame(
            Frame::new()
                .fill(palette.bg_primary)
                .inner_margin(Margin::symmetric(8, 4)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (badge_rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().circle_filled(
                    badge_rect.center(),
                    5.0,
                    style::status_badge_color(status.tone),
                );
                ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                ui.separator();
                ui.label(RichText::new(&status.text).color(palette.text_muted));
            });
        });
}
