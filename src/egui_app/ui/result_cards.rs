use eframe::egui::{self, Align, Frame, Layout, Margin, Rect, RichText};

use super::style;
use crate::egui_app::view_model::FindingCard;

const TIER_EDGE_WIDTH: f32 = 4.0;

/// Draw every card top to bottom; nothing is drawn for an empty slice.
pub(super) fn render_finding_cards(ui: &mut egui::Ui, cards: &[FindingCard]) {
    for (index, card) in cards.iter().enumerate() {
        ui.push_id(("finding_card", index), |ui| {
            render_finding_card(ui, card);
        });
        ui.add_space(16.0);
    }
}

fn render_finding_card(ui: &mut egui::Ui, card: &FindingCard) {
    let palette = style::palette();
    let response = Frame::new()
        .fill(style::card_fill())
        .stroke(style::card_border())
        .corner_radius(8.0)
        .inner_margin(Margin {
            left: 20,
            right: 16,
            top: 16,
            bottom: 16,
        })
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        RichText::new(format!("⚠ {}", card.issue_type))
                            .size(22.0)
                            .strong()
                            .color(palette.accent_orange),
                    );
                    ui.label(
                        RichText::new(card.tier.label())
                            .small()
                            .color(style::tier_color(card.tier)),
                    );
                });
                ui.add_space(8.0);
                labelled_line(ui, "Impact Area:", &card.impact_area, palette.text_muted);
                labelled_line(ui, "Priority:", &card.priority, palette.text_primary);

                ui.add_space(6.0);
                ui.label(RichText::new("Action Plan:").strong());
                bullet_list(ui, &card.action_plan, palette.text_muted);

                ui.add_space(6.0);
                labelled_line(ui, "Risk Reduction:", &card.risk_reduction, palette.text_primary);

                if let Some(contacts) = &card.emergency_contacts {
                    ui.add_space(6.0);
                    ui.label(RichText::new("☎ Emergency Numbers").strong());
                    bullet_list(ui, contacts, palette.text_muted);
                }
            });
        })
        .response;

    let rect = response.rect;
    let edge = Rect::from_min_max(
        rect.min,
        egui::pos2(rect.min.x + TIER_EDGE_WIDTH, rect.max.y),
    );
    ui.painter()
        .rect_filled(edge, 0.0, style::tier_color(card.tier));
}

fn labelled_line(ui: &mut egui::Ui, label: &str, value: &str, value_color: egui::Color32) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(label).strong());
        ui.label(RichText::new(value).color(value_color));
    });
}

fn bullet_list(ui: &mut egui::Ui, items: &[String], color: egui::Color32) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("•").color(color));
            ui.label(RichText::new(item).color(color));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_api::PriorityTier;

    fn card(tier: PriorityTier, contacts: Option<Vec<String>>) -> FindingCard {
        FindingCard {
            tier,
            issue_type: "Illegal Parking".into(),
            impact_area: "MG Road, Church Street".into(),
            priority: "7".into(),
            action_plan: vec!["Photograph vehicles".into(), "Notify traffic police".into()],
            risk_reduction: "25%".into(),
            emergency_contacts: contacts,
        }
    }

    #[test]
    fn draws_cards_for_every_tier_without_panicking() {
        let cards = vec![
            card(PriorityTier::Critical, Some(vec!["Police: 100".into()])),
            card(PriorityTier::Warning, None),
            card(PriorityTier::Normal, Some(Vec::new())),
        ];
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| render_finding_cards(ui, &cards));
        });
    }
}
