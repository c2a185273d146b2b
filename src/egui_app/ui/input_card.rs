use eframe::egui::{self, Align, Frame, Layout, Margin, RichText};

use super::style;
use crate::egui_app::controller::AnalyzerController;

const ISSUE_HINT: &str = "Describe your urban issue to get an AI-agent powered solution\n(e.g. garbage, crime, traffic)";
const SUBMIT_LABEL: &str = "Analyze Issue  ➤";
const BUSY_LABEL: &str = "Analyzing...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum InputAction {
    None,
    Submit,
}

/// Issue text field, submit button and the error line.
pub(super) fn render_input_card(ui: &mut egui::Ui, controller: &mut AnalyzerController) -> InputAction {
    let palette = style::palette();
    let can_submit = controller.can_submit();
    let mut action = InputAction::None;

    Frame::new()
        .fill(palette.bg_primary)
        .stroke(style::card_border())
        .corner_radius(8.0)
        .inner_margin(Margin::same(20))
        .show(ui, |ui| {
            ui.with_layout(Layout::top_down(Align::Min), |ui| {
                let state = &mut controller.ui.analyzer;
                let response = ui.add(
                    egui::TextEdit::multiline(&mut state.issue_text)
                        .hint_text(ISSUE_HINT)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
                if state.focus_input_requested && !response.has_focus() {
                    response.request_focus();
                    state.focus_input_requested = false;
                }
                ui.add_space(12.0);

                let label = if state.loading { BUSY_LABEL } else { SUBMIT_LABEL };
                let button = egui::Button::new(RichText::new(label).size(16.0))
                    .min_size(egui::vec2(ui.available_width(), 36.0));
                if ui.add_enabled(can_submit, button).clicked() {
                    action = InputAction::Submit;
                }

                if !state.loading
                    && let Some(error) = state.error.as_deref()
                {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(error).color(palette.error_text));
                    });
                }
            });
        });
    action
}
