//! egui renderer for the issue analyzer window.

mod header;
mod input_card;
mod result_cards;
mod status_bar;
pub mod style;

use std::time::Duration;

use eframe::egui;

use crate::egui_app::controller::AnalyzerController;
use input_card::InputAction;

/// Window and header title.
pub const APP_TITLE: &str = "NAGAR AI";
/// Smallest window size that keeps the form usable.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(480.0, 420.0);
const CONTENT_MAX_WIDTH: f32 = 900.0;
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the analyzer view on top of an [`AnalyzerController`].
pub struct AnalyzerApp {
    controller: AnalyzerController,
    visuals_set: bool,
}

impl AnalyzerApp {
    pub fn new(controller: AnalyzerController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    pub fn controller(&self) -> &AnalyzerController {
        &self.controller
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Draw one frame and apply any finished background work.
    pub fn render(&mut self, ctx: &egui::Context) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();

        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter)) {
            self.controller.submit_analysis();
        }

        status_bar::render_status_bar(ctx, &self.controller.ui.status);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(CONTENT_MAX_WIDTH);
                        self.render_content(ui);
                    });
                });
        });

        if self.controller.is_loading() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }
    }

    fn render_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        header::render_header(ui);
        ui.add_space(24.0);

        let action = input_card::render_input_card(ui, &mut self.controller);
        if action == InputAction::Submit {
            self.controller.submit_analysis();
        }

        ui.add_space(24.0);
        let cards = self.controller.finding_cards();
        result_cards::render_finding_cards(ui, &cards);
        ui.add_space(24.0);
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}
