#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based NAGAR AI client.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use nagar::config;
use nagar::egui_app::controller::AnalyzerController;
use nagar::egui_app::ui::{APP_TITLE, AnalyzerApp, MIN_VIEWPORT_SIZE};
use nagar::logging;

const INITIAL_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 760.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = config::load_or_default();
    let log_settings = settings
        .as_ref()
        .map(|settings| settings.logging.clone())
        .unwrap_or_default();
    if let Err(err) = logging::init(&log_settings) {
        eprintln!("Logging disabled: {err}");
    }
    if let Ok(settings) = &settings {
        tracing::info!(
            endpoint = %settings.analysis.endpoint,
            connect_timeout_secs = settings.analysis.connect_timeout_secs,
            read_timeout_secs = settings.analysis.read_timeout_secs,
            "Analysis service configured"
        );
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_inner_size(INITIAL_VIEWPORT_SIZE)
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| match settings {
            Ok(settings) => Ok(Box::new(AnalyzerApp::new(
                AnalyzerController::from_settings(&settings),
            ))),
            Err(err) => {
                tracing::error!("Failed to load settings: {err}");
                Ok(Box::new(LaunchError {
                    message: err.to_string(),
                }))
            }
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start NAGAR AI");
                ui.label(&self.message);
            });
        });
    }
}
