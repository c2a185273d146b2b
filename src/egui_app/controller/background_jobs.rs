use super::AnalyzerController;
use super::jobs::{AnalysisJobResult, JobMessage};
use crate::egui_app::ui::style::StatusTone;

impl AnalyzerController {
    /// Apply every finished background job. Call once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => break,
            };
            match message {
                JobMessage::AnalysisFinished(message) => handle_analysis_finished(self, message),
            }
        }
    }
}

fn handle_analysis_finished(controller: &mut AnalyzerController, message: AnalysisJobResult) {
    if controller.jobs.pending_request_id() != Some(message.request_id) {
        tracing::debug!(
            request_id = message.request_id,
            "Dropping result of superseded analysis request"
        );
        return;
    }
    controller.jobs.clear_analysis();

    let state = &mut controller.ui.analyzer;
    match message.result {
        Ok(findings) => {
            tracing::info!(count = findings.len(), "Issue analysis completed");
            let count = findings.len();
            state.error = None;
            state.findings = Some(findings);
            let text = match count {
                0 => "No findings returned".to_string(),
                1 => "1 finding".to_string(),
                n => format!("{n} findings"),
            };
            controller.set_status(text, "Done", StatusTone::Info);
        }
        Err(err) => {
            tracing::warn!(error = %err, "Issue analysis failed");
            state.findings = None;
            state.error = Some(err.user_message().to_string());
            controller.set_status("Analysis failed", "Error", StatusTone::Error);
        }
    }
    controller.ui.analyzer.loading = false;
}
