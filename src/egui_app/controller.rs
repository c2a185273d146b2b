//! Maintains analyzer state and bridges the analysis client to the egui UI.

mod background_jobs;
mod jobs;


use crate::analysis_api::AnalysisClient;
use crate::config::AppSettings;
use crate::egui_app::state::{UiState, ViewState};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model::{self, FindingCard};

/// Owns the UI model and dispatches analysis requests.
///
/// All state changes happen on the thread that calls into the controller;
/// the network call runs on a worker and reports back through
/// [`AnalyzerController::poll_background_jobs`].
pub struct AnalyzerController {
    /// State read by the renderer.
    pub ui: UiState,
    client: AnalysisClient,
    jobs: jobs::ControllerJobs,
}

impl AnalyzerController {
    pub fn new(client: AnalysisClient) -> Self {
        let mut ui = UiState::default();
        ui.analyzer.focus_input_requested = true;
        Self {
            ui,
            client,
            jobs: jobs::ControllerJobs::new(),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(AnalysisClient::from_settings(&settings.analysis))
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn issue_text(&self) -> &str {
        &self.ui.analyzer.issue_text
    }

    pub fn set_issue_text(&mut self, text: impl Into<String>) {
        self.ui.analyzer.issue_text = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.ui.analyzer.loading
    }

    pub fn view_state(&self) -> ViewState {
        self.ui.analyzer.view_state()
    }

    /// Whether the submit control should accept a click.
    pub fn can_submit(&self) -> bool {
        !self.ui.analyzer.loading
    }

    /// Cards for the current findings, in response order.
    pub fn finding_cards(&self) -> Vec<FindingCard> {
        view_model::finding_cards(self.ui.analyzer.findings())
    }

    /// Send the current issue text for analysis.
    ///
    /// Does nothing when the text is blank or a request is already in flight.
    /// Otherwise marks the view as loading and clears the previous error and
    /// findings before the request leaves. Returns whether a request was sent.
    pub fn submit_analysis(&mut self) -> bool {
        if self.ui.analyzer.issue_text.trim().is_empty() {
            return false;
        }
        if self.ui.analyzer.loading || self.jobs.analysis_in_progress() {
            tracing::debug!("Ignoring submit while an analysis is in flight");
            return false;
        }

        let issue_text = self.ui.analyzer.issue_text.clone();
        self.ui.analyzer.loading = true;
        self.ui.analyzer.error = None;
        self.ui.analyzer.findings = None;
        self.set_status("Analyzing issue…", "Busy", StatusTone::Busy);

        tracing::info!(
            endpoint = %self.client.endpoint(),
            chars = issue_text.chars().count(),
            "Dispatching issue analysis"
        );
        self.jobs
            .begin_analysis(self.client.clone(), issue_text)
            .is_some()
    }

    pub(crate) fn set_status(
        &mut self,
        text: impl Into<String>,
        badge_label: impl Into<String>,
        tone: StatusTone,
    ) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = badge_label.into();
        self.ui.status.tone = tone;
    }
}
