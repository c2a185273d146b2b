use crate::analysis_api::Finding;

/// Which of the mutually exclusive view states the analyzer is in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing submitted yet; only the form is shown.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request failed.
    Error,
    /// The last request succeeded, possibly with zero findings.
    Populated,
}

/// UI state for the issue form and its latest outcome.
///
/// `error` and `findings` are never both set; dispatch clears both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyzerUiState {
    /// Issue description, edited in place by the text field.
    pub issue_text: String,
    /// True while a request is in flight.
    pub loading: bool,
    /// Message shown under the form after a failed request.
    pub error: Option<String>,
    /// Findings from the last successful request; `None` before any success
    /// and after a failure.
    pub findings: Option<Vec<Finding>>,
    /// Whether the text field should grab focus on the next frame.
    pub focus_input_requested: bool,
}

impl AnalyzerUiState {
    pub fn view_state(&self) -> ViewState {
        if self.loading {
            ViewState::Loading
        } else if self.error.is_some() {
            ViewState::Error
        } else if self.findings.is_some() {
            ViewState::Populated
        } else {
            ViewState::Idle
        }
    }

    /// Findings to render; empty unless the last request succeeded.
    pub fn findings(&self) -> &[Finding] {
        self.findings.as_deref().unwrap_or_default()
    }
}
