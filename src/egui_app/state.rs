//! Shared state types for the egui UI.

mod analyzer;
mod status;

pub use analyzer::{AnalyzerUiState, ViewState};
pub use status::StatusBarState;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    /// Issue form, request flags and the latest findings.
    pub analyzer: AnalyzerUiState,
    /// Footer status line.
    pub status: StatusBarState,
}
