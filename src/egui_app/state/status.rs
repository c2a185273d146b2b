use crate::egui_app::ui::style::StatusTone;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Tone used to color the badge.
    pub tone: StatusTone,
}

impl StatusBarState {
    /// Status shown before anything has been submitted.
    pub fn idle() -> Self {
        Self {
            text: "Describe an urban issue to get started".into(),
            badge_label: "Ready".into(),
            tone: StatusTone::Idle,
        }
    }
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self::idle()
    }
}
