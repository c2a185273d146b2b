//! Converts findings into the display-ready structs the card renderer draws.

use std::collections::BTreeMap;

use crate::analysis_api::{Finding, PriorityTier};

/// Everything one result card shows, already formatted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindingCard {
    /// Severity that picks the card's accent colour.
    pub tier: PriorityTier,
    /// Heading text.
    pub issue_type: String,
    /// Impact areas joined with `", "`.
    pub impact_area: String,
    /// Priority score exactly as received.
    pub priority: String,
    /// Bullet lines, in response order.
    pub action_plan: Vec<String>,
    /// Estimated risk reduction as received.
    pub risk_reduction: String,
    /// `<name>: <number>` lines; `None` hides the emergency block.
    pub emergency_contacts: Option<Vec<String>>,
}

/// Build one card per finding, preserving order.
pub fn finding_cards(findings: &[Finding]) -> Vec<FindingCard> {
    findings.iter().map(finding_card).collect()
}

pub fn finding_card(finding: &Finding) -> FindingCard {
    FindingCard {
        tier: finding.tier(),
        issue_type: finding.issue_type.clone(),
        impact_area: finding.impact_area.join(", "),
        priority: finding.priority_score.clone(),
        action_plan: finding.action_plan.clone(),
        risk_reduction: finding.estimated_risk_reduction.clone(),
        emergency_contacts: emergency_contact_lines(&finding.emergency_numbers),
    }
}

fn emergency_contact_lines(numbers: &BTreeMap<String, String>) -> Option<Vec<String>> {
    if numbers.is_empty() {
        return None;
    }
    Some(
        numbers
            .iter()
            .map(|(name, number)| format!("{name}: {number}"))
            .collect(),
    )
}
