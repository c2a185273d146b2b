//! Blocking client for the issue analysis endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::AnalysisSettings;
use crate::http_client::{self, HttpTimeouts};

use super::priority::PriorityTier;

/// Endpoint used when no config overrides it.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze";
/// The only failure text ever shown to the user.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to analyze issue. Please try again.";

const MAX_ANALYSIS_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// JSON payload sent to the analysis endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    /// Issue description exactly as typed.
    pub issue_text: String,
}

/// One structured analysis result returned for a submitted issue.
///
/// Every field is required; a response missing any of them is rejected as a
/// whole rather than rendered partially.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Short classification, shown as the card heading.
    #[serde(rename = "Issue Type")]
    pub issue_type: String,
    /// Affected areas in the order the service listed them.
    #[serde(rename = "Impact Area")]
    pub impact_area: Vec<String>,
    /// Numeric score carried as text; see [`PriorityTier::from_score`].
    #[serde(rename = "Priority Score", deserialize_with = "text_or_number")]
    pub priority_score: String,
    /// Recommended steps, in order.
    #[serde(rename = "Action Plan")]
    pub action_plan: Vec<String>,
    /// Free-form estimate such as `"40%"`, displayed as received.
    #[serde(rename = "Estimated Risk Reduction")]
    pub estimated_risk_reduction: String,
    /// Contact name to phone number; numbers sent as JSON numbers are kept as text.
    #[serde(
        rename = "Emergency Numbers to Call",
        deserialize_with = "contacts_as_text"
    )]
    pub emergency_numbers: BTreeMap<String, String>,
}

impl Finding {
    pub fn tier(&self) -> PriorityTier {
        PriorityTier::from_score(&self.priority_score)
    }
}

/// Why an analysis request failed.
///
/// The variants are kept for logging; users always see [`UNAVAILABLE_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// The service answered outside 2xx.
    #[error("Analysis service responded with HTTP {code}")]
    Status {
        /// HTTP status code.
        code: u16,
    },
    /// The body could not be read or exceeded the size limit.
    #[error("Failed to read response body: {0}")]
    Body(String),
    /// The body was not an array of complete findings.
    #[error("JSON error: {0}")]
    Json(String),
    /// The worker panicked or could not be started.
    #[error("Analysis worker stopped before reporting a result")]
    Interrupted,
}

impl AnalyzeError {
    pub fn user_message(&self) -> &'static str {
        UNAVAILABLE_MESSAGE
    }
}

/// Sends issue descriptions to a single analysis endpoint.
#[derive(Clone, Debug)]
pub struct AnalysisClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>, timeouts: HttpTimeouts) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: http_client::build_agent(timeouts),
        }
    }

    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self::new(settings.endpoint.clone(), settings.timeouts())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the issue text and parse the findings list.
    ///
    /// Blocks for the whole round trip; call it from a worker thread.
    pub fn analyze(&self, issue_text: &str) -> Result<Vec<Finding>, AnalyzeError> {
        let request = AnalyzeRequest {
            issue_text: issue_text.to_string(),
        };
        let response = match self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_json(&request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                if let Ok(body) = http_client::read_response_text(response, MAX_ERROR_BODY_BYTES) {
                    tracing::debug!(code, body = %body.trim(), "Analysis service rejected request");
                }
                return Err(AnalyzeError::Status { code });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(AnalyzeError::Transport(err.to_string()));
            }
        };
        let code = response.status();
        if !(200..300).contains(&code) {
            return Err(AnalyzeError::Status { code });
        }

        let body = http_client::read_response_text(response, MAX_ANALYSIS_RESPONSE_BYTES)
            .map_err(|err| AnalyzeError::Body(err.to_string()))?;
        parse_findings(&body)
    }
}

/// Parse a response body into findings, rejecting anything that is not an
/// array of complete findings.
pub fn parse_findings(body: &str) -> Result<Vec<Finding>, AnalyzeError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AnalyzeError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| AnalyzeError::Json(err.to_string()))
}

/// A string, or a bare JSON number standing in for one.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextWire {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl From<TextWire> for String {
    fn from(value: TextWire) -> Self {
        match value {
            TextWire::Text(text) => text,
            TextWire::Integer(value) => value.to_string(),
            TextWire::Unsigned(value) => value.to_string(),
            TextWire::Float(value) => value.to_string(),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextWire::deserialize(deserializer).map(String::from)
}

fn contacts_as_text<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let contacts = BTreeMap::<String, TextWire>::deserialize(deserializer)?;
    Ok(contacts
        .into_iter()
        .map(|(name, number)| (name, String::from(number)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
      {
        "Issue Type": "Garbage Overflow",
        "Impact Area": ["Ward 12", "Market Road"],
        "Priority Score": "8",
        "Action Plan": ["Report to municipal helpline", "Avoid burning waste"],
        "Estimated Risk Reduction": "40%",
        "Emergency Numbers to Call": { "Municipal Corporation": "1533" }
      },
      {
        "Issue Type": "Street Crime",
        "Impact Area": ["Sector 4"],
        "Priority Score": 9,
        "Action Plan": ["Call police"],
        "Estimated Risk Reduction": "High",
        "Emergency Numbers to Call": {}
      }
    ]"#;

    #[test]
    fn request_serializes_under_issue_text() {
        let request = AnalyzeRequest {
            issue_text: "Streetlight broken".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"issue_text":"Streetlight broken"}"#
        );
    }

    #[test]
    fn parses_findings_in_order() {
        let findings = parse_findings(SAMPLE).unwrap();
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].issue_type, "Garbage Overflow");
        assert_eq!(findings[0].impact_area, vec!["Ward 12", "Market Road"]);
        assert_eq!(findings[0].tier(), PriorityTier::Warning);
        assert_eq!(
            findings[0].emergency_numbers.get("Municipal Corporation"),
            Some(&"1533".to_string())
        );
        assert_eq!(findings[1].issue_type, "Street Crime");
        assert!(findings[1].emergency_numbers.is_empty());
    }

    #[test]
    fn numeric_priority_is_kept_as_text() {
        let findings = parse_findings(SAMPLE).unwrap();
        assert_eq!(findings[1].priority_score, "9");
        assert_eq!(findings[1].tier(), PriorityTier::Critical);
    }

    #[test]
    fn numeric_phone_numbers_are_kept_as_text() {
        let body = r#"[{ "Issue Type": "Fire", "Impact Area": ["Block A"], "Priority Score": "10",
            "Action Plan": ["Evacuate"], "Estimated Risk Reduction": "70%",
            "Emergency Numbers to Call": { "Fire Brigade": 101, "Helpline": "1916" } }]"#;
        let findings = parse_findings(body).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].emergency_numbers.get("Fire Brigade"),
            Some(&"101".to_string())
        );
        assert_eq!(
            findings[0].emergency_numbers.get("Helpline"),
            Some(&"1916".to_string())
        );
    }

    #[test]
    fn nested_contact_values_are_rejected() {
        let body = r#"[{ "Issue Type": "Fire", "Impact Area": [], "Priority Score": "10",
            "Action Plan": [], "Estimated Risk Reduction": "70%",
            "Emergency Numbers to Call": { "Fire Brigade": ["101"] } }]"#;
        assert!(matches!(parse_findings(body), Err(AnalyzeError::Json(_))));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_findings(" [] ").unwrap().is_empty());
    }

    #[test]
    fn missing_field_is_rejected() {
        let body = r#"[{ "Issue Type": "Flooding", "Impact Area": [], "Priority Score": "5",
            "Action Plan": [], "Estimated Risk Reduction": "10%" }]"#;
        let err = parse_findings(body).unwrap_err();
        assert!(matches!(err, AnalyzeError::Json(_)));
        assert!(err.to_string().contains("Emergency Numbers to Call"));
    }

    #[test]
    fn non_array_and_empty_bodies_are_rejected() {
        assert!(matches!(
            parse_findings(r#"{"detail": "oops"}"#),
            Err(AnalyzeError::Json(_))
        ));
        assert!(matches!(parse_findings("   "), Err(AnalyzeError::Json(_))));
    }

    #[test]
    fn every_error_shows_the_same_message() {
        let errors = [
            AnalyzeError::Transport("connection refused".into()),
            AnalyzeError::Status { code: 500 },
            AnalyzeError::Body("truncated".into()),
            AnalyzeError::Json("expected array".into()),
            AnalyzeError::Interrupted,
        ];
        for err in errors {
            assert_eq!(err.user_message(), UNAVAILABLE_MESSAGE);
        }
    }
}
