//! Civic issue analysis service: wire types, client and priority tiers.

pub mod api;
pub mod priority;

pub use api::{
    AnalysisClient, AnalyzeError, AnalyzeRequest, DEFAULT_ENDPOINT, Finding, UNAVAILABLE_MESSAGE,
    parse_findings,
};
pub use priority::{PriorityTier, parse_priority_score};
