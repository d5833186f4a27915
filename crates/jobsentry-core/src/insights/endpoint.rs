use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown for any response that fails shape validation.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Received a malformed response from the server.";

/// One remote operation of the insights service.
///
/// Owns the route and the user-facing failure texts so every client and
/// screen reports the same messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    FraudAnalysis,
    AlternativeSearch,
    AssistantTurn,
    RoadmapGeneration,
    ResumeRecommendation,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::FraudAnalysis,
        Endpoint::AlternativeSearch,
        Endpoint::AssistantTurn,
        Endpoint::RoadmapGeneration,
        Endpoint::ResumeRecommendation,
    ];

    /// Route relative to the backend base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::FraudAnalysis => "/jobs/detect",
            Endpoint::AlternativeSearch => "/alternatives/search-google",
            Endpoint::AssistantTurn => "/chatbot/message",
            Endpoint::RoadmapGeneration => "/insight/generate-roadmap",
            Endpoint::ResumeRecommendation => "/chatbot/upload-resume",
        }
    }

    /// Message shown when the call could not complete at all.
    pub fn transport_failure_message(self) -> &'static str {
        match self {
            Endpoint::FraudAnalysis => "Failed to connect to the server. Please try again later.",
            Endpoint::AlternativeSearch => "Error fetching jobs. Please try again.",
            Endpoint::AssistantTurn
            | Endpoint::RoadmapGeneration
            | Endpoint::ResumeRecommendation => "Error connecting to the backend.",
        }
    }

    /// Message shown when the service reports failure without a message.
    pub fn remote_failure_fallback(self) -> &'static str {
        match self {
            Endpoint::FraudAnalysis => "Failed to analyze the job posting.",
            Endpoint::AlternativeSearch => "Failed to fetch jobs.",
            Endpoint::AssistantTurn => "Failed to get a reply from the assistant.",
            Endpoint::RoadmapGeneration => "Failed to generate roadmap.",
            Endpoint::ResumeRecommendation => "Failed to fetch job recommendations.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::FraudAnalysis => "fraud_analysis",
            Endpoint::AlternativeSearch => "alternative_search",
            Endpoint::AssistantTurn => "assistant_turn",
            Endpoint::RoadmapGeneration => "roadmap_generation",
            Endpoint::ResumeRecommendation => "resume_recommendation",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
