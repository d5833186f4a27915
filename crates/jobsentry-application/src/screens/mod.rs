//! Dashboard screens.

mod alternatives;
mod chat;
mod detection;
mod resume;
mod roadmap;

pub use alternatives::{
    AlternativeSearchOperation, AlternativesScreen, NO_RESULTS_MESSAGE, ROLE_REQUIRED,
};
pub use chat::{AssistantTurnOperation, ChatScreen, MESSAGE_REQUIRED, SharedTranscript, TranscriptRecorder};
pub use detection::{DESCRIPTION_REQUIRED, DetectionScreen, FraudAnalysisOperation, FraudReport, Verdict};
pub use resume::{
    NO_RECOMMENDATIONS_MESSAGE, RESUME_REQUIRED, ResumeRecommendationOperation, ResumeScreen,
    format_recommendations,
};
pub use roadmap::{ROADMAP_INPUTS_REQUIRED, RoadmapOperation, RoadmapScreen};

use jobsentry_core::request::RequestError;

/// Rejects blank input with `message`.
fn require(value: &str, message: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        Err(RequestError::validation(message))
    } else {
        Ok(())
    }
}
