//! Contract of the remote job-insights service.
//!
//! The core never talks HTTP; it consumes [`JobInsightsService`], one call
//! per logical operation. Implementations live in `jobsentry-interaction`.

mod endpoint;
mod model;
mod service;

pub use endpoint::{Endpoint, MALFORMED_RESPONSE_MESSAGE};
pub use model::{
    AlternativeSearchRequest, AssistantReply, AssistantTurnRequest, FraudAnalysis,
    FraudAnalysisRequest, GeneratedRoadmap, JobListing, ResumeUpload, RoadmapRequest,
    RoleRecommendations,
};
pub use service::JobInsightsService;
