use async_trait::async_trait;

use super::model::{
    AlternativeSearchRequest, AssistantReply, AssistantTurnRequest, FraudAnalysis,
    FraudAnalysisRequest, GeneratedRoadmap, JobListing, ResumeUpload, RoadmapRequest,
    RoleRecommendations,
};
use crate::request::RequestError;

/// Remote collaborator behind every screen.
///
/// Implementations must report failures as [`RequestError`] variants other
/// than `Validation`; local checks belong to the operations that call them.
#[async_trait]
pub trait JobInsightsService: Send + Sync {
    async fn analyze_posting(
        &self,
        request: FraudAnalysisRequest,
    ) -> Result<FraudAnalysis, RequestError>;

    async fn search_alternatives(
        &self,
        request: AlternativeSearchRequest,
    ) -> Result<Vec<JobListing>, RequestError>;

    async fn assistant_turn(
        &self,
        request: AssistantTurnRequest,
    ) -> Result<AssistantReply, RequestError>;

    async fn generate_roadmap(
        &self,
        request: RoadmapRequest,
    ) -> Result<GeneratedRoadmap, RequestError>;

    async fn recommend_roles(
        &self,
        upload: ResumeUpload,
    ) -> Result<RoleRecommendations, RequestError>;
}
