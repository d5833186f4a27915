use std::sync::Arc;

use jobsentry_core::insights::JobInsightsService;

use crate::screens::{
    AlternativesScreen, ChatScreen, DetectionScreen, ResumeScreen, RoadmapScreen,
};

/// All screens of the dashboard, backed by one insights service.
///
/// The chat and résumé screens share a transcript, so uploads and replies
/// appear in one conversation.
pub struct Dashboard {
    pub detection: DetectionScreen,
    pub alternatives: AlternativesScreen,
    pub chat: ChatScreen,
    pub resume: ResumeScreen,
    pub roadmap: RoadmapScreen,
}

impl Dashboard {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        let chat = ChatScreen::new(Arc::clone(&service));
        let resume = ResumeScreen::with_transcript(Arc::clone(&service), chat.shared_transcript());

        Self {
            detection: DetectionScreen::new(Arc::clone(&service)),
            alternatives: AlternativesScreen::new(Arc::clone(&service)),
            chat,
            resume,
            roadmap: RoadmapScreen::new(service),
        }
    }
}
