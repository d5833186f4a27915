use std::sync::Arc;

use async_trait::async_trait;
use jobsentry_core::insights::{JobInsightsService, ResumeUpload, RoleRecommendations};
use jobsentry_core::request::{
    LifecycleObserver, Operation, RequestError, RequestLifecycleController, RequestState,
    SubmissionToken,
};
use jobsentry_core::transcript::{ConversationTurn, MessageRole};

use super::chat::{SharedTranscript, append_turn, snapshot};

pub const RESUME_REQUIRED: &str = "Please select a resume file (PDF) before uploading.";
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "No job recommendations found.";

/// Assistant text for a recommendation result.
pub fn format_recommendations(recommendations: &RoleRecommendations) -> String {
    if recommendations.is_empty() {
        return NO_RECOMMENDATIONS_MESSAGE.to_string();
    }
    format!(
        "Here are your recommended job roles:\n\n- {}",
        recommendations.roles.join("\n- ")
    )
}

pub struct ResumeRecommendationOperation {
    service: Arc<dyn JobInsightsService>,
}

impl ResumeRecommendationOperation {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Operation for ResumeRecommendationOperation {
    type Input = Option<ResumeUpload>;
    type Output = RoleRecommendations;

    fn name(&self) -> &'static str {
        "resume_recommendation"
    }

    fn validate(&self, input: &Option<ResumeUpload>) -> Result<(), RequestError> {
        match input {
            Some(upload) if upload.is_pdf() => Ok(()),
            _ => Err(RequestError::validation(RESUME_REQUIRED)),
        }
    }

    async fn execute(
        &self,
        input: Option<ResumeUpload>,
    ) -> Result<RoleRecommendations, RequestError> {
        let upload = input.ok_or_else(|| RequestError::validation(RESUME_REQUIRED))?;
        self.service.recommend_roles(upload).await
    }
}

/// Records uploads and their outcome in the shared transcript.
struct UploadRecorder {
    transcript: SharedTranscript,
}

impl LifecycleObserver<Option<ResumeUpload>, RoleRecommendations> for UploadRecorder {
    fn dispatched(&self, _token: SubmissionToken, input: &Option<ResumeUpload>) {
        if let Some(upload) = input {
            append_turn(
                &self.transcript,
                MessageRole::User,
                &format!("Uploaded: {}", upload.file_name),
            );
        }
    }

    fn settled(&self, _token: SubmissionToken, state: &RequestState<RoleRecommendations>) {
        match state {
            RequestState::Succeeded(recommendations) => append_turn(
                &self.transcript,
                MessageRole::Assistant,
                &format_recommendations(recommendations),
            ),
            RequestState::Failed(message) => {
                append_turn(&self.transcript, MessageRole::Assistant, message)
            }
            _ => {}
        }
    }
}

/// Upload a résumé, get suggested roles back in the conversation.
pub struct ResumeScreen {
    selection: Option<ResumeUpload>,
    transcript: SharedTranscript,
    controller: RequestLifecycleController<ResumeRecommendationOperation>,
}

impl ResumeScreen {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self::with_transcript(service, SharedTranscript::default())
    }

    pub fn with_transcript(service: Arc<dyn JobInsightsService>, transcript: SharedTranscript) -> Self {
        let recorder = Arc::new(UploadRecorder {
            transcript: Arc::clone(&transcript),
        });
        Self {
            selection: None,
            transcript,
            controller: RequestLifecycleController::with_observer(
                ResumeRecommendationOperation::new(service),
                recorder,
            ),
        }
    }

    pub fn selection(&self) -> Option<&ResumeUpload> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, upload: ResumeUpload) {
        self.selection = Some(upload);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.is_in_flight() && self.selection.is_some()
    }

    /// Uploads the selected file. A valid selection is consumed; an invalid
    /// one stays selected so it can be replaced.
    pub fn submit(&mut self) -> SubmissionToken {
        let input = if self.controller.operation().validate(&self.selection).is_ok() {
            self.selection.take()
        } else {
            self.selection.clone()
        };
        self.controller.submit(input)
    }

    pub fn state(&self) -> RequestState<RoleRecommendations> {
        self.controller.current_state()
    }

    pub async fn wait_settled(&self) -> RequestState<RoleRecommendations> {
        self.controller.wait_settled().await
    }

    pub fn transcript(&self) -> Vec<ConversationTurn> {
        snapshot(&self.transcript)
    }

    pub fn controller(&self) -> &RequestLifecycleController<ResumeRecommendationOperation> {
        &self.controller
    }
}
