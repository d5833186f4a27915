use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use jobsentry_core::insights::{AssistantReply, AssistantTurnRequest, JobInsightsService};
use jobsentry_core::request::{
    LifecycleObserver, Operation, RequestError, RequestLifecycleController, RequestState,
    SubmissionToken,
};
use jobsentry_core::transcript::{ChatTranscript, ConversationTurn, MessageRole};
use tracing::trace;

use super::require;

pub const MESSAGE_REQUIRED: &str = "Please enter a message.";

/// Transcript shared between the chat and résumé screens.
pub type SharedTranscript = Arc<Mutex<ChatTranscript>>;

pub(crate) fn append_turn(transcript: &SharedTranscript, sender: MessageRole, text: &str) {
    let mut transcript = transcript.lock().unwrap_or_else(PoisonError::into_inner);
    let turn = transcript.append(sender, text);
    trace!(sequence = turn.sequence, sender = ?turn.sender, "transcript turn appended");
}

pub(crate) fn snapshot(transcript: &SharedTranscript) -> Vec<ConversationTurn> {
    transcript
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .all()
        .to_vec()
}

/// Mirrors assistant submissions into the transcript.
///
/// The user turn is recorded on dispatch, the reply or failure message on
/// settle. A superseded submission keeps its user turn and never gets a
/// reply.
pub struct TranscriptRecorder {
    transcript: SharedTranscript,
}

impl TranscriptRecorder {
    pub fn new(transcript: SharedTranscript) -> Self {
        Self { transcript }
    }
}

impl LifecycleObserver<AssistantTurnRequest, AssistantReply> for TranscriptRecorder {
    fn dispatched(&self, _token: SubmissionToken, input: &AssistantTurnRequest) {
        append_turn(&self.transcript, MessageRole::User, &input.user_text);
    }

    fn settled(&self, _token: SubmissionToken, state: &RequestState<AssistantReply>) {
        match state {
            RequestState::Succeeded(reply) => {
                append_turn(&self.transcript, MessageRole::Assistant, &reply.reply_text)
            }
            RequestState::Failed(message) => {
                append_turn(&self.transcript, MessageRole::Assistant, message)
            }
            _ => {}
        }
    }
}

pub struct AssistantTurnOperation {
    service: Arc<dyn JobInsightsService>,
}

impl AssistantTurnOperation {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Operation for AssistantTurnOperation {
    type Input = AssistantTurnRequest;
    type Output = AssistantReply;

    fn name(&self) -> &'static str {
        "assistant_turn"
    }

    fn validate(&self, input: &AssistantTurnRequest) -> Result<(), RequestError> {
        require(&input.user_text, MESSAGE_REQUIRED)
    }

    async fn execute(&self, input: AssistantTurnRequest) -> Result<AssistantReply, RequestError> {
        self.service.assistant_turn(input).await
    }
}

/// Free-form conversation with the career assistant.
pub struct ChatScreen {
    message: String,
    transcript: SharedTranscript,
    controller: RequestLifecycleController<AssistantTurnOperation>,
}

impl ChatScreen {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self::with_transcript(service, SharedTranscript::default())
    }

    pub fn with_transcript(service: Arc<dyn JobInsightsService>, transcript: SharedTranscript) -> Self {
        let recorder = Arc::new(TranscriptRecorder::new(Arc::clone(&transcript)));
        Self {
            message: String::new(),
            transcript,
            controller: RequestLifecycleController::with_observer(
                AssistantTurnOperation::new(service),
                recorder,
            ),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.is_in_flight() && !self.message.trim().is_empty()
    }

    /// Sends the current message and clears the input.
    pub fn submit(&mut self) -> SubmissionToken {
        let user_text = std::mem::take(&mut self.message);
        self.controller.submit(AssistantTurnRequest { user_text })
    }

    pub fn state(&self) -> RequestState<AssistantReply> {
        self.controller.current_state()
    }

    pub async fn wait_settled(&self) -> RequestState<AssistantReply> {
        self.controller.wait_settled().await
    }

    pub fn transcript(&self) -> Vec<ConversationTurn> {
        snapshot(&self.transcript)
    }

    pub fn shared_transcript(&self) -> SharedTranscript {
        Arc::clone(&self.transcript)
    }

    pub fn controller(&self) -> &RequestLifecycleController<AssistantTurnOperation> {
        &self.controller
    }
}
