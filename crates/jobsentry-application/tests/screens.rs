//! Screens driven against a hand-written insights service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use jobsentry_application::screens::{
    DESCRIPTION_REQUIRED, MESSAGE_REQUIRED, NO_RECOMMENDATIONS_MESSAGE, RESUME_REQUIRED,
    ROADMAP_INPUTS_REQUIRED, ROLE_REQUIRED,
};
use jobsentry_application::{
    AlternativesScreen, ChatScreen, Dashboard, DetectionScreen, ResumeScreen, RoadmapScreen,
    Verdict,
};
use jobsentry_core::insights::{
    AlternativeSearchRequest, AssistantReply, AssistantTurnRequest, Endpoint, FraudAnalysis,
    FraudAnalysisRequest, GeneratedRoadmap, JobInsightsService, JobListing, ResumeUpload,
    RoadmapRequest, RoleRecommendations,
};
use jobsentry_core::outline::Line;
use jobsentry_core::request::{RequestError, RequestState};
use jobsentry_core::transcript::MessageRole;
use tokio::sync::oneshot;

type Reply<T> = Result<T, RequestError>;

#[derive(Default)]
struct MockInsights {
    calls: AtomicUsize,
    analysis: Mutex<Option<Reply<FraudAnalysis>>>,
    listings: Mutex<Option<Reply<Vec<JobListing>>>>,
    replies: Mutex<HashMap<String, oneshot::Receiver<Reply<AssistantReply>>>>,
    roadmap: Mutex<Option<Reply<GeneratedRoadmap>>>,
    roles: Mutex<Option<Reply<RoleRecommendations>>>,
    uploads: Mutex<Vec<String>>,
}

impl MockInsights {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn reply_to(&self, message: &str) -> oneshot::Sender<Reply<AssistantReply>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().insert(message.to_string(), rx);
        tx
    }

    fn take<T>(&self, slot: &Mutex<Option<Reply<T>>>, endpoint: Endpoint) -> Reply<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(RequestError::transport(endpoint, "not scripted")))
    }
}

#[async_trait]
impl JobInsightsService for MockInsights {
    async fn analyze_posting(&self, _request: FraudAnalysisRequest) -> Reply<FraudAnalysis> {
        self.take(&self.analysis, Endpoint::FraudAnalysis)
    }

    async fn search_alternatives(
        &self,
        _request: AlternativeSearchRequest,
    ) -> Reply<Vec<JobListing>> {
        self.take(&self.listings, Endpoint::AlternativeSearch)
    }

    async fn assistant_turn(&self, request: AssistantTurnRequest) -> Reply<AssistantReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let receiver = self.replies.lock().unwrap().remove(&request.user_text);
        match receiver {
            Some(receiver) => receiver.await.unwrap_or_else(|_| {
                Err(RequestError::transport(Endpoint::AssistantTurn, "dropped"))
            }),
            None => Ok(AssistantReply {
                reply_text: format!("echo: {}", request.user_text),
            }),
        }
    }

    async fn generate_roadmap(&self, _request: RoadmapRequest) -> Reply<GeneratedRoadmap> {
        self.take(&self.roadmap, Endpoint::RoadmapGeneration)
    }

    async fn recommend_roles(&self, upload: ResumeUpload) -> Reply<RoleRecommendations> {
        self.uploads.lock().unwrap().push(upload.file_name.clone());
        self.take(&self.roles, Endpoint::ResumeRecommendation)
    }
}

fn service() -> Arc<MockInsights> {
    Arc::new(MockInsights::default())
}

async fn settle_stale<F: Fn() -> u64>(stale: F, expected: u64) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while stale() < expected {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("stale response was never discarded");
}

#[tokio::test]
async fn detection_reports_verdict_and_parsed_roadmap() {
    let mock = service();
    *mock.analysis.lock().unwrap() = Some(Ok(FraudAnalysis {
        status: "⚠️ This job posting looks fake".to_string(),
        suggested_role: Some("Data Entry Operator".to_string()),
        roadmap: Some("Overview\n### 1. Typing\n- practice **daily**".to_string()),
    }));
    let mut screen = DetectionScreen::new(mock.clone());
    screen.set_description("Earn $5000 a week, no experience needed");
    assert!(screen.can_submit());

    screen.submit();
    assert!(!screen.can_submit());

    let report = match screen.wait_settled().await {
        RequestState::Succeeded(report) => report,
        other => panic!("unexpected state: {other:?}"),
    };
    assert_eq!(report.verdict, Verdict::Suspicious);
    assert_eq!(report.suggested_role.as_deref(), Some("Data Entry Operator"));

    let roadmap = report.roadmap.unwrap();
    assert_eq!(
        roadmap.titles().collect::<Vec<_>>(),
        vec!["Introduction", "1. Typing"]
    );
    assert!(roadmap.sections()[1].body[0].is_bullet());
}

#[tokio::test]
async fn detection_rejects_blank_description_locally() {
    let mock = service();
    let mut screen = DetectionScreen::new(mock.clone());
    screen.set_description("   \n ");
    assert!(!screen.can_submit());

    screen.submit();

    assert_eq!(
        screen.state(),
        RequestState::Failed(DESCRIPTION_REQUIRED.to_string())
    );
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn alternatives_empty_list_is_success() {
    let mock = service();
    *mock.listings.lock().unwrap() = Some(Ok(Vec::new()));
    let mut screen = AlternativesScreen::new(mock.clone());

    screen.submit();
    assert_eq!(screen.state(), RequestState::Failed(ROLE_REQUIRED.to_string()));

    screen.set_role("Data Analyst");
    screen.submit();
    assert_eq!(screen.wait_settled().await, RequestState::Succeeded(Vec::new()));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn alternatives_transport_failure_message() {
    let mock = service();
    let mut screen = AlternativesScreen::new(mock.clone());
    screen.set_role("QA Engineer");
    screen.set_location("Remote");

    screen.submit();

    assert_eq!(
        screen.wait_settled().await,
        RequestState::Failed("Error fetching jobs. Please try again.".to_string())
    );
}

#[tokio::test]
async fn chat_records_user_and_assistant_turns() {
    let mock = service();
    let mut screen = ChatScreen::new(mock.clone());

    screen.submit();
    assert_eq!(screen.state(), RequestState::Failed(MESSAGE_REQUIRED.to_string()));
    assert!(screen.transcript().is_empty());

    screen.set_message("How do I prepare for interviews?");
    screen.submit();
    assert_eq!(screen.message(), "");
    screen.wait_settled().await;

    let transcript = screen.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].sender, MessageRole::User);
    assert_eq!(transcript[0].text, "How do I prepare for interviews?");
    assert_eq!(transcript[1].sender, MessageRole::Assistant);
    assert_eq!(transcript[1].text, "echo: How do I prepare for interviews?");
    assert_eq!(transcript[1].sequence, 1);
}

#[tokio::test]
async fn chat_failure_is_appended_as_assistant_turn() {
    let mock = service();
    let reply = mock.reply_to("hello");
    let mut screen = ChatScreen::new(mock.clone());

    screen.set_message("hello");
    screen.submit();
    reply
        .send(Err(RequestError::transport(Endpoint::AssistantTurn, "refused")))
        .unwrap();

    assert_eq!(
        screen.wait_settled().await,
        RequestState::Failed("Error connecting to the backend.".to_string())
    );
    let transcript = screen.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].text, "Error connecting to the backend.");
}

#[tokio::test]
async fn superseded_chat_message_gets_no_reply() {
    let mock = service();
    let reply_a = mock.reply_to("first");
    let reply_b = mock.reply_to("second");
    let mut screen = ChatScreen::new(mock.clone());

    screen.set_message("first");
    screen.submit();
    screen.set_message("second");
    assert!(!screen.can_submit());
    screen.submit();

    reply_b
        .send(Ok(AssistantReply {
            reply_text: "reply to second".to_string(),
        }))
        .unwrap();
    screen.wait_settled().await;
    reply_a
        .send(Ok(AssistantReply {
            reply_text: "reply to first".to_string(),
        }))
        .unwrap();
    settle_stale(|| screen.controller().stale_responses(), 1).await;

    let texts: Vec<_> = screen.transcript().into_iter().map(|turn| turn.text).collect();
    assert_eq!(texts, vec!["first", "second", "reply to second"]);
}

#[tokio::test]
async fn resume_requires_a_pdf_selection() {
    let mock = service();
    let mut screen = ResumeScreen::new(mock.clone());
    assert!(!screen.can_submit());

    screen.submit();
    assert_eq!(screen.state(), RequestState::Failed(RESUME_REQUIRED.to_string()));

    screen.select(ResumeUpload::new("cv.docx", b"PK".to_vec()));
    screen.submit();
    assert_eq!(screen.state(), RequestState::Failed(RESUME_REQUIRED.to_string()));
    assert_eq!(screen.selection().map(|s| s.file_name.as_str()), Some("cv.docx"));

    assert_eq!(mock.calls(), 0);
    assert!(screen.transcript().is_empty());
}

#[tokio::test]
async fn resume_upload_appends_recommendations() {
    let mock = service();
    *mock.roles.lock().unwrap() = Some(Ok(RoleRecommendations {
        roles: vec!["Data Analyst".to_string(), "BI Developer".to_string()],
    }));
    let mut screen = ResumeScreen::new(mock.clone());

    screen.select(ResumeUpload::new("CV.PDF", b"%PDF".to_vec()));
    screen.submit();
    assert!(screen.selection().is_none());
    screen.wait_settled().await;

    let texts: Vec<_> = screen.transcript().into_iter().map(|turn| turn.text).collect();
    assert_eq!(
        texts,
        vec![
            "Uploaded: CV.PDF",
            "Here are your recommended job roles:\n\n- Data Analyst\n- BI Developer",
        ]
    );
    assert_eq!(*mock.uploads.lock().unwrap(), vec!["CV.PDF".to_string()]);
}

#[tokio::test]
async fn resume_without_roles_and_with_failure() {
    let mock = service();
    *mock.roles.lock().unwrap() = Some(Ok(RoleRecommendations::default()));
    let mut screen = ResumeScreen::new(mock.clone());

    screen.select(ResumeUpload::new("cv.pdf", b"%PDF".to_vec()));
    screen.submit();
    screen.wait_settled().await;
    assert_eq!(
        screen.transcript().last().map(|turn| turn.text.clone()),
        Some(NO_RECOMMENDATIONS_MESSAGE.to_string())
    );

    *mock.roles.lock().unwrap() = Some(Err(RequestError::remote(
        Endpoint::ResumeRecommendation,
        "",
    )));
    screen.select(ResumeUpload::new("cv.pdf", b"%PDF".to_vec()));
    screen.submit();
    assert_eq!(
        screen.wait_settled().await,
        RequestState::Failed("Failed to fetch job recommendations.".to_string())
    );

    let transcript = screen.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[2].text, "Uploaded: cv.pdf");
    assert_eq!(transcript[3].sender, MessageRole::Assistant);
    assert_eq!(transcript[3].text, "Failed to fetch job recommendations.");
}

#[tokio::test]
async fn failed_upload_is_answered_in_transcript() {
    let mock = service();
    *mock.roles.lock().unwrap() = Some(Err(RequestError::transport(
        Endpoint::ResumeRecommendation,
        "connection refused",
    )));
    let mut screen = ResumeScreen::new(mock.clone());

    screen.select(ResumeUpload::new("cv.pdf", b"%PDF".to_vec()));
    screen.submit();
    let state = screen.wait_settled().await;

    let RequestState::Failed(message) = state else {
        panic!("expected failure, got {state:?}");
    };
    let last = screen.transcript().last().cloned().unwrap();
    assert_eq!(last.sender, MessageRole::Assistant);
    assert_eq!(last.text, message);
}

#[tokio::test]
async fn roadmap_validates_both_inputs_and_parses_output() {
    let mock = service();
    *mock.roadmap.lock().unwrap() = Some(Ok(GeneratedRoadmap {
        roadmap_text: "### Week 1: Foundations\n- SQL basics\n### Week 2: Practice\nBuild a **dashboard**"
            .to_string(),
    }));
    let mut screen = RoadmapScreen::new(mock.clone());
    screen.set_job_title("Data Analyst");
    assert!(!screen.can_submit());

    screen.submit();
    assert_eq!(
        screen.state(),
        RequestState::Failed(ROADMAP_INPUTS_REQUIRED.to_string())
    );

    screen.set_available_time("2 weeks");
    screen.submit();
    let outline = match screen.wait_settled().await {
        RequestState::Succeeded(outline) => outline,
        other => panic!("unexpected state: {other:?}"),
    };

    assert_eq!(
        outline.titles().collect::<Vec<_>>(),
        vec!["Week 1: Foundations", "Week 2: Practice"]
    );
    match &outline.sections()[1].body[0] {
        Line::Paragraph(runs) => {
            assert_eq!(runs.len(), 2);
            assert!(runs[1].emphasized);
            assert_eq!(runs[1].text, "dashboard");
        }
        other => panic!("unexpected line: {other:?}"),
    }
}

#[tokio::test]
async fn dashboard_shares_transcript_between_chat_and_resume() {
    let mock = service();
    *mock.roles.lock().unwrap() = Some(Ok(RoleRecommendations {
        roles: vec!["SRE".to_string()],
    }));
    let mut dashboard = Dashboard::new(mock.clone());

    dashboard.resume.select(ResumeUpload::new("cv.pdf", b"%PDF".to_vec()));
    dashboard.resume.submit();
    dashboard.resume.wait_settled().await;

    dashboard.chat.set_message("Thanks!");
    dashboard.chat.submit();
    dashboard.chat.wait_settled().await;

    let transcript = dashboard.chat.transcript();
    assert_eq!(transcript.len(), 4);
    assert_eq!(transcript[0].text, "Uploaded: cv.pdf");
    assert_eq!(transcript[3].text, "echo: Thanks!");
    assert_eq!(dashboard.resume.transcript().len(), 4);
}
