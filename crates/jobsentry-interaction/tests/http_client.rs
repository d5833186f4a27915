//! HttpInsightsClient against a local stub backend.

use std::time::Duration;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use jobsentry_core::config::BackendConfig;
use jobsentry_core::insights::{
    AlternativeSearchRequest, AssistantTurnRequest, FraudAnalysisRequest, JobInsightsService,
    ResumeUpload, RoadmapRequest,
};
use jobsentry_interaction::HttpInsightsClient;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn analyze_posting_maps_wire_fields() {
    let router = Router::new().route(
        "/jobs/detect",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["job_description"], "Earn $5000/week from home");
            Json(json!({
                "status": "⚠️ This job posting looks fake",
                "role_name": "Data Entry Clerk",
                "roadmap": "### 1. Basics\n- typing"
            }))
        }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let analysis = client
        .analyze_posting(FraudAnalysisRequest {
            description: "Earn $5000/week from home".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(analysis.status, "⚠️ This job posting looks fake");
    assert_eq!(analysis.suggested_role.as_deref(), Some("Data Entry Clerk"));
    assert_eq!(analysis.roadmap.as_deref(), Some("### 1. Basics\n- typing"));
}

#[tokio::test]
async fn analyze_posting_without_optional_fields() {
    let router = Router::new().route(
        "/jobs/detect",
        post(|| async { Json(json!({"status": "✅ Looks genuine", "role_name": ""})) }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let analysis = client
        .analyze_posting(FraudAnalysisRequest {
            description: "Backend engineer".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(analysis.suggested_role, None);
    assert_eq!(analysis.roadmap, None);
}

#[tokio::test]
async fn search_alternatives_returns_listings_in_order() {
    let router = Router::new().route(
        "/alternatives/search-google",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["role"], "Data Analyst");
            assert_eq!(body["location"], "Pune");
            Json(json!([
                {
                    "title": "Data Analyst",
                    "company": "Acme",
                    "location": "Pune",
                    "posted_date": "2 days ago",
                    "description": "SQL and dashboards",
                    "job_url": "https://jobs.example.com/1"
                },
                {
                    "title": "Junior Analyst",
                    "company": "Globex",
                    "location": "Remote",
                    "description": "",
                    "job_url": "https://jobs.example.com/2"
                }
            ]))
        }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let listings = client
        .search_alternatives(AlternativeSearchRequest {
            role: "Data Analyst".to_string(),
            location: "Pune".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].url, "https://jobs.example.com/1");
    assert_eq!(listings[0].posted_date.as_deref(), Some("2 days ago"));
    assert_eq!(listings[1].company, "Globex");
    assert_eq!(listings[1].posted_date, None);
    assert_eq!(listings[1].description, "");
}

#[tokio::test]
async fn listing_without_description_is_malformed() {
    let router = Router::new().route(
        "/alternatives/search-google",
        post(|| async {
            Json(json!([{
                "title": "Junior Analyst",
                "company": "Globex",
                "location": "Remote",
                "job_url": "https://jobs.example.com/2"
            }]))
        }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let err = client
        .search_alternatives(AlternativeSearchRequest {
            role: "Data Analyst".to_string(),
            location: "Pune".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "malformed_response");
}

#[tokio::test]
async fn remote_error_body_becomes_failure_message() {
    let router = Router::new().route(
        "/insight/generate-roadmap",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Job title is required"})),
            )
        }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let err = client
        .generate_roadmap(RoadmapRequest {
            role: " ".to_string(),
            available_time: "1 month".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "remote");
    assert_eq!(err.user_message(), "Job title is required");
}

#[tokio::test]
async fn remote_error_without_message_uses_fallback() {
    let router = Router::new().route(
        "/chatbot/message",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let err = client
        .assistant_turn(AssistantTurnRequest {
            user_text: "hi".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Failed to get a reply from the assistant.");
}

#[tokio::test]
async fn unexpected_success_shape_is_malformed() {
    let router = Router::new().route(
        "/chatbot/message",
        post(|| async { Json(json!({"answer": "wrong field"})) }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let err = client
        .assistant_turn(AssistantTurnRequest {
            user_text: "hi".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "malformed_response");
    assert_eq!(
        err.user_message(),
        "Received a malformed response from the server."
    );
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let client = HttpInsightsClient::new(&closed_port_url().await).unwrap();

    let err = client
        .analyze_posting(FraudAnalysisRequest {
            description: "anything".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
    assert_eq!(
        err.user_message(),
        "Failed to connect to the server. Please try again later."
    );
}

#[tokio::test]
async fn slow_backend_times_out() {
    let router = Router::new().route(
        "/chatbot/message",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"reply": "too late"}))
        }),
    );
    let config = BackendConfig {
        base_url: spawn_stub(router).await,
        timeout_secs: 1,
    };
    let client = HttpInsightsClient::from_config(&config).unwrap();

    let err = client
        .assistant_turn(AssistantTurnRequest {
            user_text: "hi".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
    assert_eq!(err.user_message(), "Error connecting to the backend.");
}

#[tokio::test]
async fn resume_is_uploaded_as_multipart_pdf() {
    let router = Router::new().route(
        "/chatbot/upload-resume",
        post(|mut multipart: Multipart| async move {
            let field = multipart.next_field().await.unwrap().unwrap();
            assert_eq!(field.name(), Some("resume"));
            assert_eq!(field.file_name(), Some("cv.pdf"));
            assert_eq!(field.content_type(), Some("application/pdf"));
            let bytes = field.bytes().await.unwrap();
            assert_eq!(&bytes[..], b"%PDF-1.4");

            Json(json!({
                "suggested_roles": "```json\n{\"suggested_roles\": [\"Data Analyst\", \"BI Developer\"]}\n```"
            }))
        }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let recommendations = client
        .recommend_roles(ResumeUpload::new("cv.pdf", b"%PDF-1.4".to_vec()))
        .await
        .unwrap();

    assert_eq!(recommendations.roles, vec!["Data Analyst", "BI Developer"]);
}

#[tokio::test]
async fn undecodable_roles_are_empty_not_an_error() {
    let router = Router::new().route(
        "/chatbot/upload-resume",
        post(|| async { Json(json!({"suggested_roles": "I could not read this resume."})) }),
    );
    let client = HttpInsightsClient::new(&spawn_stub(router).await).unwrap();

    let recommendations = client
        .recommend_roles(ResumeUpload::new("cv.pdf", b"%PDF".to_vec()))
        .await
        .unwrap();

    assert!(recommendations.is_empty());
}
