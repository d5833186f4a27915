//! HttpInsightsClient - JSON over HTTP implementation of the insights service.
//!
//! Every operation is a POST relative to the configured base URL. Non-2xx
//! answers are read as `{"error": ...}` (or `errorMessage`) bodies; 2xx
//! answers that do not match the expected shape are reported as malformed.

use async_trait::async_trait;
use jobsentry_core::config::BackendConfig;
use jobsentry_core::error::{JobSentryError, Result};
use jobsentry_core::insights::{
    AlternativeSearchRequest, AssistantReply, AssistantTurnRequest, Endpoint, FraudAnalysis,
    FraudAnalysisRequest, GeneratedRoadmap, JobInsightsService, JobListing, ResumeUpload,
    RoadmapRequest, RoleRecommendations,
};
use jobsentry_core::request::RequestError;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const RESUME_FIELD: &str = "resume";
const PDF_MIME: &str = "application/pdf";

/// Client for the insights backend.
#[derive(Clone, Debug)]
pub struct HttpInsightsClient {
    client: Client,
    base_url: String,
}

impl HttpInsightsClient {
    /// Creates a client with reqwest's default settings.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Creates a client whose requests give up after the configured timeout.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| JobSentryError::internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> std::result::Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.post(self.endpoint_url(endpoint)).json(body);
        self.send(endpoint, request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> std::result::Result<R, RequestError> {
        debug!(endpoint = %endpoint, "sending request");

        let response = request
            .send()
            .await
            .map_err(|err| RequestError::transport(endpoint, describe_transport_error(&err)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RequestError::transport(endpoint, describe_transport_error(&err)))?;

        if !status.is_success() {
            return Err(map_http_error(endpoint, status, &body));
        }

        serde_json::from_slice(&body).map_err(|err| {
            warn!(endpoint = %endpoint, error = %err, "unexpected response shape");
            RequestError::malformed(endpoint, err.to_string())
        })
    }
}

#[async_trait]
impl JobInsightsService for HttpInsightsClient {
    async fn analyze_posting(
        &self,
        request: FraudAnalysisRequest,
    ) -> std::result::Result<FraudAnalysis, RequestError> {
        let body = DetectBody {
            job_description: &request.description,
        };
        let response: DetectResponse = self.post_json(Endpoint::FraudAnalysis, &body).await?;

        Ok(FraudAnalysis {
            status: response.status,
            suggested_role: response.role_name.filter(|role| !role.trim().is_empty()),
            roadmap: response.roadmap.filter(|roadmap| !roadmap.trim().is_empty()),
        })
    }

    async fn search_alternatives(
        &self,
        request: AlternativeSearchRequest,
    ) -> std::result::Result<Vec<JobListing>, RequestError> {
        let listings: Vec<ListingResponse> =
            self.post_json(Endpoint::AlternativeSearch, &request).await?;

        Ok(listings.into_iter().map(JobListing::from).collect())
    }

    async fn assistant_turn(
        &self,
        request: AssistantTurnRequest,
    ) -> std::result::Result<AssistantReply, RequestError> {
        let body = MessageBody {
            message: &request.user_text,
        };
        let response: ReplyResponse = self.post_json(Endpoint::AssistantTurn, &body).await?;

        Ok(AssistantReply {
            reply_text: response.reply,
        })
    }

    async fn generate_roadmap(
        &self,
        request: RoadmapRequest,
    ) -> std::result::Result<GeneratedRoadmap, RequestError> {
        let body = RoadmapBody {
            job_title: &request.role,
            available_time: &request.available_time,
        };
        let response: RoadmapResponse =
            self.post_json(Endpoint::RoadmapGeneration, &body).await?;

        Ok(GeneratedRoadmap {
            roadmap_text: response.roadmap,
        })
    }

    async fn recommend_roles(
        &self,
        upload: ResumeUpload,
    ) -> std::result::Result<RoleRecommendations, RequestError> {
        let endpoint = Endpoint::ResumeRecommendation;
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(PDF_MIME)
            .map_err(|err| RequestError::transport(endpoint, err.to_string()))?;
        let form = Form::new().part(RESUME_FIELD, part);

        let request = self.client.post(self.endpoint_url(endpoint)).multipart(form);
        let response: UploadResponse = self.send(endpoint, request).await?;

        Ok(RoleRecommendations::from_suggested_roles(
            &response.suggested_roles,
        ))
    }
}

/// Validates the configured base URL and strips any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|err| JobSentryError::config(format!("Invalid backend URL '{trimmed}': {err}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(JobSentryError::config(format!(
            "Backend URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
        return Err(JobSentryError::config(format!(
            "Backend URL '{trimmed}' has no host"
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

fn map_http_error(endpoint: Endpoint, status: StatusCode, body: &[u8]) -> RequestError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .unwrap_or_default();

    warn!(
        endpoint = %endpoint,
        status = status.as_u16(),
        message = %message,
        "backend reported failure"
    );
    RequestError::remote(endpoint, message)
}

#[derive(Serialize)]
struct DetectBody<'a> {
    job_description: &'a str,
}

#[derive(Deserialize)]
struct DetectResponse {
    status: String,
    #[serde(default)]
    role_name: Option<String>,
    #[serde(default)]
    roadmap: Option<String>,
}

#[derive(Deserialize)]
struct ListingResponse {
    title: String,
    company: String,
    location: String,
    #[serde(default)]
    posted_date: Option<String>,
    description: String,
    job_url: String,
}

impl From<ListingResponse> for JobListing {
    fn from(listing: ListingResponse) -> Self {
        Self {
            title: listing.title,
            company: listing.company,
            location: listing.location,
            posted_date: listing.posted_date,
            description: listing.description,
            url: listing.job_url,
        }
    }
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ReplyResponse {
    reply: String,
}

#[derive(Serialize)]
struct RoadmapBody<'a> {
    job_title: &'a str,
    available_time: &'a str,
}

#[derive(Deserialize)]
struct RoadmapResponse {
    roadmap: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    suggested_roles: Value,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(alias = "errorMessage")]
    error: Option<String>,
}
