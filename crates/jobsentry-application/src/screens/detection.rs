use std::sync::Arc;

use async_trait::async_trait;
use jobsentry_core::insights::{FraudAnalysisRequest, JobInsightsService};
use jobsentry_core::outline::{DocumentOutlineParser, Outline};
use jobsentry_core::request::{
    Operation, RequestError, RequestLifecycleController, RequestState, SubmissionToken,
};
use serde::Serialize;

use super::require;

pub const DESCRIPTION_REQUIRED: &str = "Please enter a job description to analyze.";

const WARNING_MARKER: char = '\u{26A0}';

/// Coarse reading of the service's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Genuine,
    Suspicious,
}

impl Verdict {
    /// Suspicious when the status carries the warning marker or says "fake".
    pub fn from_status(status: &str) -> Self {
        if status.contains(WARNING_MARKER) || status.to_lowercase().contains("fake") {
            Verdict::Suspicious
        } else {
            Verdict::Genuine
        }
    }
}

/// Result of analyzing one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FraudReport {
    pub status: String,
    pub verdict: Verdict,
    pub suggested_role: Option<String>,
    pub roadmap: Option<Outline>,
}

pub struct FraudAnalysisOperation {
    service: Arc<dyn JobInsightsService>,
    parser: DocumentOutlineParser,
}

impl FraudAnalysisOperation {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self {
            service,
            parser: DocumentOutlineParser::new(),
        }
    }
}

#[async_trait]
impl Operation for FraudAnalysisOperation {
    type Input = FraudAnalysisRequest;
    type Output = FraudReport;

    fn name(&self) -> &'static str {
        "fraud_analysis"
    }

    fn validate(&self, input: &FraudAnalysisRequest) -> Result<(), RequestError> {
        require(&input.description, DESCRIPTION_REQUIRED)
    }

    async fn execute(&self, input: FraudAnalysisRequest) -> Result<FraudReport, RequestError> {
        let analysis = self.service.analyze_posting(input).await?;

        Ok(FraudReport {
            verdict: Verdict::from_status(&analysis.status),
            roadmap: analysis.roadmap.as_deref().map(|text| self.parser.parse(text)),
            suggested_role: analysis.suggested_role,
            status: analysis.status,
        })
    }
}

/// Paste a posting, get a verdict and a roadmap for the real role behind it.
pub struct DetectionScreen {
    description: String,
    controller: RequestLifecycleController<FraudAnalysisOperation>,
}

impl DetectionScreen {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self {
            description: String::new(),
            controller: RequestLifecycleController::new(FraudAnalysisOperation::new(service)),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.is_in_flight() && !self.description.trim().is_empty()
    }

    pub fn submit(&self) -> SubmissionToken {
        self.controller.submit(FraudAnalysisRequest {
            description: self.description.clone(),
        })
    }

    pub fn state(&self) -> RequestState<FraudReport> {
        self.controller.current_state()
    }

    pub async fn wait_settled(&self) -> RequestState<FraudReport> {
        self.controller.wait_settled().await
    }

    pub fn controller(&self) -> &RequestLifecycleController<FraudAnalysisOperation> {
        &self.controller
    }
}
