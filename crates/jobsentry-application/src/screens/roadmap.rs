use std::sync::Arc;

use async_trait::async_trait;
use jobsentry_core::insights::{JobInsightsService, RoadmapRequest};
use jobsentry_core::outline::{DocumentOutlineParser, Outline};
use jobsentry_core::request::{
    Operation, RequestError, RequestLifecycleController, RequestState, SubmissionToken,
};
use tracing::debug;

use super::require;

pub const ROADMAP_INPUTS_REQUIRED: &str =
    "Please enter a job title and your available preparation time.";

pub struct RoadmapOperation {
    service: Arc<dyn JobInsightsService>,
    parser: DocumentOutlineParser,
}

impl RoadmapOperation {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self {
            service,
            parser: DocumentOutlineParser::new(),
        }
    }
}

#[async_trait]
impl Operation for RoadmapOperation {
    type Input = RoadmapRequest;
    type Output = Outline;

    fn name(&self) -> &'static str {
        "roadmap_generation"
    }

    fn validate(&self, input: &RoadmapRequest) -> Result<(), RequestError> {
        require(&input.role, ROADMAP_INPUTS_REQUIRED)?;
        require(&input.available_time, ROADMAP_INPUTS_REQUIRED)
    }

    async fn execute(&self, input: RoadmapRequest) -> Result<Outline, RequestError> {
        let generated = self.service.generate_roadmap(input).await?;
        let outline = self.parser.parse(&generated.roadmap_text);
        debug!(sections = outline.len(), "roadmap parsed");
        Ok(outline)
    }
}

/// Study plan for a role within a preparation window.
pub struct RoadmapScreen {
    job_title: String,
    available_time: String,
    controller: RequestLifecycleController<RoadmapOperation>,
}

impl RoadmapScreen {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self {
            job_title: String::new(),
            available_time: String::new(),
            controller: RequestLifecycleController::new(RoadmapOperation::new(service)),
        }
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn available_time(&self) -> &str {
        &self.available_time
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) {
        self.job_title = job_title.into();
    }

    pub fn set_available_time(&mut self, available_time: impl Into<String>) {
        self.available_time = available_time.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.is_in_flight()
            && !self.job_title.trim().is_empty()
            && !self.available_time.trim().is_empty()
    }

    pub fn submit(&self) -> SubmissionToken {
        self.controller.submit(RoadmapRequest {
            role: self.job_title.clone(),
            available_time: self.available_time.clone(),
        })
    }

    pub fn state(&self) -> RequestState<Outline> {
        self.controller.current_state()
    }

    pub async fn wait_settled(&self) -> RequestState<Outline> {
        self.controller.wait_settled().await
    }

    pub fn controller(&self) -> &RequestLifecycleController<RoadmapOperation> {
        &self.controller
    }
}
