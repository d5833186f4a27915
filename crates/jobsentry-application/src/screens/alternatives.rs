use std::sync::Arc;

use async_trait::async_trait;
use jobsentry_core::insights::{AlternativeSearchRequest, JobInsightsService, JobListing};
use jobsentry_core::request::{
    Operation, RequestError, RequestLifecycleController, RequestState, SubmissionToken,
};

use super::require;

pub const ROLE_REQUIRED: &str = "Please enter a job role to search for.";

/// Empty-state text for a successful search with no listings.
pub const NO_RESULTS_MESSAGE: &str = "No job results found.";

pub struct AlternativeSearchOperation {
    service: Arc<dyn JobInsightsService>,
}

impl AlternativeSearchOperation {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Operation for AlternativeSearchOperation {
    type Input = AlternativeSearchRequest;
    type Output = Vec<JobListing>;

    fn name(&self) -> &'static str {
        "alternative_search"
    }

    fn validate(&self, input: &AlternativeSearchRequest) -> Result<(), RequestError> {
        require(&input.role, ROLE_REQUIRED)
    }

    async fn execute(
        &self,
        input: AlternativeSearchRequest,
    ) -> Result<Vec<JobListing>, RequestError> {
        self.service.search_alternatives(input).await
    }
}

/// Genuine listings for a role, optionally narrowed to a location.
pub struct AlternativesScreen {
    role: String,
    location: String,
    controller: RequestLifecycleController<AlternativeSearchOperation>,
}

impl AlternativesScreen {
    pub fn new(service: Arc<dyn JobInsightsService>) -> Self {
        Self {
            role: String::new(),
            location: String::new(),
            controller: RequestLifecycleController::new(AlternativeSearchOperation::new(service)),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.controller.is_in_flight() && !self.role.trim().is_empty()
    }

    pub fn submit(&self) -> SubmissionToken {
        self.controller.submit(AlternativeSearchRequest {
            role: self.role.clone(),
            location: self.location.clone(),
        })
    }

    pub fn state(&self) -> RequestState<Vec<JobListing>> {
        self.controller.current_state()
    }

    pub async fn wait_settled(&self) -> RequestState<Vec<JobListing>> {
        self.controller.wait_settled().await
    }

    pub fn controller(&self) -> &RequestLifecycleController<AlternativeSearchOperation> {
        &self.controller
    }
}
