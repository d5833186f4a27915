//! Application layer for JobSentry.
//!
//! Each screen of the dashboard pairs its editable inputs with one
//! [`RequestLifecycleController`](jobsentry_core::request::RequestLifecycleController)
//! and the output model it produces. [`Dashboard`] wires all of them to one
//! insights service.

pub mod dashboard;
pub mod screens;

pub use dashboard::Dashboard;
pub use screens::{
    AlternativesScreen, ChatScreen, DetectionScreen, FraudReport, ResumeScreen, RoadmapScreen,
    Verdict,
};
