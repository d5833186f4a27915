//! Lifecycle of a user-triggered remote operation.
//!
//! Every screen repeats the same pattern: validate the form, call the
//! service, show a spinner, then show the result or an error. This module
//! implements it once as [`RequestLifecycleController`], parameterized by an
//! [`Operation`].
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Failed(message)
//!                      │
//!                    valid
//!                      ▼
//!                  InFlight ──ok──▶ Succeeded(payload)
//!                      └────err───▶ Failed(message)
//!
//! Succeeded / Failed ──submit──▶ Validating
//! ```

mod controller;
mod error;
mod state;

pub use controller::{
    LifecycleObserver, OPERATION_ABORTED_MESSAGE, Operation, RequestLifecycleController,
};
pub use error::RequestError;
pub use state::{RequestState, SubmissionToken};
