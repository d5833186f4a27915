use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::error::RequestError;
use super::state::{RequestState, SubmissionToken};

/// Failure text when an operation's task dies without producing a result.
pub const OPERATION_ABORTED_MESSAGE: &str = "Something went wrong. Please try again.";

/// One kind of remote call driven by a [`RequestLifecycleController`].
#[async_trait]
pub trait Operation: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Clone + Send + Sync + 'static;

    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    /// Local precondition checks, run before any remote call.
    ///
    /// Failures should be [`RequestError::Validation`].
    fn validate(&self, input: &Self::Input) -> Result<(), RequestError>;

    /// Performs the remote call.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, RequestError>;
}

/// Hooks into the lifecycle of the current submission.
///
/// Both hooks run synchronously while the controller's state is locked, so
/// they must not call back into the controller.
pub trait LifecycleObserver<I, T>: Send + Sync {
    /// The submission passed validation and its remote call is being issued.
    fn dispatched(&self, _token: SubmissionToken, _input: &I) {}

    /// The remote call of the current submission finished. Stale results
    /// never reach this hook.
    fn settled(&self, _token: SubmissionToken, _state: &RequestState<T>) {}
}

struct Shared<O: Operation> {
    /// Token of the newest submission; 0 before the first one.
    current: AtomicU64,
    stale_responses: AtomicU64,
    state: watch::Sender<RequestState<O::Output>>,
    observer: Option<Arc<dyn LifecycleObserver<O::Input, O::Output>>>,
}

impl<O: Operation> Shared<O> {
    fn is_current(&self, token: SubmissionToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }

    /// Moves to `next` if `token` is still the newest submission.
    fn transition(&self, token: SubmissionToken, next: RequestState<O::Output>) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(token) {
                return false;
            }
            *state = next;
            true
        })
    }

    fn settle(&self, operation: &'static str, token: SubmissionToken, next: RequestState<O::Output>) {
        let applied = self.state.send_if_modified(|state| {
            if !self.is_current(token) {
                return false;
            }
            if let Some(observer) = &self.observer {
                observer.settled(token, &next);
            }
            *state = next;
            true
        });

        if applied {
            debug!(operation, token = token.get(), "submission settled");
        } else {
            self.stale_responses.fetch_add(1, Ordering::SeqCst);
            debug!(
                operation,
                token = token.get(),
                current = self.current.load(Ordering::SeqCst),
                "discarding stale response"
            );
        }
    }
}

/// State machine wrapping one outstanding asynchronous operation.
///
/// `submit` validates synchronously, spawns the remote call and returns
/// immediately. A new submission supersedes the outstanding one: the earlier
/// call is not aborted, but its result is dropped when it arrives.
pub struct RequestLifecycleController<O: Operation> {
    operation: Arc<O>,
    shared: Arc<Shared<O>>,
}

impl<O: Operation> RequestLifecycleController<O> {
    pub fn new(operation: O) -> Self {
        Self::build(operation, None)
    }

    pub fn with_observer(
        operation: O,
        observer: Arc<dyn LifecycleObserver<O::Input, O::Output>>,
    ) -> Self {
        Self::build(operation, Some(observer))
    }

    fn build(
        operation: O,
        observer: Option<Arc<dyn LifecycleObserver<O::Input, O::Output>>>,
    ) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            operation: Arc::new(operation),
            shared: Arc::new(Shared {
                current: AtomicU64::new(0),
                stale_responses: AtomicU64::new(0),
                state,
                observer,
            }),
        }
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    pub fn current_state(&self) -> RequestState<O::Output> {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every visible transition.
    pub fn subscribe(&self) -> watch::Receiver<RequestState<O::Output>> {
        self.shared.state.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.shared.state.borrow().is_in_flight()
    }

    /// Token of the newest submission, if any.
    pub fn current_token(&self) -> Option<SubmissionToken> {
        match self.shared.current.load(Ordering::SeqCst) {
            0 => None,
            token => Some(SubmissionToken(token)),
        }
    }

    /// Number of responses discarded because a newer submission existed.
    pub fn stale_responses(&self) -> u64 {
        self.shared.stale_responses.load(Ordering::SeqCst)
    }

    /// Starts a new submission, superseding any outstanding one.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime when the input is valid, as
    /// the remote call is spawned onto the current runtime.
    pub fn submit(&self, input: O::Input) -> SubmissionToken {
        let name = self.operation.name();
        let shared = &self.shared;

        let mut token = SubmissionToken(0);
        shared.state.send_modify(|state| {
            token = SubmissionToken(shared.current.fetch_add(1, Ordering::SeqCst) + 1);
            *state = RequestState::Validating;
        });
        debug!(operation = name, token = token.get(), "submission validating");

        if let Err(err) = self.operation.validate(&input) {
            info!(operation = name, token = token.get(), reason = %err, "submission rejected");
            shared.transition(token, RequestState::Failed(err.user_message()));
            return token;
        }

        if !shared.transition(token, RequestState::InFlight) {
            // Superseded while validating.
            return token;
        }
        if let Some(observer) = &shared.observer {
            observer.dispatched(token, &input);
        }
        debug!(operation = name, token = token.get(), "submission in flight");

        let operation = Arc::clone(&self.operation);
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let call = tokio::spawn(async move { operation.execute(input).await });
            let next = match call.await {
                Ok(Ok(payload)) => RequestState::Succeeded(payload),
                Ok(Err(err)) => {
                    warn!(
                        operation = name,
                        token = token.get(),
                        kind = err.kind(),
                        error = %err,
                        "remote operation failed"
                    );
                    RequestState::Failed(err.user_message())
                }
                Err(err) => {
                    error!(
                        operation = name,
                        token = token.get(),
                        error = %err,
                        "remote operation aborted"
                    );
                    RequestState::Failed(OPERATION_ABORTED_MESSAGE.to_string())
                }
            };
            shared.settle(name, token, next);
        });

        token
    }

    /// Waits until the newest submission has a result.
    ///
    /// Returns immediately when nothing was ever submitted.
    pub async fn wait_settled(&self) -> RequestState<O::Output> {
        let mut receiver = self.subscribe();
        match receiver
            .wait_for(|state| state.is_settled() || state.is_idle())
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.current_state(),
        }
    }
}

impl<O: Operation> fmt::Debug for RequestLifecycleController<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLifecycleController")
            .field("operation", &self.operation.name())
            .field("state", &self.shared.state.borrow().label())
            .field("current_token", &self.current_token())
            .field("stale_responses", &self.stale_responses())
            .finish()
    }
}
