//! In-memory contact-form state: field values, per-field validation errors,
//! and the submission lifecycle. Delivery goes through the injected
//! [`EmailDelivery`] collaborator; the presentation layer observes status
//! through [`ContactFormController::status`] and [`subscribe_events`].
//!
//! [`subscribe_events`]: ContactFormController::subscribe_events

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use emailjs_integration::EmailDelivery;
use shared::{
    domain::{ContactField, ContactFields},
    error::{DeliveryFault, DeliveryReceipt},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

pub mod validation;
pub use validation::{validate, FieldErrors};

/// How long a terminal Success/Error status stays visible before the banner
/// clears back to Idle.
pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(5);

pub const VALIDATION_FAILED_MESSAGE: &str = "Please fix the errors above";
pub const DELIVERY_SUCCESS_MESSAGE: &str =
    "Message sent successfully! I'll get back to you soon.";
pub const DELIVERY_FAILED_MESSAGE: &str =
    "Oops! Something went wrong. Please try again or email me directly.";

/// Submission lifecycle. Idle is both the initial state and the state every
/// terminal status returns to once the clear delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success { message: String },
    Error { message: String },
}

impl SubmissionStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
            SubmissionStatus::Success { message } | SubmissionStatus::Error { message } => {
                Some(message)
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Success { .. } | SubmissionStatus::Error { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub enum FormEvent {
    StatusChanged(SubmissionStatus),
}

/// Fallback collaborator for controllers constructed without a real delivery
/// backend.
pub struct MissingEmailDelivery;

#[async_trait]
impl EmailDelivery for MissingEmailDelivery {
    async fn deliver(&self, _fields: &ContactFields) -> Result<DeliveryReceipt, DeliveryFault> {
        Err(DeliveryFault::Transport(
            "email delivery backend is unavailable".into(),
        ))
    }
}

struct FormState {
    fields: ContactFields,
    errors: FieldErrors,
    status: SubmissionStatus,
    // Advances on every status transition; a scheduled clear only fires for
    // the generation it was tagged with.
    status_generation: u64,
}

fn set_status(inner: &mut FormState, status: SubmissionStatus) -> u64 {
    inner.status = status;
    inner.status_generation += 1;
    inner.status_generation
}

pub struct ContactFormController {
    delivery: Arc<dyn EmailDelivery>,
    inner: Mutex<FormState>,
    events: broadcast::Sender<FormEvent>,
}

impl ContactFormController {
    pub fn new(delivery: Arc<dyn EmailDelivery>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            delivery,
            inner: Mutex::new(FormState {
                fields: ContactFields::default(),
                errors: FieldErrors::default(),
                status: SubmissionStatus::Idle,
                status_generation: 0,
            }),
            events,
        })
    }

    pub fn with_missing_delivery() -> Arc<Self> {
        Self::new(Arc::new(MissingEmailDelivery))
    }

    pub async fn fields(&self) -> ContactFields {
        self.inner.lock().await.fields.clone()
    }

    pub async fn errors(&self) -> FieldErrors {
        self.inner.lock().await.errors.clone()
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.inner.lock().await.status.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Stores the new value and clears any stale error on that field. No
    /// validation runs until the next submit; status is untouched.
    pub async fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.fields.set(field, value);
        inner.errors.clear(field);
    }

    /// Validates, and on a clean pass forwards the submission to the delivery
    /// collaborator. Exactly one terminal status comes out of every accepted
    /// call; a submit while another is in flight is rejected untouched.
    pub async fn submit(self: &Arc<Self>) -> SubmissionStatus {
        let fields = {
            let mut inner = self.inner.lock().await;
            if inner.status == SubmissionStatus::Submitting {
                warn!("contact: submit ignored while a submission is in flight");
                return inner.status.clone();
            }

            let errors = validation::validate(&inner.fields);
            let is_valid = errors.is_valid();
            inner.errors = errors;
            if !is_valid {
                let status = SubmissionStatus::Error {
                    message: VALIDATION_FAILED_MESSAGE.to_string(),
                };
                let generation = set_status(&mut inner, status.clone());
                drop(inner);
                let _ = self.events.send(FormEvent::StatusChanged(status.clone()));
                self.schedule_status_clear(generation);
                return status;
            }

            set_status(&mut inner, SubmissionStatus::Submitting);
            inner.fields.clone()
        };
        let _ = self
            .events
            .send(FormEvent::StatusChanged(SubmissionStatus::Submitting));

        let outcome = self.delivery.deliver(&fields).await;

        let (status, generation) = {
            let mut inner = self.inner.lock().await;
            let status = match outcome {
                Ok(receipt) => {
                    info!(status = receipt.status, "contact: submission delivered");
                    inner.fields = ContactFields::default();
                    inner.errors = FieldErrors::default();
                    SubmissionStatus::Success {
                        message: DELIVERY_SUCCESS_MESSAGE.to_string(),
                    }
                }
                Err(fault) => {
                    warn!("contact: delivery failed: {fault}");
                    // Input stays put so the user can retry without retyping.
                    SubmissionStatus::Error {
                        message: DELIVERY_FAILED_MESSAGE.to_string(),
                    }
                }
            };
            let generation = set_status(&mut inner, status.clone());
            (status, generation)
        };
        let _ = self.events.send(FormEvent::StatusChanged(status.clone()));
        self.schedule_status_clear(generation);
        status
    }

    fn schedule_status_clear(self: &Arc<Self>, generation: u64) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(STATUS_CLEAR_DELAY).await;
            controller.clear_status_if_current(generation).await;
        });
    }

    async fn clear_status_if_current(&self, generation: u64) {
        {
            let mut inner = self.inner.lock().await;
            if inner.status_generation != generation {
                return;
            }
            set_status(&mut inner, SubmissionStatus::Idle);
        }
        let _ = self
            .events
            .send(FormEvent::StatusChanged(SubmissionStatus::Idle));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
