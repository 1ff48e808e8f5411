//! Contact form controller for the storefront site.
//!
//! Owns the form values, touched flags, inline validation errors and the
//! submission lifecycle, and posts accepted forms to `{api_base_url}/contact`.

use std::sync::Arc;

use shared::{
    domain::{ContactField, FormValues, TouchedFields},
    error::FieldError,
    protocol::ContactRequest,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod status;
pub mod transport;
pub mod validation;

pub use config::{load_settings, prepare_api_base_url, Settings};
pub use error::SubmitError;
pub use status::{SubmissionStatus, SubmitPhase, Transition};
pub use transport::{ContactTransport, HttpContactTransport, MissingContactTransport};
pub use validation::{field_error_message, validate_field, validate_values, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SubmissionStarted,
    SubmissionFinished { status: SubmissionStatus },
    /// A field edit cleared a success or error banner.
    StatusReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// Another submission is still in flight; nothing was sent.
    Busy,
    Succeeded,
    Failed,
}

/// Point-in-time view of the form for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub touched: TouchedFields,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
    pub submitting: bool,
}

impl FormSnapshot {
    /// Error to show next to `field`; hidden until the field has been touched.
    pub fn visible_error(&self, field: ContactField) -> Option<FieldError> {
        if *self.touched.get(field) {
            self.errors.get(&field).copied()
        } else {
            None
        }
    }

    pub fn visible_errors(&self) -> ValidationErrors {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| self.visible_error(field).map(|err| (field, err)))
            .collect()
    }

    pub fn inputs_enabled(&self) -> bool {
        !self.submitting
    }
}

#[derive(Default)]
struct FormState {
    values: FormValues,
    touched: TouchedFields,
    errors: ValidationErrors,
    phase: SubmitPhase,
}

impl FormState {
    fn revalidate(&mut self, field: ContactField) {
        match validate_field(field, self.values.get(field)) {
            Some(err) => {
                self.errors.insert(field, err);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn validate_all(&mut self) -> bool {
        self.errors = validate_values(&self.values);
        self.errors.is_empty()
    }

    fn clear_form(&mut self) {
        self.values = FormValues::default();
        self.touched = TouchedFields::default();
        self.errors.clear();
    }
}

/// Returns the form to `Idle` if a `submit()` future is dropped while its
/// request is in flight.
struct InFlightGuard {
    inner: Arc<Mutex<FormState>>,
    armed: bool,
}

impl InFlightGuard {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        fn release(state: &mut FormState) {
            if let Some(next) = state.phase.next(Transition::SubmitAbandoned) {
                warn!("contact submission dropped before completion");
                state.phase = next;
            }
        }

        if let Ok(mut state) = self.inner.try_lock() {
            release(&mut state);
        } else if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let inner = self.inner.clone();
            handle.spawn(async move {
                release(&mut *inner.lock().await);
            });
        } else {
            error!("could not release abandoned contact submission");
        }
    }
}

pub struct ContactFormController {
    transport: Arc<dyn ContactTransport>,
    inner: Arc<Mutex<FormState>>,
    events: broadcast::Sender<FormEvent>,
}

impl ContactFormController {
    pub fn new(transport: Arc<dyn ContactTransport>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            transport,
            inner: Arc::new(Mutex::new(FormState::default())),
            events,
        })
    }

    /// Builds the HTTP-backed controller, or one that always fails to submit
    /// when no base URL is configured.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Arc<Self>> {
        let transport: Arc<dyn ContactTransport> = match settings.api_base_url.as_deref() {
            Some(raw) => {
                let base_url = prepare_api_base_url(raw)?;
                info!(%base_url, "contact form using api base url");
                Arc::new(HttpContactTransport::new(&base_url))
            }
            None => {
                warn!("no api base url configured; contact submissions will fail");
                Arc::new(MissingContactTransport)
            }
        };
        Ok(Self::new(transport))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.inner.lock().await;
        FormSnapshot {
            values: state.values.clone(),
            touched: state.touched.clone(),
            errors: state.errors.clone(),
            status: state.phase.status(),
            submitting: state.phase.is_submitting(),
        }
    }

    /// Returns `false` when the edit was ignored because a submission is in
    /// flight.
    pub async fn on_field_change(&self, field: ContactField, value: impl Into<String>) -> bool {
        let mut state = self.inner.lock().await;
        let Some(next) = state.phase.next(Transition::FieldEdited) else {
            debug!(%field, "ignoring edit while submission is in flight");
            return false;
        };

        let banner_cleared = state.phase.status() != SubmissionStatus::Idle;
        state.phase = next;
        state.values.set(field, value.into());
        if *state.touched.get(field) {
            state.revalidate(field);
        }
        drop(state);

        if banner_cleared {
            let _ = self.events.send(FormEvent::StatusReset);
        }
        true
    }

    pub async fn on_field_blur(&self, field: ContactField, value: impl Into<String>) -> bool {
        let mut state = self.inner.lock().await;
        if state.phase.is_submitting() {
            debug!(%field, "ignoring blur while submission is in flight");
            return false;
        }

        state.values.set(field, value.into());
        state.touched.set(field, true);
        state.revalidate(field);
        true
    }

    pub async fn validate_all(&self) -> bool {
        self.inner.lock().await.validate_all()
    }

    /// Validates and posts the form. Never fails; the result is reflected in
    /// the returned outcome and in the submission status.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.inner.lock().await;
            if state.phase.is_submitting() {
                debug!("contact submission already in flight");
                return SubmitOutcome::Busy;
            }

            state.touched = TouchedFields::all(true);
            if !state.validate_all() {
                info!(
                    invalid_fields = state.errors.len(),
                    "contact submission blocked by validation"
                );
                return SubmitOutcome::Invalid;
            }

            let Some(next) = state.phase.next(Transition::SubmitStarted) else {
                return SubmitOutcome::Busy;
            };
            state.phase = next;
            ContactRequest::from(&state.values)
        };
        let mut guard = InFlightGuard {
            inner: self.inner.clone(),
            armed: true,
        };
        let _ = self.events.send(FormEvent::SubmissionStarted);

        let result = match self.transport.post_contact(&request).await {
            Ok(response) if response.is_accepted() => Ok(()),
            Ok(_) => Err(SubmitError::Rejected),
            Err(err) => Err(err),
        };

        let mut state = self.inner.lock().await;
        let (transition, outcome) = match result {
            Ok(()) => {
                info!("contact submission accepted");
                state.clear_form();
                (Transition::SubmitAccepted, SubmitOutcome::Succeeded)
            }
            Err(err) => {
                warn!(error = %err, "contact submission failed");
                (Transition::SubmitFailed, SubmitOutcome::Failed)
            }
        };
        match state.phase.next(transition) {
            Some(next) => state.phase = next,
            None => error!(
                phase = ?state.phase,
                ?transition,
                "submission finished outside of submitting phase"
            ),
        }
        let status = state.phase.status();
        drop(state);
        guard.disarm();

        let _ = self.events.send(FormEvent::SubmissionFinished { status });
        outcome
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
