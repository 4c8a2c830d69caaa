//! The contact form controller.
//!
//! [`ContactForm`] owns the form state, the error map, the submit flags,
//! and the toast, and drives them from rendering-surface events:
//!
//! - [`on_field_change`](ContactForm::on_field_change) stores the new value,
//!   clears that field's error, and re-arms the field's debounced live check.
//! - [`submit`](ContactForm::submit) throttles, validates, builds a
//!   [`SubmissionPayload`], hands it to the [`SubmissionBackend`], and
//!   reports the result as data.
//! - Timers dismiss the toast and lower the `sent` flag.
//!
//! Every operation is infallible from the caller's point of view. Failures
//! end up in the [`ErrorMap`] (per field, or under `general`) and the form
//! stays usable.
//!
//! All timers belong to the controller: dropping it, or calling
//! [`dispose`](ContactForm::dispose), cancels every pending timer and stops
//! new ones from being armed, so nothing touches the state afterwards. A
//! submission already in flight when the form is disposed still reaches the
//! backend, but its result is not written back. Timers are spawned on the ambient tokio
//! runtime, so the controller must be used from within one.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::Instrument;

use showroom_core::logging::form_span;
use showroom_core::settings::ContactSettings;
use showroom_core::ShowroomError;

use crate::backend::{SimulatedBackend, SubmissionBackend};
use crate::errors::{ErrorKey, ErrorMap};
use crate::fields::{FieldName, FormState};
use crate::payload::SubmissionPayload;
use crate::render::{self, ButtonState, FormSnapshot, ProductOption};
use crate::timer::DelayedTask;
use crate::validation::{apply_live_check, live_check, validate_all};

/// What a call to [`ContactForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dropped silently: the previous attempt was less than the throttle interval ago.
    Throttled,
    /// Dropped silently: a submission is in flight or the `sent` flag is still raised.
    Busy,
    /// Dropped: the form was disposed.
    Disposed,
    /// Validation failed; these errors replaced the error map.
    Invalid(ErrorMap),
    /// The backend accepted the payload and the form was reset.
    Sent(SubmissionPayload),
    /// The backend failed; the general error is set and the values are kept.
    Failed(String),
}

impl SubmitOutcome {
    /// Returns `true` if the attempt got past the throttle, busy, and dispose gates.
    pub const fn was_attempted(&self) -> bool {
        !matches!(self, Self::Throttled | Self::Busy | Self::Disposed)
    }
}

#[derive(Debug)]
struct Shared {
    form: FormState,
    errors: ErrorMap,
    submitting: bool,
    sent: bool,
    toast_message: Option<String>,
    last_submit: Option<Instant>,
    disposed: bool,
}

#[derive(Debug, Default)]
struct Timers {
    debounce: HashMap<FieldName, DelayedTask>,
    toast: DelayedTask,
    sent: DelayedTask,
}

impl Timers {
    fn cancel_debounce(&mut self) {
        self.debounce.values_mut().for_each(DelayedTask::cancel);
    }

    fn cancel_all(&mut self) {
        self.cancel_debounce();
        self.toast.cancel();
        self.sent.cancel();
    }

    fn any_pending(&self) -> bool {
        self.toast.is_pending()
            || self.sent.is_pending()
            || self.debounce.values().any(DelayedTask::is_pending)
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lowers the `submitting` flag if a submit future is dropped mid-flight.
struct InFlight<'a> {
    shared: &'a Mutex<Shared>,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.shared).submitting = false;
        }
    }
}

/// Controller for one mounted contact form.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use showroom_core::settings::ContactSettings;
/// use showroom_forms::fields::FieldName;
/// use showroom_forms::form::{ContactForm, SubmitOutcome};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let form = ContactForm::simulated(Arc::new(ContactSettings::default()));
/// form.on_field_change(FieldName::Name, "Asha");
/// form.on_field_change(FieldName::Email, "asha@example.com");
/// form.on_field_change(FieldName::Phone, "98765 43210");
/// form.on_field_change(FieldName::Product, "Product A");
/// form.on_field_change(FieldName::Message, "Call me back, please.");
///
/// match form.submit().await {
///     SubmitOutcome::Sent(payload) => assert_eq!(payload.phone, "+919876543210"),
///     other => panic!("unexpected outcome: {other:?}"),
/// }
/// assert!(form.snapshot().sent);
/// # }
/// ```
pub struct ContactForm {
    contact: Arc<ContactSettings>,
    backend: Arc<dyn SubmissionBackend>,
    shared: Arc<Mutex<Shared>>,
    timers: Mutex<Timers>,
    span: tracing::Span,
}

impl ContactForm {
    /// Creates a controller with default field values.
    pub fn new(contact: Arc<ContactSettings>, backend: Arc<dyn SubmissionBackend>) -> Self {
        let shared = Shared {
            form: FormState::new(&contact),
            errors: ErrorMap::new(),
            submitting: false,
            sent: false,
            toast_message: None,
            last_submit: None,
            disposed: false,
        };
        let span = form_span("contact", &contact.country.label);
        Self {
            contact,
            backend,
            shared: Arc::new(Mutex::new(shared)),
            timers: Mutex::new(Timers::default()),
            span,
        }
    }

    /// Creates a controller backed by a [`SimulatedBackend`] with the configured latency.
    pub fn simulated(contact: Arc<ContactSettings>) -> Self {
        let backend = SimulatedBackend::new(contact.timing.submit_latency());
        Self::new(contact, Arc::new(backend))
    }

    pub fn settings(&self) -> &ContactSettings {
        &self.contact
    }

    fn shared(&self) -> MutexGuard<'_, Shared> {
        lock(&self.shared)
    }

    fn timers(&self) -> MutexGuard<'_, Timers> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Stores `value` in `field` and clears that field's error right away.
    ///
    /// Email and phone edits also re-arm the field's debounced live check.
    pub fn on_field_change(&self, field: FieldName, value: impl Into<String>) {
        let _guard = self.span.enter();
        let value = value.into();
        {
            let mut shared = self.shared();
            shared.form.set(field, value.clone());
            shared.errors.remove(field);
        }
        tracing::trace!(%field, "field changed");

        if field.is_live_checked() {
            self.debounced_validate(field, value, self.contact.timing.debounce());
        }
    }

    /// Like [`on_field_change`](Self::on_field_change), for a field named by the page.
    pub fn on_field_change_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ShowroomError> {
        let field: FieldName = name.parse()?;
        self.on_field_change(field, value);
        Ok(())
    }

    /// Re-checks `field` once `value` has been stable for `delay`.
    ///
    /// Calling again for the same field before the delay elapses restarts
    /// the wait with the newer value. Empty values leave the field's error
    /// untouched. Only email and phone have live checks; other fields are
    /// ignored.
    pub fn debounced_validate(&self, field: FieldName, value: impl Into<String>, delay: Duration) {
        if !field.is_live_checked() {
            return;
        }
        let value = value.into();
        let shared = Arc::clone(&self.shared);
        let contact = Arc::clone(&self.contact);
        let work = async move {
            let check = live_check(field, &value, &contact);
            tracing::debug!(%field, ?check, "debounced check");
            apply_live_check(&mut lock(&shared).errors, field, check);
        };
        self.arm(delay, work, |timers| timers.debounce.entry(field).or_default());
    }

    /// Schedules `work` on the timer picked by `slot`, unless the form is disposed.
    ///
    /// The timers lock is held across the check so `dispose` cannot slip in
    /// between. Lock order is always timers, then shared.
    fn arm<F>(&self, delay: Duration, work: F, slot: impl FnOnce(&mut Timers) -> &mut DelayedTask)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut timers = self.timers();
        if self.shared().disposed {
            tracing::trace!(parent: &self.span, "timer not armed after dispose");
            return;
        }
        slot(&mut timers).schedule(delay, work.instrument(self.span.clone()));
    }

    /// Runs every rule against the current values without touching the error map.
    pub fn validate(&self) -> ErrorMap {
        validate_all(&self.shared().form, &self.contact)
    }

    /// Submits the form.
    ///
    /// Attempts less than the throttle interval after the previous accepted
    /// attempt are dropped without any feedback, as are attempts while the
    /// previous submission is in flight or its `sent` flag is still raised.
    /// The throttle timestamp is taken before the first suspension point,
    /// so two calls racing in the same tick cannot both pass.
    pub async fn submit(&self) -> SubmitOutcome {
        self.submit_inner().instrument(self.span.clone()).await
    }

    async fn submit_inner(&self) -> SubmitOutcome {
        let payload = {
            let mut shared = self.shared();
            if shared.disposed {
                return SubmitOutcome::Disposed;
            }
            let now = Instant::now();
            if let Some(last) = shared.last_submit {
                if now.duration_since(last) < self.contact.timing.throttle() {
                    tracing::debug!("submit throttled");
                    return SubmitOutcome::Throttled;
                }
            }
            if shared.submitting || shared.sent {
                tracing::debug!("submit ignored while busy");
                return SubmitOutcome::Busy;
            }
            shared.last_submit = Some(now);

            match SubmissionPayload::build(&shared.form, &self.contact, Utc::now()) {
                Err(errors) => {
                    tracing::debug!(count = errors.len(), "submit rejected by validation");
                    shared.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
                Ok(payload) => {
                    shared.submitting = true;
                    shared.errors.clear();
                    payload
                }
            }
        };

        let mut in_flight = InFlight {
            shared: &self.shared,
            armed: true,
        };
        let result = self.backend.submit(&payload).await;

        let outcome = {
            let mut shared = self.shared();
            in_flight.armed = false;
            if shared.disposed {
                tracing::debug!("form disposed during submission, result dropped");
                return match result {
                    Ok(()) => SubmitOutcome::Sent(payload),
                    Err(err) => SubmitOutcome::Failed(err.to_string()),
                };
            }
            shared.submitting = false;
            match result {
                Ok(()) => {
                    tracing::info!(product = %payload.product, "contact request sent");
                    shared.sent = true;
                    shared.form = FormState::new(&self.contact);
                    SubmitOutcome::Sent(payload)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "contact request failed");
                    shared
                        .errors
                        .insert(ErrorKey::General, self.contact.messages.failure.clone());
                    SubmitOutcome::Failed(err.to_string())
                }
            }
        };

        if matches!(outcome, SubmitOutcome::Sent(_)) {
            self.timers().cancel_debounce();
            self.show_toast(self.contact.messages.success.clone());
        }
        self.schedule_sent_reset();
        outcome
    }

    fn schedule_sent_reset(&self) {
        let shared = Arc::clone(&self.shared);
        let work = async move {
            lock(&shared).sent = false;
        };
        self.arm(self.contact.timing.sent_reset(), work, |timers| &mut timers.sent);
    }

    /// Shows `message` as a toast, restarting the auto-dismiss timer.
    ///
    /// Does nothing once the form is disposed.
    pub fn show_toast(&self, message: impl Into<String>) {
        let shared = Arc::clone(&self.shared);
        let work = async move {
            lock(&shared).toast_message = None;
        };
        let mut timers = self.timers();
        {
            let mut shared = self.shared();
            if shared.disposed {
                return;
            }
            shared.toast_message = Some(message.into());
        }
        timers
            .toast
            .schedule(self.contact.timing.toast(), work.instrument(self.span.clone()));
    }

    /// Closes the toast now and cancels its dismiss timer.
    pub fn dismiss_toast(&self) {
        self.timers().toast.cancel();
        self.shared().toast_message = None;
    }

    /// Cancels every pending timer and refuses to arm new ones.
    ///
    /// The form stays readable afterwards. Field edits are still stored, but
    /// submits return [`SubmitOutcome::Disposed`].
    pub fn dispose(&self) {
        let mut timers = self.timers();
        self.shared().disposed = true;
        timers.cancel_all();
        drop(timers);
        tracing::debug!(parent: &self.span, "form disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared().disposed
    }

    /// Returns `true` if any debounce, toast, or sent timer is still pending.
    pub fn has_pending_timers(&self) -> bool {
        self.timers().any_pending()
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Copies everything the page draws.
    pub fn snapshot(&self) -> FormSnapshot {
        let shared = self.shared();
        FormSnapshot {
            state: shared.form.clone(),
            errors: shared.errors.clone(),
            submitting: shared.submitting,
            sent: shared.sent,
            toast_message: shared.toast_message.clone(),
        }
    }

    pub fn state(&self) -> FormState {
        self.shared().form.clone()
    }

    pub fn errors(&self) -> ErrorMap {
        self.shared().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.shared().submitting
    }

    pub fn is_sent(&self) -> bool {
        self.shared().sent
    }

    pub fn toast_message(&self) -> Option<String> {
        self.shared().toast_message.clone()
    }

    pub fn button_state(&self) -> ButtonState {
        let shared = self.shared();
        ButtonState::from_flags(shared.submitting, shared.sent)
    }

    /// The "N/1000 characters" counter for the current message.
    pub fn message_counter(&self) -> String {
        render::message_counter(&self.shared().form.message, &self.contact)
    }

    pub fn product_options(&self) -> Vec<ProductOption> {
        render::product_options(&self.contact)
    }
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("shared", &*self.shared())
            .finish_non_exhaustive()
    }
}
