//! # showroom-forms
//!
//! The contact form of the showroom homepage as a headless controller:
//! field state, validation rules with debounced live feedback, throttled
//! submission to a pluggable backend, and an auto-dismissing toast.
//!
//! ## Modules
//!
//! - [`fields`] - Field identifiers, rendering hints, and [`FormState`](fields::FormState)
//! - [`errors`] - The per-field [`ErrorMap`](errors::ErrorMap)
//! - [`validation`] - Submit-time and live validation rules
//! - [`payload`] - The normalized [`SubmissionPayload`](payload::SubmissionPayload)
//! - [`backend`] - Where payloads go ([`SubmissionBackend`](backend::SubmissionBackend))
//! - [`timer`] - Cancelable delayed tasks
//! - [`render`] - Snapshot types the page draws from
//! - [`form`] - The [`ContactForm`](form::ContactForm) controller

pub mod backend;
pub mod errors;
pub mod fields;
pub mod form;
pub mod payload;
pub mod render;
pub mod timer;
pub mod validation;

pub use errors::{ErrorKey, ErrorMap};
pub use fields::{FieldName, FormState};
pub use form::{ContactForm, SubmitOutcome};
pub use payload::SubmissionPayload;
