//! The normalized record handed to a submission backend.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

use showroom_core::settings::ContactSettings;
use showroom_core::utils::text::{digits_only, escape_html};

use crate::errors::ErrorMap;
use crate::fields::FormState;
use crate::validation::validate_all;

/// A validated, normalized contact request.
///
/// Only [`SubmissionPayload::build`] creates one, and it refuses to do so
/// unless the form state passes every rule, so a payload always carries a
/// full-length phone number and a real product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Trimmed name.
    pub name: String,
    /// Country dial prefix followed by the phone digits, e.g. `+919876543210`.
    pub phone: String,
    /// Trimmed, lowercased email.
    pub email: String,
    pub product: String,
    /// Trimmed message with `&`, `<`, `>` escaped.
    pub message: String,
    #[serde(serialize_with = "serialize_iso8601")]
    pub submitted_at: DateTime<Utc>,
    /// Country label, e.g. "India".
    pub country: String,
}

fn serialize_iso8601<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl SubmissionPayload {
    /// Validates `state` and builds the payload stamped with `submitted_at`.
    ///
    /// Returns the collected field errors instead when any rule fails.
    pub fn build(
        state: &FormState,
        contact: &ContactSettings,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, ErrorMap> {
        let errors = validate_all(state, contact);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: state.name.trim().to_string(),
            phone: format!("{}{}", contact.country.dial, digits_only(&state.phone)),
            email: state.email.trim().to_lowercase(),
            product: state.product.clone(),
            message: escape_html(state.message.trim()),
            submitted_at,
            country: contact.country.label.clone(),
        })
    }

    /// Serializes the payload as pretty JSON, the way it is logged and sent.
    pub fn to_json(&self) -> Result<String, showroom_core::ShowroomError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
