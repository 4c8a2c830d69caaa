//! Validation rules for the contact form.
//!
//! Two passes share the same rules:
//! 1. [`validate_all`] runs every rule over the whole [`FormState`] at submit
//!    time. Errors accumulate rather than short-circuiting, so all problems
//!    are reported at once.
//! 2. [`live_check`] re-checks a single email or phone value after the user
//!    stops typing. It only looks at non-empty values and uses softer
//!    wording than the submit-time pass.

use std::sync::OnceLock;

use regex::Regex;

use showroom_core::settings::ContactSettings;
use showroom_core::utils::text::{char_len, digits_only, is_blank};
use showroom_core::ValidationError;

use crate::errors::ErrorMap;
use crate::fields::{FieldName, FormState};

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

/// Returns `true` if the trimmed `value` looks like an email address.
///
/// # Examples
///
/// ```
/// use showroom_forms::validation::is_valid_email;
///
/// assert!(is_valid_email("  Ravi@Example.in "));
/// assert!(!is_valid_email("bad"));
/// assert!(!is_valid_email("a b@example.com"));
/// ```
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Checks one field of `state` against its submit-time rule.
pub fn validate_field(
    field: FieldName,
    state: &FormState,
    contact: &ContactSettings,
) -> Result<(), ValidationError> {
    match field {
        FieldName::Name => {
            if is_blank(&state.name) {
                return Err(ValidationError::new("Name is required.", "required"));
            }
        }
        FieldName::Email => {
            if is_blank(&state.email) {
                return Err(ValidationError::new("Email is required.", "required"));
            }
            if !is_valid_email(&state.email) {
                return Err(ValidationError::new("Email is invalid.", "invalid"));
            }
        }
        FieldName::Phone => {
            let digits = digits_only(&state.phone);
            if digits.is_empty() {
                return Err(ValidationError::new("Phone number is required.", "required"));
            }
            let country = &contact.country;
            if digits.len() != country.phone_length {
                return Err(ValidationError::new(
                    format!(
                        "For {}, enter exactly {} digits.",
                        country.label, country.phone_length
                    ),
                    "length",
                )
                .with_param("length", country.phone_length.to_string()));
            }
        }
        FieldName::Product => {
            if state.product.is_empty() || contact.is_placeholder(&state.product) {
                return Err(ValidationError::new("Please select a product.", "required"));
            }
        }
        FieldName::Message => {
            let message = state.message.trim();
            if message.is_empty() {
                return Err(ValidationError::new("Message cannot be empty.", "required"));
            }
            let max = contact.message_max_length;
            if char_len(message) > max {
                return Err(ValidationError::new(
                    format!("Message too long (max {max} characters)."),
                    "max_length",
                )
                .with_param("max", max.to_string()));
            }
        }
    }
    Ok(())
}

/// Runs every field rule and collects the failures.
///
/// Pure: the result depends only on `state` and `contact`. An empty map
/// means the form may be submitted.
pub fn validate_all(state: &FormState, contact: &ContactSettings) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for field in FieldName::ALL {
        if let Err(err) = validate_field(field, state, contact) {
            errors.insert(field, err.message);
        }
    }
    errors
}

/// Outcome of a debounced live check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveCheck {
    /// The value was empty or the field has no live rule; leave its error alone.
    Skipped,
    /// The value passes; drop any existing error for the field.
    Valid,
    /// The value fails; show this error.
    Invalid(ValidationError),
}

/// Re-checks a single field value after the user stopped typing.
///
/// # Examples
///
/// ```
/// use showroom_core::settings::ContactSettings;
/// use showroom_forms::fields::FieldName;
/// use showroom_forms::validation::{live_check, LiveCheck};
///
/// let contact = ContactSettings::default();
/// assert_eq!(live_check(FieldName::Phone, "", &contact), LiveCheck::Skipped);
/// assert_eq!(live_check(FieldName::Phone, "98765 43210", &contact), LiveCheck::Valid);
/// assert!(matches!(live_check(FieldName::Email, "bad", &contact), LiveCheck::Invalid(_)));
/// ```
pub fn live_check(field: FieldName, value: &str, contact: &ContactSettings) -> LiveCheck {
    match field {
        FieldName::Email => {
            if value.is_empty() {
                LiveCheck::Skipped
            } else if is_valid_email(value) {
                LiveCheck::Valid
            } else {
                LiveCheck::Invalid(ValidationError::new(
                    "Email format seems invalid.",
                    "invalid",
                ))
            }
        }
        FieldName::Phone => {
            let digits = digits_only(value);
            if digits.is_empty() {
                LiveCheck::Skipped
            } else if digits.len() == contact.country.phone_length {
                LiveCheck::Valid
            } else {
                LiveCheck::Invalid(ValidationError::new("Incorrect contact number", "length"))
            }
        }
        FieldName::Name | FieldName::Product | FieldName::Message => LiveCheck::Skipped,
    }
}

/// Applies a live check result to `errors`.
pub fn apply_live_check(errors: &mut ErrorMap, field: FieldName, check: LiveCheck) {
    match check {
        LiveCheck::Skipped => {}
        LiveCheck::Valid => {
            errors.remove(field);
        }
        LiveCheck::Invalid(err) => errors.insert(field, err.message),
    }
}
