//! What the rendering surface draws.
//!
//! A [`FormSnapshot`] is an owned copy of everything the page needs to draw
//! the contact form at one instant: the raw values, the error map, the
//! submit button state, and the toast. [`FieldView`] pairs one field's
//! value and error with its rendering hints, the way the page iterates over
//! inputs.

use serde::Serialize;

use showroom_core::settings::ContactSettings;
use showroom_core::utils::text::char_len;

use crate::errors::ErrorMap;
use crate::fields::{FieldMeta, FieldName, FormState};

/// The submit button's three looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    Idle,
    Sending,
    Sent,
}

impl ButtonState {
    /// Derives the button state from the controller flags. `submitting` wins over `sent`.
    pub const fn from_flags(submitting: bool, sent: bool) -> Self {
        if submitting {
            Self::Sending
        } else if sent {
            Self::Sent
        } else {
            Self::Idle
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Send Message",
            Self::Sending => "Sending...",
            Self::Sent => "Sent",
        }
    }

    /// The button is disabled while a submission is in flight or just finished.
    pub const fn is_disabled(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// One entry of the product drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOption {
    pub value: String,
    /// The placeholder entry is shown but cannot be picked.
    pub disabled: bool,
}

/// Builds the product drop-down entries from the configured catalog.
pub fn product_options(contact: &ContactSettings) -> Vec<ProductOption> {
    contact
        .products
        .iter()
        .map(|p| ProductOption {
            value: p.clone(),
            disabled: contact.is_placeholder(p),
        })
        .collect()
}

/// Formats the live character counter under the message box, e.g. "12/1000 characters".
pub fn message_counter(message: &str, contact: &ContactSettings) -> String {
    format!(
        "{}/{} characters",
        char_len(message),
        contact.message_max_length
    )
}

/// One field with its current value and error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub meta: FieldMeta,
    pub value: String,
    pub error: Option<String>,
}

impl FieldView {
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The id of the inline error element, used for `aria-describedby`.
    pub fn error_id(&self) -> Option<String> {
        self.error.as_ref().map(|_| format!("{}-error", self.name))
    }
}

/// Everything the page shows for the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub state: FormState,
    pub errors: ErrorMap,
    pub submitting: bool,
    pub sent: bool,
    pub toast_message: Option<String>,
}

impl FormSnapshot {
    pub const fn button(&self) -> ButtonState {
        ButtonState::from_flags(self.submitting, self.sent)
    }

    /// The general error banner. Hidden once the form reports success.
    pub fn general_error(&self) -> Option<&str> {
        if self.sent {
            None
        } else {
            self.errors.general()
        }
    }

    /// Returns the fields in display order, each paired with its value and error.
    pub fn fields(&self, contact: &ContactSettings) -> Vec<FieldView> {
        FieldName::ALL
            .iter()
            .map(|&name| FieldView {
                name,
                meta: name.meta(contact),
                value: self.state.get(name).to_string(),
                error: self.errors.get(name).map(str::to_string),
            })
            .collect()
    }
}
