//! Contact form fields and the mutable form state.
//!
//! [`FieldName`] is the closed set of inputs the contact form has.
//! [`FormState`] holds their raw values exactly as typed. [`FieldMeta`]
//! carries the rendering hints (label, placeholder, input kind, maximum
//! length) the page uses to draw each input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use showroom_core::settings::ContactSettings;
use showroom_core::ShowroomError;

/// One of the contact form's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Phone,
    Email,
    Product,
    Message,
}

impl FieldName {
    /// All fields, in the order the form displays them.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Product,
        Self::Message,
    ];

    /// The field identifier used by the rendering surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Product => "product",
            Self::Message => "message",
        }
    }

    /// Returns `true` for fields that get debounced live feedback while typing.
    pub const fn is_live_checked(self) -> bool {
        matches!(self, Self::Email | Self::Phone)
    }

    /// Rendering hints for this field.
    pub fn meta(self, contact: &ContactSettings) -> FieldMeta {
        match self {
            Self::Name => FieldMeta {
                label: "Name",
                placeholder: "Your full name",
                input: InputKind::Text,
                max_length: Some(100),
            },
            Self::Email => FieldMeta {
                label: "Email",
                placeholder: "you@example.com",
                input: InputKind::Email,
                max_length: Some(254),
            },
            Self::Phone => FieldMeta {
                label: "Phone",
                placeholder: "1234567890",
                input: InputKind::Tel,
                max_length: Some(contact.country.phone_length),
            },
            Self::Product => FieldMeta {
                label: "Product",
                placeholder: "",
                input: InputKind::Select,
                max_length: None,
            },
            Self::Message => FieldMeta {
                label: "Message",
                placeholder: "Describe your requirement...",
                input: InputKind::Textarea,
                max_length: Some(contact.message_max_length),
            },
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ShowroomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "product" => Ok(Self::Product),
            "message" => Ok(Self::Message),
            other => Err(ShowroomError::UnknownField(other.to_string())),
        }
    }
}

/// The kind of input element a field is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// `<input type="text">`.
    Text,
    /// `<input type="email">`.
    Email,
    /// `<input type="tel">`.
    Tel,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    Textarea,
}

/// Static rendering hints for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input: InputKind,
    /// Maximum input length in characters, if the input enforces one.
    pub max_length: Option<usize>,
}

/// Raw field values as entered by the user.
///
/// # Examples
///
/// ```
/// use showroom_core::settings::ContactSettings;
/// use showroom_forms::fields::{FieldName, FormState};
///
/// let contact = ContactSettings::default();
/// let mut state = FormState::new(&contact);
/// assert_eq!(state.product, "Select a product");
///
/// state.set(FieldName::Phone, "98765 43210");
/// assert_eq!(state.get(FieldName::Phone), "98765 43210");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    /// Raw phone input; may contain spaces, dashes, or other non-digits.
    pub phone: String,
    pub email: String,
    pub product: String,
    pub message: String,
}

impl FormState {
    /// Creates the initial state: empty inputs with the placeholder product selected.
    pub fn new(contact: &ContactSettings) -> Self {
        Self {
            product: contact.placeholder().to_string(),
            ..Self::default()
        }
    }

    /// Returns the current value of `field`.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Phone => &self.phone,
            FieldName::Email => &self.email,
            FieldName::Product => &self.product,
            FieldName::Message => &self.message,
        }
    }

    /// Overwrites the value of `field`.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Phone => &mut self.phone,
            FieldName::Email => &mut self.email,
            FieldName::Product => &mut self.product,
            FieldName::Message => &mut self.message,
        };
        *slot = value.into();
    }
}
