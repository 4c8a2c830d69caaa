//! Settings for the showroom contact form.
//!
//! [`Settings`] holds the read-only configuration the form controller is
//! built from: the fixed country metadata, the product catalog offered in
//! the form, timer durations, and the fixed notification texts. The values
//! are process-wide constants in spirit, but they are passed to the
//! controller explicitly (usually inside an `Arc`) rather than read from a
//! global.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShowroomError;

/// Country metadata used for phone validation and the submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySettings {
    /// Display label (e.g. "India").
    pub label: String,
    /// Dial prefix prepended to the phone digits (e.g. "+91").
    pub dial: String,
    /// The exact number of digits a phone number must have.
    pub phone_length: usize,
}

impl Default for CountrySettings {
    fn default() -> Self {
        Self {
            label: "India".to_string(),
            dial: "+91".to_string(),
            phone_length: 10,
        }
    }
}

/// Timer durations, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Quiet period before a live field check runs.
    pub debounce_ms: u64,
    /// Minimum interval between two accepted submit attempts.
    pub throttle_ms: u64,
    /// How long a toast stays visible.
    pub toast_ms: u64,
    /// How long the `sent` flag stays raised after a submission settles.
    pub sent_reset_ms: u64,
    /// Latency of the simulated submission.
    pub submit_latency_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 400,
            throttle_ms: 3000,
            toast_ms: 3000,
            sent_reset_ms: 3000,
            submit_latency_ms: 1200,
        }
    }
}

impl TimingSettings {
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub const fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub const fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub const fn sent_reset(&self) -> Duration {
        Duration::from_millis(self.sent_reset_ms)
    }

    pub const fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.submit_latency_ms)
    }
}

/// Fixed notification texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSettings {
    /// Toast shown after a successful submission.
    pub success: String,
    /// General error shown when the submission fails.
    pub failure: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            success: "Thank you! Your message has been received.".to_string(),
            failure: "Failed to send. Try again later.".to_string(),
        }
    }
}

/// Everything the contact form controller needs to know.
///
/// # Examples
///
/// ```
/// use showroom_core::settings::ContactSettings;
///
/// let contact = ContactSettings::default();
/// assert_eq!(contact.placeholder(), "Select a product");
/// assert!(contact.is_placeholder("Select a product"));
/// assert_eq!(contact.country.phone_length, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSettings {
    /// Country metadata.
    pub country: CountrySettings,
    /// Products offered in the form. The first entry is the non-selectable placeholder.
    pub products: Vec<String>,
    /// Maximum message length in characters, after trimming.
    pub message_max_length: usize,
    /// Timer durations.
    pub timing: TimingSettings,
    /// Notification texts.
    pub messages: MessageSettings,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            country: CountrySettings::default(),
            products: vec![
                "Select a product".to_string(),
                "Product A".to_string(),
                "Product B".to_string(),
                "Product C".to_string(),
                "Others".to_string(),
            ],
            message_max_length: 1000,
            timing: TimingSettings::default(),
            messages: MessageSettings::default(),
        }
    }
}

impl ContactSettings {
    /// Returns the placeholder product entry.
    pub fn placeholder(&self) -> &str {
        self.products.first().map_or("", String::as_str)
    }

    /// Returns `true` if `product` is the "not selected" placeholder.
    pub fn is_placeholder(&self, product: &str) -> bool {
        product == self.placeholder()
    }

    /// Returns the selectable products (everything after the placeholder).
    pub fn selectable_products(&self) -> &[String] {
        self.products.get(1..).unwrap_or(&[])
    }
}

/// The complete set of showroom settings.
///
/// # Examples
///
/// ```
/// use showroom_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert_eq!(settings.contact.country.dial, "+91");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "showroom_forms=trace").
    pub log_level: String,
    /// Contact form configuration.
    pub contact: ContactSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            contact: ContactSettings::default(),
        }
    }
}

impl Settings {
    /// Checks the settings for values the form controller cannot work with.
    pub fn validate(&self) -> Result<(), ShowroomError> {
        let contact = &self.contact;
        if contact.products.len() < 2 {
            return Err(ShowroomError::ConfigurationError(
                "contact.products needs a placeholder and at least one product".to_string(),
            ));
        }
        if contact.country.phone_length == 0 {
            return Err(ShowroomError::ConfigurationError(
                "contact.country.phone_length must be greater than zero".to_string(),
            ));
        }
        if contact.message_max_length == 0 {
            return Err(ShowroomError::ConfigurationError(
                "contact.message_max_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
