//! # showroom
//!
//! The contact form core of a vehicle manufacturer's homepage.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access and wires settings and logging together at startup.

use std::sync::Arc;

/// Core types: settings, settings loading, logging, and error types.
pub use showroom_core as core;

/// The contact form controller, its rules, and submission backends.
#[cfg(feature = "forms")]
pub use showroom_forms as forms;

use showroom_core::settings::{ContactSettings, Settings};
use showroom_core::ShowroomResult;

/// Validates `settings`, installs the tracing subscriber, and returns the
/// contact configuration ready to be shared with form controllers.
pub fn init(settings: &Settings) -> ShowroomResult<Arc<ContactSettings>> {
    settings.validate()?;
    let fresh = showroom_core::logging::setup_logging(settings);
    tracing::info!(
        fresh_subscriber = fresh,
        country = %settings.contact.country.label,
        products = settings.contact.selectable_products().len(),
        "showroom initialized"
    );
    Ok(Arc::new(settings.contact.clone()))
}

/// Convenient imports for pages embedding the contact form.
pub mod prelude {
    pub use showroom_core::settings::{ContactSettings, Settings};
    pub use showroom_core::{ShowroomError, ShowroomResult};

    #[cfg(feature = "forms")]
    pub use showroom_forms::{
        ContactForm, ErrorKey, ErrorMap, FieldName, FormState, SubmissionPayload, SubmitOutcome,
    };
}
