//! Property tests for the submit-time rules and message sanitization.

use proptest::prelude::*;
use proptest::test_runner::Config;

use showroom_core::settings::ContactSettings;
use showroom_core::utils::text::escape_html;
use showroom_forms::fields::{FieldName, FormState};
use showroom_forms::payload::SubmissionPayload;
use showroom_forms::validation::validate_all;

fn contact() -> ContactSettings {
    ContactSettings::default()
}

fn phone_input() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[0-9 +()-]{0,20}",
        "[0-9]{10}",
        "[0-9]{5} [0-9]{5}",
    ]
}

fn valid_phone() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{10}", "[0-9]{5} [0-9]{5}", "\\([0-9]{3}\\) [0-9]{3}-[0-9]{4}"]
}

prop_compose! {
    fn valid_state()(
        name in "[A-Za-zà-ÿ][A-Za-zà-ÿ .'-]{0,60}",
        email in "[a-z0-9._%+-]{1,16}@[a-z0-9-]{1,12}\\.[a-z]{2,6}",
        phone in valid_phone(),
        product in prop::sample::select(contact().selectable_products().to_vec()),
        message in "[A-Za-z0-9à-ÿ][A-Za-z0-9à-ÿ .,!?<>&\n]{0,400}",
    ) -> FormState {
        FormState { name, phone, email, product, message }
    }
}

prop_compose! {
    fn any_state()(
        name in any::<String>(),
        phone in phone_input(),
        email in any::<String>(),
        product in prop_oneof![
            prop::sample::select(contact().products),
            any::<String>(),
        ],
        message in any::<String>(),
    ) -> FormState {
        FormState { name, phone, email, product, message }
    }
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn valid_states_have_no_errors(state in valid_state()) {
        let errors = validate_all(&state, &contact());
        prop_assert!(errors.is_empty(), "unexpected errors {:?} for {:?}", errors, state);
    }

    #[test]
    fn valid_states_build_a_payload(state in valid_state()) {
        let payload = SubmissionPayload::build(&state, &contact(), chrono::Utc::now());
        prop_assert!(payload.is_ok());
        let payload = payload.unwrap();
        prop_assert!(payload.phone.starts_with("+91"));
        prop_assert_eq!(payload.phone.len(), 13);
        prop_assert!(!payload.message.contains('<'));
    }

    #[test]
    fn blank_name_is_always_reported(
        state in valid_state(),
        name in "[ \t\r\n\u{a0}\u{2003}]{0,8}",
    ) {
        let state = FormState { name, ..state };
        let errors = validate_all(&state, &contact());
        prop_assert_eq!(errors.get(FieldName::Name), Some("Name is required."));
        prop_assert_eq!(errors.len(), 1);
    }

    #[test]
    fn phone_error_iff_not_ten_digits(state in valid_state(), phone in phone_input()) {
        let digits = phone.chars().filter(char::is_ascii_digit).count();
        let state = FormState { phone, ..state };
        let has_error = validate_all(&state, &contact()).contains(FieldName::Phone);
        prop_assert_eq!(has_error, digits != 10);
    }

    #[test]
    fn message_error_iff_blank_or_too_long(state in valid_state(), message in "[a-z ]{0,1100}") {
        let trimmed = message.trim().chars().count();
        let state = FormState { message, ..state };
        let has_error = validate_all(&state, &contact()).contains(FieldName::Message);
        prop_assert_eq!(has_error, trimmed == 0 || trimmed > 1000);
    }

    #[test]
    fn validate_all_is_idempotent(state in any_state()) {
        let c = contact();
        let first = validate_all(&state, &c);
        let second = validate_all(&state, &c);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn escape_leaves_clean_text_alone(s in "[^&<>]*") {
        prop_assert_eq!(escape_html(&s), s);
    }

    #[test]
    fn escaped_text_has_no_markup(s in any::<String>()) {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
    }
}
