use std::collections::HashMap;

use proptest::prelude::*;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn fields(name: &str, email: &str, message: &str) -> HashMap<&'static str, String> {
    HashMap::from([("name", name.to_owned()), ("email", email.to_owned()), ("message", message.to_owned())])
}

fn run(values: &HashMap<&'static str, String>, honeypot: Option<&str>) -> Verdict {
    validate(&CONTACT_RULES, |id| values.get(id).cloned(), honeypot)
}

const NAME: FieldRule = CONTACT_RULES[0];
const EMAIL: FieldRule = CONTACT_RULES[1];
const MESSAGE: FieldRule = CONTACT_RULES[2];

// =============================================================
// Email shape
// =============================================================

#[test]
fn email_shape_accepts_plain_addresses() {
    assert!(is_email_shaped("a@b.com"));
    assert!(is_email_shaped("first.last+tag@mail.example.co.uk"));
}

#[test]
fn email_shape_rejects_malformed_addresses() {
    for bad in ["", "not-an-email", "a@b", "@b.com", "a@.com.", "a b@c.com", "a@b@c.com", "a@b.com "] {
        assert!(!is_email_shaped(bad), "{bad:?}");
    }
}

// =============================================================
// Single field checks
// =============================================================

#[test]
fn short_name_reports_minimum_length() {
    assert_eq!(check_field(&NAME, "A").as_deref(), Some("Full name must be at least 2 characters"));
}

#[test]
fn empty_name_is_required() {
    assert_eq!(check_field(&NAME, "").as_deref(), Some("Full name is required"));
    assert_eq!(check_field(&NAME, "   \t").as_deref(), Some("Full name is required"));
}

#[test]
fn value_is_trimmed_before_length_check() {
    assert_eq!(check_field(&NAME, "  A  ").as_deref(), Some("Full name must be at least 2 characters"));
    assert_eq!(check_field(&NAME, " Al "), None);
}

#[test]
fn astral_character_counts_as_two_units() {
    assert_eq!(check_field(&NAME, "😀"), None);
    assert_eq!(check_field(&NAME, " 😀 "), None);
}

#[test]
fn length_counts_utf16_units_not_bytes() {
    assert_eq!(check_field(&NAME, " Él"), None);
    assert_eq!(check_field(&MESSAGE, "ééééééééé").as_deref(), Some("Message must be at least 10 characters"));
    assert_eq!(check_field(&MESSAGE, "éééééééééé"), None);
}

#[test]
fn byte_order_mark_is_trimmed() {
    assert_eq!(check_field(&NAME, "\u{FEFF}").as_deref(), Some("Full name is required"));
    assert_eq!(check_field(&NAME, "\u{FEFF}A\u{FEFF}").as_deref(), Some("Full name must be at least 2 characters"));
}

#[test]
fn empty_email_reports_invalid_address() {
    assert_eq!(check_field(&EMAIL, "").as_deref(), Some(INVALID_EMAIL_MESSAGE));
}

#[test]
fn email_is_trimmed_before_matching() {
    assert_eq!(check_field(&EMAIL, "  a@b.com  "), None);
}

#[test]
fn short_message_reports_minimum_length() {
    assert_eq!(check_field(&MESSAGE, "short").as_deref(), Some("Message must be at least 10 characters"));
}

// =============================================================
// Whole-form verdicts
// =============================================================

#[test]
fn three_bad_fields_yield_three_errors_led_by_name() {
    let verdict = run(&fields("A", "not-an-email", "short"), Some(""));
    assert!(!verdict.is_valid());
    assert_eq!(verdict.failures.len(), 3);
    assert_eq!(verdict.failures.first().map(|f| f.field), Some("name"));
    let order: Vec<_> = verdict.failures.iter().map(|f| f.field).collect();
    assert_eq!(order, vec!["name", "email", "message"]);
    assert!(!verdict.honeypot_tripped);
}

#[test]
fn valid_submission_passes_with_no_errors() {
    let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), Some(""));
    assert!(verdict.is_valid());
    assert!(verdict.failures.is_empty());
    assert!(!verdict.honeypot_tripped);
}

#[test]
fn honeypot_blocks_silently() {
    let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), Some("spam"));
    assert!(!verdict.is_valid());
    assert!(verdict.honeypot_tripped);
    assert!(verdict.failures.is_empty());
}

#[test]
fn whitespace_honeypot_counts_as_blank() {
    let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), Some("  \n"));
    assert!(verdict.is_valid());
}

#[test]
fn byte_order_mark_honeypot_counts_as_blank() {
    let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), Some("\u{FEFF}"));
    assert!(!verdict.honeypot_tripped);
    assert!(verdict.is_valid());
}

#[test]
fn missing_honeypot_is_not_tripped() {
    let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), None);
    assert!(verdict.is_valid());
}

#[test]
fn absent_fields_are_skipped() {
    let values = HashMap::from([("email", "a@b.com".to_owned())]);
    let verdict = run(&values, None);
    assert!(verdict.is_valid());
}

#[test]
fn required_messages_use_labels() {
    let verdict = run(&fields("", "", ""), None);
    let messages: Vec<_> = verdict.failures.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(messages, vec!["Full name is required", INVALID_EMAIL_MESSAGE, "Message is required"]);
}

proptest! {
    #[test]
    fn at_most_one_failure_per_field(name in ".{0,12}", email in ".{0,20}", message in ".{0,30}") {
        let verdict = run(&fields(&name, &email, &message), None);
        let mut seen = std::collections::HashSet::new();
        for failure in &verdict.failures {
            prop_assert!(seen.insert(failure.field));
        }
        prop_assert!(verdict.failures.len() <= CONTACT_RULES.len());
    }

    #[test]
    fn honeypot_value_always_blocks(honeypot in "[a-z0-9]{1,16}") {
        let verdict = run(&fields("Ann Lee", "a@b.com", "This is a sufficiently long message."), Some(&honeypot));
        prop_assert!(!verdict.is_valid());
        prop_assert!(verdict.failures.is_empty());
    }
}
