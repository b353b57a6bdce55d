use super::*;

#[test]
fn js_error_display_includes_payload() {
    let err = SiteError::Js("TypeError: x is null".to_owned());
    assert_eq!(err.to_string(), "javascript error: TypeError: x is null");
}

#[test]
fn config_error_converts_from_serde_json() {
    let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: SiteError = parse.into();
    assert!(matches!(err, SiteError::Config(_)));
    assert!(err.to_string().starts_with("invalid site configuration:"));
}

#[test]
fn missing_host_errors_have_stable_messages() {
    assert_eq!(SiteError::MissingWindow.to_string(), "no global window");
    assert_eq!(SiteError::MissingDocument.to_string(), "window has no document");
}
