use business_directory::error::AppError;
use business_directory::validate::{normalize_spaces, require_fields, validate_email};

#[test]
fn test_validate_email_accepts_normal_addresses() {
    assert!(validate_email("jane@example.com"));
    assert!(validate_email("jane.doe+tag@mail.example.co.ke"));
    assert!(validate_email("x@y.z"));
}

#[test]
fn test_validate_email_rejects_broken_addresses() {
    assert!(!validate_email(""));
    assert!(!validate_email("janeexample.com")); // no @
    assert!(!validate_email("@example.com")); // empty local part
    assert!(!validate_email("jane@")); // empty domain
    assert!(!validate_email("jane@example")); // no dot in domain
    assert!(!validate_email("jane@.com")); // empty host
    assert!(!validate_email("jane@example.")); // empty tld
    assert!(!validate_email("jane doe@example.com")); // whitespace
    assert!(!validate_email("jane@@example.com")); // double @
}

#[test]
fn test_require_fields_passes_when_all_present() {
    let result = require_fields(&[
        ("email", Some("jane@example.com")),
        ("password", Some("secret")),
    ]);
    assert!(result.is_ok());
}

#[test]
fn test_require_fields_reports_each_missing_field() {
    let result = require_fields(&[
        ("email", None),
        ("username", Some("jane")),
        ("password", Some("   ")), // blank after trim counts as missing
    ]);

    match result {
        Err(AppError::MissingFields(fields)) => {
            assert_eq!(
                fields,
                vec![
                    "Please enter your email".to_string(),
                    "Please enter your password".to_string(),
                ]
            );
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

#[test]
fn test_normalize_spaces() {
    assert_eq!(normalize_spaces("  My   Cafe "), "My Cafe");
    assert_eq!(normalize_spaces("KTDA"), "KTDA");
    assert_eq!(normalize_spaces("   "), "");
}
