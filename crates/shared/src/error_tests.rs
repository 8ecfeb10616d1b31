use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::NotFound("x".into()), "NOT_FOUND")]
#[case(AppError::Validation("x".into()), "VALIDATION_ERROR")]
#[case(AppError::BusinessRule("x".into()), "BUSINESS_RULE_VIOLATION")]
#[case(AppError::Unavailable("x".into()), "SERVICE_UNAVAILABLE")]
#[case(AppError::Config("x".into()), "CONFIG_ERROR")]
fn test_app_error_codes(#[case] err: AppError, #[case] code: &str) {
    assert_eq!(err.error_code(), code);
}

#[test]
fn test_caller_errors() {
    assert!(AppError::NotFound(String::new()).is_caller_error());
    assert!(AppError::Validation(String::new()).is_caller_error());
    assert!(AppError::BusinessRule(String::new()).is_caller_error());
    assert!(!AppError::Unavailable(String::new()).is_caller_error());
    assert!(!AppError::Config(String::new()).is_caller_error());
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        AppError::NotFound("sale 1".into()).to_string(),
        "Not found: sale 1"
    );
    assert_eq!(
        AppError::Validation("empty items".into()).to_string(),
        "Validation error: empty items"
    );
    assert_eq!(
        AppError::BusinessRule("mixed clients".into()).to_string(),
        "Business rule violation: mixed clients"
    );
    assert_eq!(
        AppError::Unavailable("closed".into()).to_string(),
        "Service unavailable: closed"
    );
}
