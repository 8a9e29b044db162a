//! Tests for domain error construction, retry classification and serde shape.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::duplicate_email("taken"), ErrorCode::DuplicateEmail)]
#[case(Error::weak_secret("weak"), ErrorCode::WeakSecret)]
#[case(Error::invalid_credential("nope"), ErrorCode::InvalidCredential)]
#[case(Error::account_not_found("gone"), ErrorCode::AccountNotFound)]
#[case(Error::invalid_profile("bad"), ErrorCode::InvalidProfile)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::store_unavailable("down"), ErrorCode::StoreUnavailable)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn only_store_unavailable_is_retryable() {
    assert!(Error::store_unavailable("pool timed out").is_retryable());
    for error in [
        Error::duplicate_email("taken"),
        Error::weak_secret("weak"),
        Error::invalid_credential("nope"),
        Error::account_not_found("gone"),
        Error::invalid_profile("bad"),
        Error::not_found("missing"),
        Error::internal("boom"),
    ] {
        assert!(!error.is_retryable(), "{:?} must not be retryable", error.code());
    }
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_to_generic_message() {
    let error = Error::new(ErrorCode::InvalidCredential, "");
    assert_eq!(error.message(), "invalid email or password");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let error = Error::weak_secret("password must contain a digit")
        .with_details(json!({"field": "password", "rule": "missing_digit"}));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "weak_secret",
            "message": "password must contain a digit",
            "details": {"field": "password", "rule": "missing_digit"},
        })
    );
}

#[rstest]
fn deserialises_trace_id_from_payload(expected_trace_id: String) {
    let payload = json!({
        "code": "store_unavailable",
        "message": "down",
        "traceId": expected_trace_id,
    });

    let error: Error = serde_json::from_value(payload).expect("deserialise error");
    assert_eq!(error.code(), ErrorCode::StoreUnavailable);
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({"code": "not_found", "message": "  "});
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
