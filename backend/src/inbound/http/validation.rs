//! Request validation helpers shared by the HTTP handlers.
//!
//! Failures become `invalid_request` errors whose details carry the offending
//! camelCase field name and a stable code.

use actix_web::error::JsonPayloadError;
use actix_web::http::Method;
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{AccountId, AccountKind, Error};

/// Validation codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    PasswordMismatch,
    UnknownAccountKind,
    InvalidAccountId,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::PasswordMismatch => "password_mismatch",
            Self::UnknownAccountKind => "unknown_account_kind",
            Self::InvalidAccountId => "invalid_account_id",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Wire-level name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const CONFIRM_PASSWORD: FieldName = FieldName::new("confirmPassword");
pub(crate) const USER_TYPE: FieldName = FieldName::new("userType");
pub(crate) const ACCOUNT_ID: FieldName = FieldName::new("accountId");

fn invalid(field: FieldName, code: ValidationCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    invalid(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

/// Unwrap a required body field.
pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Reject a registration whose confirmation differs from the password.
pub(crate) fn ensure_passwords_match(password: &str, confirmation: &str) -> Result<(), Error> {
    if password == confirmation {
        return Ok(());
    }
    Err(invalid(
        CONFIRM_PASSWORD,
        ValidationCode::PasswordMismatch,
        "password and confirmation do not match".to_owned(),
    ))
}

pub(crate) fn parse_account_kind(value: &str) -> Result<AccountKind, Error> {
    value.parse().map_err(|_| {
        invalid(
            USER_TYPE,
            ValidationCode::UnknownAccountKind,
            format!("userType must be candidate or company, got {value:?}"),
        )
    })
}

pub(crate) fn parse_account_id(value: i64) -> Result<AccountId, Error> {
    AccountId::new(value).map_err(|_| {
        invalid(
            ACCOUNT_ID,
            ValidationCode::InvalidAccountId,
            "accountId must be a positive integer".to_owned(),
        )
    })
}

/// Routes whose bodies are profile drafts.
const PROFILE_WRITE_SUFFIXES: [&str; 2] = ["/profile/candidate", "/profile/company"];

fn is_profile_write(req: &HttpRequest) -> bool {
    req.method() == Method::PUT
        && req
            .match_pattern()
            .is_some_and(|pattern| PROFILE_WRITE_SUFFIXES.iter().any(|s| pattern.ends_with(s)))
}

/// Map a rejected JSON body onto the error envelope.
///
/// A profile draft whose fields have the wrong type or range is an
/// `invalid_profile`; every other unreadable body is an `invalid_request`.
pub(crate) fn json_payload_error(err: &JsonPayloadError, req: &HttpRequest) -> Error {
    let error = match err {
        JsonPayloadError::Deserialize(_) if is_profile_write(req) => {
            Error::invalid_profile("profile body has fields of the wrong type or range")
        }
        _ => Error::invalid_request("request body is not valid JSON for this endpoint"),
    };
    error.with_details(json!({
        "code": ValidationCode::MalformedBody.as_str(),
        "reason": err.to_string(),
    }))
}

/// JSON extractor configuration shared by the API scope.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, req| json_payload_error(&err, req).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn details_code(error: &Error) -> &str {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(|code| code.as_str())
            .expect("details carry a code")
    }

    #[rstest]
    fn missing_fields_name_the_field() {
        let error = require(None, EMAIL).expect_err("missing email");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(details_code(&error), "missing_field");
        assert_eq!(
            error.details().and_then(|details| details.get("field")),
            Some(&json!("email"))
        );
    }

    #[rstest]
    fn mismatched_confirmation_is_rejected() {
        let error = ensure_passwords_match("Abcdef1!", "Abcdef1?").expect_err("mismatch");
        assert_eq!(details_code(&error), "password_mismatch");
        assert!(ensure_passwords_match("Abcdef1!", "Abcdef1!").is_ok());
    }

    #[rstest]
    #[case("candidate", AccountKind::Candidate)]
    #[case(" Company ", AccountKind::Company)]
    fn account_kinds_parse(#[case] raw: &str, #[case] expected: AccountKind) {
        assert_eq!(parse_account_kind(raw).expect("known kind"), expected);
    }

    #[rstest]
    fn unknown_account_kind_is_invalid_request() {
        let error = parse_account_kind("recruiter").expect_err("unknown kind");
        assert_eq!(details_code(&error), "unknown_account_kind");
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_account_ids_are_rejected(#[case] raw: i64) {
        let error = parse_account_id(raw).expect_err("non-positive id");
        assert_eq!(details_code(&error), "invalid_account_id");
    }
}
