//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. These wrappers mirror their wire
//! shape so the generated document describes the error envelope without
//! pulling utoipa into the domain.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A session is required but missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// An account already exists for the email.
    #[schema(rename = "duplicate_email")]
    DuplicateEmail,
    /// The password does not satisfy the password policy.
    #[schema(rename = "weak_secret")]
    WeakSecret,
    /// Unknown email or wrong password.
    #[schema(rename = "invalid_credential")]
    InvalidCredential,
    /// The account does not exist or has the wrong kind.
    #[schema(rename = "account_not_found")]
    AccountNotFound,
    /// A profile field failed validation.
    #[schema(rename = "invalid_profile")]
    InvalidProfile,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The backing store is unreachable; the request may be retried.
    #[schema(rename = "store_unavailable")]
    StoreUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// API error response payload.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "duplicate_email")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "an account with this email already exists")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"field": "displayName", "code": "too_long"}`.
    details: Option<serde_json::Value>,
}
