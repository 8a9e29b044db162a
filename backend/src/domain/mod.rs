//! Domain primitives, ports and services.
//!
//! Purpose: define the account and profile model, validate untrusted input
//! into it, and implement the identity and profile use-cases behind driving
//! ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode — transport agnostic failure payload.
//! - Account, Email, AccountKind — registered identities.
//! - Secret, CredentialHash — clear-text and hashed credentials.
//! - Profile and the candidate/company draft, data and stored types.
//! - IdentityService / ProfileService — implementations of the driving ports.

pub mod account;
pub mod error;
mod identity_service;
pub mod ports;
pub mod profile;
mod profile_service;
pub mod secret;
mod trace_id;

pub use self::account::{
    Account, AccountCounts, AccountId, AccountKind, AccountValidationError, EMAIL_MAX, Email,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity_service::IdentityService;
pub use self::profile::{
    CandidateProfile, CandidateProfileData, CandidateProfileDraft, CompanyProfile,
    CompanyProfileData, CompanyProfileDraft, ListFilter, Profile, ProfileField,
    ProfileValidationError, TagSet,
};
pub use self::profile_service::{DEFAULT_PAGE_SIZE, ProfileService};
pub use self::secret::{CredentialHash, Secret, WeakSecretRule};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use talfy::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u64> {
///     Err(Error::not_found("no profile for account 7"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;

/// Maps driven-port failures onto domain errors.
mod store_errors {
    use super::Error;
    use super::ports::{AccountRepositoryError, CredentialHasherError, ProfileRepositoryError};

    impl From<AccountRepositoryError> for Error {
        fn from(value: AccountRepositoryError) -> Self {
            match value {
                AccountRepositoryError::Connection { message } => {
                    Error::store_unavailable(format!("account store unavailable: {message}"))
                }
                AccountRepositoryError::Query { message } => {
                    Error::internal(format!("account store error: {message}"))
                }
                AccountRepositoryError::DuplicateEmail => {
                    Error::duplicate_email("an account with this email already exists")
                }
            }
        }
    }

    impl From<ProfileRepositoryError> for Error {
        fn from(value: ProfileRepositoryError) -> Self {
            match value {
                ProfileRepositoryError::Connection { message } => {
                    Error::store_unavailable(format!("profile store unavailable: {message}"))
                }
                ProfileRepositoryError::Query { message } => {
                    Error::internal(format!("profile store error: {message}"))
                }
            }
        }
    }

    impl From<CredentialHasherError> for Error {
        fn from(value: CredentialHasherError) -> Self {
            Error::internal(value.to_string())
        }
    }
}
