//! Driven port for account persistence.
//!
//! Adapters own uniqueness: `insert` must translate the storage-level unique
//! violation on the normalised email into
//! [`AccountRepositoryError::DuplicateEmail`] rather than have callers check
//! before inserting.

use async_trait::async_trait;

use crate::domain::{Account, AccountCounts, AccountId, AccountKind, CredentialHash, Email};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses the normalised email.
        DuplicateEmail => "an account with this email already exists",
    }
}

/// Account row to create. The id and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: Email,
    pub credential: CredentialHash,
    pub kind: AccountKind,
}

/// Account together with its stored credential, for authentication only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub account: Account,
    pub credential: CredentialHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Look up an account by normalised email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredAccount>, AccountRepositoryError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Count committed accounts per kind. Kinds without rows report zero.
    async fn count_by_kind(&self) -> Result<AccountCounts, AccountRepositoryError>;
}
