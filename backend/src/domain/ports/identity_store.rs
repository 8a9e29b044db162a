//! Driving port for account registration and authentication.
//!
//! Inbound adapters pass raw email and secret strings; normalisation, the
//! password policy and hashing all happen behind this port.

use async_trait::async_trait;

use crate::domain::{Account, AccountCounts, AccountId, AccountKind, Error};

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Create an account.
    ///
    /// Fails with `InvalidRequest` for a malformed email, `WeakSecret` when
    /// the secret breaks the password policy and `DuplicateEmail` when the
    /// normalised email is taken.
    async fn register(&self, email: &str, secret: &str, kind: AccountKind)
    -> Result<Account, Error>;

    /// Verify credentials. Unknown emails and wrong secrets fail identically
    /// with `InvalidCredential`.
    async fn authenticate(&self, email: &str, secret: &str) -> Result<Account, Error>;

    /// Whether an account uses `email`. Malformed input yields `false`.
    async fn exists(&self, email: &str) -> Result<bool, Error>;

    async fn count_by_kind(&self) -> Result<AccountCounts, Error>;

    /// Resolve an account id, failing with `AccountNotFound` when absent.
    async fn get_account(&self, id: AccountId) -> Result<Account, Error>;
}
