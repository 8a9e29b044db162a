//! Identity domain service.
//!
//! Implements [`IdentityStore`] on top of an [`AccountRepository`] and a
//! [`CredentialHasher`]. A lookup rejects already-registered emails before
//! the secret is checked or hashed; the repository's unique index remains the
//! guarantee when two registrations race.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{AccountRepository, CredentialHasher, IdentityStore, NewAccount};
use crate::domain::{
    Account, AccountCounts, AccountId, AccountKind, Email, Error, ErrorCode, Secret,
};

const INVALID_CREDENTIAL_MESSAGE: &str = "invalid email or password";

/// Identity service implementing the [`IdentityStore`] driving port.
#[derive(Clone)]
pub struct IdentityService<R, H> {
    accounts: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> IdentityService<R, H> {
    pub fn new(accounts: Arc<R>, hasher: Arc<H>) -> Self {
        Self { accounts, hasher }
    }
}

impl<R, H> IdentityService<R, H>
where
    R: AccountRepository,
    H: CredentialHasher,
{
    fn parse_email(raw: &str) -> Result<Email, Error> {
        Email::parse(raw).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "email" }))
        })
    }

    fn check_policy(raw: &str) -> Result<Secret, Error> {
        Secret::new(raw).map_err(|rule| {
            Error::weak_secret(rule.to_string()).with_details(json!({
                "field": "password",
                "rule": rule.code(),
            }))
        })
    }

    /// Burn one verification so unknown emails cost the same as bad secrets.
    async fn verify_placeholder(&self, secret: &Secret) {
        let placeholder = self.hasher.placeholder();
        if let Err(err) = self.hasher.verify(secret, &placeholder).await {
            warn!(error = %err, "placeholder credential verification failed");
        }
    }
}

#[async_trait]
impl<R, H> IdentityStore for IdentityService<R, H>
where
    R: AccountRepository,
    H: CredentialHasher,
{
    async fn register(
        &self,
        email: &str,
        secret: &str,
        kind: AccountKind,
    ) -> Result<Account, Error> {
        let email = Self::parse_email(email)?;
        // A taken email wins over a weak secret. The unique index still
        // decides races between concurrent registrations below.
        if self.accounts.find_by_email(&email).await?.is_some() {
            debug!(%kind, "registration rejected: email already registered");
            return Err(Error::duplicate_email(
                "an account with this email already exists",
            ));
        }
        let secret = Self::check_policy(secret)?;
        let credential = self.hasher.hash(&secret).await?;

        let new_account = NewAccount {
            email,
            credential,
            kind,
        };
        let account = self.accounts.insert(&new_account).await.map_err(|err| {
            let error = Error::from(err);
            if error.code() == ErrorCode::DuplicateEmail {
                debug!(%kind, "registration rejected: email already registered");
            }
            error
        })?;

        info!(account_id = %account.id(), %kind, "account registered");
        Ok(account)
    }

    async fn authenticate(&self, email: &str, secret: &str) -> Result<Account, Error> {
        let secret = Secret::for_verification(secret);
        let stored = match Email::parse(email) {
            Ok(email) => self.accounts.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(stored) = stored else {
            self.verify_placeholder(&secret).await;
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credential(INVALID_CREDENTIAL_MESSAGE));
        };

        if self.hasher.verify(&secret, &stored.credential).await? {
            debug!(account_id = %stored.account.id(), "login succeeded");
            Ok(stored.account)
        } else {
            debug!(account_id = %stored.account.id(), "login rejected: secret mismatch");
            Err(Error::invalid_credential(INVALID_CREDENTIAL_MESSAGE))
        }
    }

    async fn exists(&self, email: &str) -> Result<bool, Error> {
        let Ok(email) = Email::parse(email) else {
            return Ok(false);
        };
        Ok(self.accounts.find_by_email(&email).await?.is_some())
    }

    async fn count_by_kind(&self) -> Result<AccountCounts, Error> {
        Ok(self.accounts.count_by_kind().await?)
    }

    async fn get_account(&self, id: AccountId) -> Result<Account, Error> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::account_not_found(format!("account {id} not found")))
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
