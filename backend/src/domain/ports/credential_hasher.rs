//! Driven port for one-way secret hashing.

use async_trait::async_trait;

use crate::domain::{CredentialHash, Secret};

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential hashers.
    pub enum CredentialHasherError {
        /// The hasher could not produce a credential.
        Hash { message: String } => "credential hashing failed: {message}",
        /// A stored credential could not be parsed.
        MalformedHash { message: String } => "stored credential is malformed: {message}",
        /// The blocking worker running the hasher failed.
        Worker { message: String } => "credential worker failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash `secret` with a fresh random salt.
    async fn hash(&self, secret: &Secret) -> Result<CredentialHash, CredentialHasherError>;

    /// Check `secret` against a stored credential. A mismatch is `Ok(false)`.
    async fn verify(
        &self,
        secret: &Secret,
        credential: &CredentialHash,
    ) -> Result<bool, CredentialHasherError>;

    /// Well-formed credential matching no real secret, verified against when
    /// the account is unknown so both failure paths cost the same.
    fn placeholder(&self) -> CredentialHash;
}
