//! Argon2id implementation of the credential hasher port.
//!
//! Hashing is memory-hard and takes tens of milliseconds with the default
//! parameters, so both operations run on the blocking pool via
//! [`TraceId::spawn_blocking`]. Stored credentials are PHC strings such as
//! `$argon2id$v=19$m=19456,t=2,p=1$...`; verification reads the parameters
//! from the string, so changing the hasher's cost does not invalidate
//! existing accounts.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};
use crate::domain::{CredentialHash, Secret, TraceId};

/// Credential hasher backed by the `argon2` crate.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
    placeholder: CredentialHash,
}

impl Argon2CredentialHasher {
    /// Hasher with the crate's recommended Argon2id parameters.
    pub fn new() -> Result<Self, CredentialHasherError> {
        Self::from_argon2(Argon2::default())
    }

    /// Hasher with explicit cost parameters (memory in KiB, iterations,
    /// parallelism). Low values are only suitable for tests.
    pub fn with_params(
        m_cost: u32,
        t_cost: u32,
        p_cost: u32,
    ) -> Result<Self, CredentialHasherError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|err| CredentialHasherError::hash(format!("invalid argon2 params: {err}")))?;
        Self::from_argon2(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn from_argon2(argon2: Argon2<'static>) -> Result<Self, CredentialHasherError> {
        // Hash a random salt string so the placeholder matches no user input.
        let throwaway = SaltString::generate(&mut OsRng);
        let placeholder = hash_blocking(&argon2, throwaway.as_str())?;
        Ok(Self {
            argon2,
            placeholder,
        })
    }
}

fn hash_blocking(argon2: &Argon2<'_>, secret: &str) -> Result<CredentialHash, CredentialHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|err| CredentialHasherError::hash(err.to_string()))?;
    Ok(CredentialHash::from_phc(hash.to_string()))
}

fn verify_blocking(
    argon2: &Argon2<'_>,
    secret: &str,
    phc: &str,
) -> Result<bool, CredentialHasherError> {
    let parsed =
        PasswordHash::new(phc).map_err(|err| CredentialHasherError::malformed_hash(err.to_string()))?;
    match argon2.verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialHasherError::hash(err.to_string())),
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, secret: &Secret) -> Result<CredentialHash, CredentialHasherError> {
        let argon2 = self.argon2.clone();
        let secret = secret.clone();
        TraceId::spawn_blocking(move || hash_blocking(&argon2, secret.expose()))
            .await
            .map_err(|err| CredentialHasherError::worker(err.to_string()))?
    }

    async fn verify(
        &self,
        secret: &Secret,
        credential: &CredentialHash,
    ) -> Result<bool, CredentialHasherError> {
        let argon2 = self.argon2.clone();
        let secret = secret.clone();
        let phc = credential.as_str().to_owned();
        TraceId::spawn_blocking(move || verify_blocking(&argon2, secret.expose(), &phc))
            .await
            .map_err(|err| CredentialHasherError::worker(err.to_string()))?
    }

    fn placeholder(&self) -> CredentialHash {
        self.placeholder.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        Argon2CredentialHasher::with_params(1024, 1, 1).expect("cheap params are valid")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify(hasher: Argon2CredentialHasher) {
        let secret = Secret::new("Abcdef1!").expect("strong secret");
        let credential = hasher.hash(&secret).await.expect("hash");

        assert!(credential.as_str().starts_with("$argon2id$"));
        assert!(!credential.as_str().contains("Abcdef1!"));
        assert!(hasher.verify(&secret, &credential).await.expect("verify"));

        let wrong = Secret::for_verification("wrong");
        assert!(!hasher.verify(&wrong, &credential).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(hasher: Argon2CredentialHasher) {
        let secret = Secret::new("Abcdef1!").expect("strong secret");
        let first = hasher.hash(&secret).await.expect("hash");
        let second = hasher.hash(&secret).await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_credentials_are_errors(hasher: Argon2CredentialHasher) {
        let secret = Secret::for_verification("Abcdef1!");
        let err = hasher
            .verify(&secret, &CredentialHash::from_phc("Abcdef1!"))
            .await
            .expect_err("plaintext is not a PHC string");
        assert!(matches!(err, CredentialHasherError::MalformedHash { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn placeholder_rejects_typical_secrets(hasher: Argon2CredentialHasher) {
        let placeholder = hasher.placeholder();
        for raw in ["", "password", "Abcdef1!"] {
            let secret = Secret::for_verification(raw);
            assert!(!hasher.verify(&secret, &placeholder).await.expect("verify"));
        }
    }

    #[rstest]
    fn rejects_invalid_params() {
        assert!(Argon2CredentialHasher::with_params(0, 0, 0).is_err());
    }
}
