//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{IdentityStore, ProfileStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl HttpState {
    /// Bundle the identity and profile use-cases.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use talfy::domain::{IdentityService, ProfileService};
    /// use talfy::inbound::http::state::HttpState;
    /// use talfy::outbound::memory::{InMemoryAccountRepository, InMemoryProfileRepository};
    /// use talfy::outbound::security::Argon2CredentialHasher;
    ///
    /// let accounts = Arc::new(InMemoryAccountRepository::new());
    /// let hasher = Arc::new(Argon2CredentialHasher::new().expect("default argon2 params"));
    /// let state = HttpState::new(
    ///     Arc::new(IdentityService::new(accounts.clone(), hasher)),
    ///     Arc::new(ProfileService::new(accounts, Arc::new(InMemoryProfileRepository::new()))),
    /// );
    /// let _identity = state.identity.clone();
    /// ```
    pub fn new(identity: Arc<dyn IdentityStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { identity, profiles }
    }
}
