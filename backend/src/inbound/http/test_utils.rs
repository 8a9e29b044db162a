//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::domain::{IdentityService, ProfileService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryProfileRepository};
use crate::outbound::security::Argon2CredentialHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state backed by fresh in-memory stores and a cheap Argon2 hasher.
pub fn in_memory_state() -> web::Data<HttpState> {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let hasher = Arc::new(
        Argon2CredentialHasher::with_params(1024, 1, 1).expect("test argon2 params are valid"),
    );
    web::Data::new(HttpState::new(
        Arc::new(IdentityService::new(accounts.clone(), hasher)),
        Arc::new(ProfileService::new(accounts, profiles).with_page_size(2)),
    ))
}
