//! Wiring of driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use talfy::domain::ports::{AccountRepository, ProfileRepository};
use talfy::domain::{IdentityService, ProfileService};
use talfy::inbound::http::state::HttpState;
use talfy::outbound::memory::{InMemoryAccountRepository, InMemoryProfileRepository};
use talfy::outbound::persistence::{DieselAccountRepository, DieselProfileRepository};
use talfy::outbound::security::Argon2CredentialHasher;

use super::ServerConfig;

fn wire<A, P>(
    accounts: Arc<A>,
    profiles: Arc<P>,
    hasher: Arc<Argon2CredentialHasher>,
    page_size: usize,
) -> HttpState
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
{
    HttpState::new(
        Arc::new(IdentityService::new(accounts.clone(), hasher)),
        Arc::new(ProfileService::new(accounts, profiles).with_page_size(page_size)),
    )
}

/// Build handler state once so every worker shares the same stores.
///
/// Uses the Diesel repositories when a pool is configured and the
/// in-memory ones otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let hasher = Argon2CredentialHasher::new()
        .map_err(|err| std::io::Error::other(format!("credential hasher setup failed: {err}")))?;
    let hasher = Arc::new(hasher);

    let state = match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselAccountRepository::new(pool.clone())),
            Arc::new(DieselProfileRepository::new(pool.clone())),
            hasher,
            config.list_page_size,
        ),
        None => {
            warn!("no database configured; accounts and profiles are kept in memory");
            wire(
                Arc::new(InMemoryAccountRepository::new()),
                Arc::new(InMemoryProfileRepository::new()),
                hasher,
                config.list_page_size,
            )
        }
    };
    Ok(web::Data::new(state))
}
