//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`IdentityStore`], [`ProfileStore`]) are called by inbound
//! adapters. Driven ports (repositories and the credential hasher) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod credential_hasher;
mod identity_store;
mod profile_repository;
mod profile_store;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountRepository, AccountRepositoryError, NewAccount, StoredAccount,
};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
pub use identity_store::IdentityStore;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfilePageRequest, ProfileRepository, ProfileRepositoryError};
pub use profile_store::ProfileStore;
