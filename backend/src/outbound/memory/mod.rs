//! In-process repositories used when no database is configured and in tests.
//!
//! Each store keeps its rows behind a single `std::sync::Mutex`, which gives
//! the same uniqueness and upsert guarantees as the PostgreSQL indexes. Data
//! does not survive a restart.

mod account_repository;
mod profile_repository;

pub use account_repository::InMemoryAccountRepository;
pub use profile_repository::InMemoryProfileRepository;
