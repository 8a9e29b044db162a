//! Driven port for profile persistence.

use async_trait::async_trait;

use crate::domain::{
    AccountId, AccountKind, CandidateProfile, CandidateProfileData, CompanyProfile,
    CompanyProfileData, ListFilter, Profile,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

/// One keyset page of a directory listing.
///
/// Rows are ordered by account id ascending and start strictly after
/// `after` when it is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfilePageRequest {
    pub kind: AccountKind,
    pub filter: ListFilter,
    pub after: Option<AccountId>,
    pub limit: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create the candidate profile for `account_id` or replace every field
    /// of the existing one, atomically.
    async fn upsert_candidate(
        &self,
        account_id: AccountId,
        data: &CandidateProfileData,
    ) -> Result<CandidateProfile, ProfileRepositoryError>;

    /// Company counterpart of [`ProfileRepository::upsert_candidate`].
    async fn upsert_company(
        &self,
        account_id: AccountId,
        data: &CompanyProfileData,
    ) -> Result<CompanyProfile, ProfileRepositoryError>;

    async fn find_by_account(
        &self,
        account_id: AccountId,
        kind: AccountKind,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch at most `page.limit` profiles. A short page means the listing
    /// is exhausted.
    async fn list_page(
        &self,
        page: ProfilePageRequest,
    ) -> Result<Vec<Profile>, ProfileRepositoryError>;
}
