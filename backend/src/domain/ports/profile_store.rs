//! Driving port for role-specific profiles.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::domain::{
    AccountId, AccountKind, CandidateProfile, CandidateProfileDraft, CompanyProfile,
    CompanyProfileDraft, Error, ListFilter, Profile,
};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create or fully replace the candidate profile of `account_id`.
    ///
    /// The account must exist and be a candidate, else `AccountNotFound`.
    /// Draft validation failures surface as `InvalidProfile`.
    async fn upsert_candidate_profile(
        &self,
        account_id: AccountId,
        draft: CandidateProfileDraft,
    ) -> Result<CandidateProfile, Error>;

    /// Company counterpart of [`ProfileStore::upsert_candidate_profile`].
    async fn upsert_company_profile(
        &self,
        account_id: AccountId,
        draft: CompanyProfileDraft,
    ) -> Result<CompanyProfile, Error>;

    /// Fetch the profile of `account_id` without directory filtering.
    async fn get_profile(&self, account_id: AccountId) -> Result<Profile, Error>;

    /// Lazily stream profiles of `kind` ordered by account id. Pages are
    /// fetched as the stream is polled.
    fn list_profiles(&self, kind: AccountKind, filter: ListFilter)
    -> BoxStream<'_, Result<Profile, Error>>;
}
