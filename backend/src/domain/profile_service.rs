//! Profile domain service.
//!
//! Implements [`ProfileStore`]. The account repository is consulted only to
//! confirm that the target account exists and has the matching kind; profile
//! writes and reads go to the [`ProfileRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{AccountRepository, ProfilePageRequest, ProfileRepository, ProfileStore};
use crate::domain::{
    Account, AccountId, AccountKind, CandidateProfile, CandidateProfileDraft, CompanyProfile,
    CompanyProfileDraft, Error, ListFilter, Profile, ProfileValidationError,
};

/// Number of profiles fetched per store round trip when listing.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Profile service implementing the [`ProfileStore`] driving port.
#[derive(Clone)]
pub struct ProfileService<A, P> {
    accounts: Arc<A>,
    profiles: Arc<P>,
    page_size: usize,
}

impl<A, P> ProfileService<A, P> {
    pub fn new(accounts: Arc<A>, profiles: Arc<P>) -> Self {
        Self {
            accounts,
            profiles,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the listing page size. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn invalid_profile(err: ProfileValidationError) -> Error {
    Error::invalid_profile(err.to_string()).with_details(json!({
        "field": err.field().as_str(),
        "code": err.code(),
    }))
}

impl<A, P> ProfileService<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    async fn require_account(&self, id: AccountId, expected: AccountKind) -> Result<Account, Error> {
        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::account_not_found(format!("account {id} not found")))?;
        if account.kind() != expected {
            debug!(account_id = %id, actual = %account.kind(), %expected, "profile kind mismatch");
            return Err(
                Error::account_not_found(format!("account {id} is not a {expected} account"))
                    .with_details(json!({ "expectedKind": expected.as_str() })),
            );
        }
        Ok(account)
    }
}

#[async_trait]
impl<A, P> ProfileStore for ProfileService<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    async fn upsert_candidate_profile(
        &self,
        account_id: AccountId,
        draft: CandidateProfileDraft,
    ) -> Result<CandidateProfile, Error> {
        self.require_account(account_id, AccountKind::Candidate)
            .await?;
        let data = draft.validate().map_err(invalid_profile)?;
        let profile = self.profiles.upsert_candidate(account_id, &data).await?;
        info!(%account_id, kind = %AccountKind::Candidate, "profile saved");
        Ok(profile)
    }

    async fn upsert_company_profile(
        &self,
        account_id: AccountId,
        draft: CompanyProfileDraft,
    ) -> Result<CompanyProfile, Error> {
        self.require_account(account_id, AccountKind::Company)
            .await?;
        let data = draft.validate().map_err(invalid_profile)?;
        let profile = self.profiles.upsert_company(account_id, &data).await?;
        info!(%account_id, kind = %AccountKind::Company, "profile saved");
        Ok(profile)
    }

    async fn get_profile(&self, account_id: AccountId) -> Result<Profile, Error> {
        let not_found = || Error::not_found(format!("no profile for account {account_id}"));
        let Some(account) = self.accounts.find_by_id(account_id).await? else {
            return Err(not_found());
        };
        self.profiles
            .find_by_account(account_id, account.kind())
            .await?
            .ok_or_else(not_found)
    }

    fn list_profiles(
        &self,
        kind: AccountKind,
        filter: ListFilter,
    ) -> BoxStream<'_, Result<Profile, Error>> {
        let limit = self.page_size;
        let profiles = Arc::clone(&self.profiles);

        // `None` once a short page shows the listing is exhausted.
        let start: Option<Option<AccountId>> = Some(None);
        stream::try_unfold(start, move |cursor| {
            let profiles = Arc::clone(&profiles);
            async move {
                let Some(after) = cursor else {
                    return Ok(None);
                };
                let request = ProfilePageRequest {
                    kind,
                    filter,
                    after,
                    limit,
                };
                let page = profiles.list_page(request).await.map_err(Error::from)?;
                debug!(%kind, rows = page.len(), after = ?after.map(AccountId::get), "profile page fetched");
                let next = if page.len() < limit {
                    None
                } else {
                    page.last().map(|profile| Some(profile.account_id()))
                };
                Ok::<_, Error>(Some((page, next)))
            }
        })
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<Profile, Error>)))
        .try_flatten()
        .boxed()
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
