//! Mutex-guarded candidate and company profile tables.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{ProfilePageRequest, ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    AccountId, AccountKind, CandidateProfile, CandidateProfileData, CompanyProfile,
    CompanyProfileData, ListFilter, Profile,
};

#[derive(Default)]
struct ProfileTables {
    candidates: BTreeMap<AccountId, CandidateProfile>,
    companies: BTreeMap<AccountId, CompanyProfile>,
}

/// Profile repository holding rows in memory, keyed by account id.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    tables: Mutex<ProfileTables>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProfileTables>, ProfileRepositoryError> {
        self.tables
            .lock()
            .map_err(|_| ProfileRepositoryError::query("profile tables lock poisoned"))
    }
}

fn page_of<T, F>(
    rows: &BTreeMap<AccountId, T>,
    page: ProfilePageRequest,
    is_complete: impl Fn(&T) -> bool,
    wrap: F,
) -> Vec<Profile>
where
    T: Clone,
    F: Fn(T) -> Profile,
{
    let lower = page.after.map_or(Bound::Unbounded, Bound::Excluded);
    rows.range((lower, Bound::Unbounded))
        .map(|(_, row)| row)
        .filter(|row| page.filter == ListFilter::All || is_complete(row))
        .take(page.limit)
        .cloned()
        .map(wrap)
        .collect()
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert_candidate(
        &self,
        account_id: AccountId,
        data: &CandidateProfileData,
    ) -> Result<CandidateProfile, ProfileRepositoryError> {
        let profile = CandidateProfile {
            account_id,
            data: data.clone(),
            updated_at: Utc::now(),
        };
        self.lock()?.candidates.insert(account_id, profile.clone());
        Ok(profile)
    }

    async fn upsert_company(
        &self,
        account_id: AccountId,
        data: &CompanyProfileData,
    ) -> Result<CompanyProfile, ProfileRepositoryError> {
        let profile = CompanyProfile {
            account_id,
            data: data.clone(),
            updated_at: Utc::now(),
        };
        self.lock()?.companies.insert(account_id, profile.clone());
        Ok(profile)
    }

    async fn find_by_account(
        &self,
        account_id: AccountId,
        kind: AccountKind,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let tables = self.lock()?;
        let found = match kind {
            AccountKind::Candidate => tables
                .candidates
                .get(&account_id)
                .cloned()
                .map(Profile::Candidate),
            AccountKind::Company => tables
                .companies
                .get(&account_id)
                .cloned()
                .map(Profile::Company),
        };
        Ok(found)
    }

    async fn list_page(
        &self,
        page: ProfilePageRequest,
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let tables = self.lock()?;
        let rows = match page.kind {
            AccountKind::Candidate => page_of(
                &tables.candidates,
                page,
                |row| row.data.is_complete(),
                Profile::Candidate,
            ),
            AccountKind::Company => page_of(
                &tables.companies,
                page,
                |row| row.data.is_complete(),
                Profile::Company,
            ),
        };
        Ok(rows)
    }
}
