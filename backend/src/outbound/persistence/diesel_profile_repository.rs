//! PostgreSQL-backed [`ProfileRepository`].
//!
//! Upserts are a single `INSERT ... ON CONFLICT (account_id) DO UPDATE`, so
//! concurrent writers for one account can never produce two rows. Listing is
//! keyset paginated on `account_id`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ProfilePageRequest, ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    AccountId, AccountKind, CandidateProfile, CandidateProfileData, CompanyProfile,
    CompanyProfileData, ListFilter, Profile, TagSet,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{
    CandidateProfileRow, CandidateProfileWrite, CompanyProfileRow, CompanyProfileWrite,
};
use super::pool::{DbPool, PoolError};
use super::schema::{candidate_profiles, company_profiles};

/// Diesel implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    ProfileRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection => {
            ProfileRepositoryError::connection("database unavailable or write conflict unresolved")
        }
        DieselFailure::UniqueViolation { .. } => {
            ProfileRepositoryError::query("unexpected unique violation")
        }
        DieselFailure::Query(message) => ProfileRepositoryError::query(message),
    }
}

fn corrupt(account_id: i64, column: &'static str) -> ProfileRepositoryError {
    warn!(account_id, column, "corrupt profile row");
    ProfileRepositoryError::query(format!("corrupt profile row: {column}"))
}

fn narrow<T, U>(account_id: i64, column: &'static str, value: Option<T>) -> Result<Option<U>, ProfileRepositoryError>
where
    U: TryFrom<T>,
{
    value
        .map(U::try_from)
        .transpose()
        .map_err(|_| corrupt(account_id, column))
}

fn widen<T, U>(value: Option<T>) -> Option<U>
where
    U: From<T>,
{
    value.map(U::from)
}

fn candidate_write(account_id: AccountId, data: &CandidateProfileData) -> CandidateProfileWrite<'_> {
    CandidateProfileWrite {
        account_id: account_id.get(),
        display_name: &data.display_name,
        first_name: data.first_name.as_deref(),
        last_name: data.last_name.as_deref(),
        job_title: data.job_title.as_deref(),
        // Validation caps years of experience well below i32::MAX.
        years_experience: data.years_experience.and_then(|y| i32::try_from(y).ok()),
        salary_range: data.salary_range.as_deref(),
        native_language: data.native_language.as_deref(),
        other_languages: data.other_languages.as_slice(),
        job_titles: data.job_titles.as_slice(),
        education_level: data.education_level.as_deref(),
        education_areas: data.education_areas.as_slice(),
        sectors: data.sectors.as_slice(),
        tools: data.tools.as_slice(),
        birth_day: widen(data.birth_day),
        birth_month: widen(data.birth_month),
        birth_year: data.birth_year.and_then(|y| i16::try_from(y).ok()),
        avatar: data.avatar.as_deref(),
        location: data.location.as_deref(),
        phone: data.phone.as_deref(),
        summary: data.summary.as_deref(),
        availability: data.availability.as_deref(),
        remote_work: data.remote_work.as_deref(),
        relocation: data.relocation.as_deref(),
        cv: data.cv.as_deref(),
        updated_at: Utc::now(),
    }
}

fn company_write(account_id: AccountId, data: &CompanyProfileData) -> CompanyProfileWrite<'_> {
    CompanyProfileWrite {
        account_id: account_id.get(),
        company_name: &data.company_name,
        sector: data.sector.as_deref(),
        employee_count: widen(data.employee_count),
        headquarters: data.headquarters.as_deref(),
        logo: data.logo.as_deref(),
        vat_number: data.vat_number.as_deref(),
        description: data.description.as_deref(),
        updated_at: Utc::now(),
    }
}

fn row_to_candidate(row: CandidateProfileRow) -> Result<CandidateProfile, ProfileRepositoryError> {
    let id = row.account_id;
    let account_id = AccountId::new(id).map_err(|_| corrupt(id, "account_id"))?;
    let data = CandidateProfileData {
        display_name: row.display_name,
        first_name: row.first_name,
        last_name: row.last_name,
        job_title: row.job_title,
        years_experience: narrow(id, "years_experience", row.years_experience)?,
        salary_range: row.salary_range,
        native_language: row.native_language,
        other_languages: TagSet::from_stored(row.other_languages),
        job_titles: TagSet::from_stored(row.job_titles),
        education_level: row.education_level,
        education_areas: TagSet::from_stored(row.education_areas),
        sectors: TagSet::from_stored(row.sectors),
        tools: TagSet::from_stored(row.tools),
        birth_day: narrow(id, "birth_day", row.birth_day)?,
        birth_month: narrow(id, "birth_month", row.birth_month)?,
        birth_year: narrow(id, "birth_year", row.birth_year)?,
        avatar: row.avatar,
        location: row.location,
        phone: row.phone,
        summary: row.summary,
        availability: row.availability,
        remote_work: row.remote_work,
        relocation: row.relocation,
        cv: row.cv,
    };
    Ok(CandidateProfile {
        account_id,
        data,
        updated_at: row.updated_at,
    })
}

fn row_to_company(row: CompanyProfileRow) -> Result<CompanyProfile, ProfileRepositoryError> {
    let id = row.account_id;
    let account_id = AccountId::new(id).map_err(|_| corrupt(id, "account_id"))?;
    let data = CompanyProfileData {
        company_name: row.company_name,
        sector: row.sector,
        employee_count: narrow(id, "employee_count", row.employee_count)?,
        headquarters: row.headquarters,
        logo: row.logo,
        vat_number: row.vat_number,
        description: row.description,
    };
    Ok(CompanyProfile {
        account_id,
        data,
        updated_at: row.updated_at,
    })
}

fn page_limit(page: &ProfilePageRequest) -> i64 {
    i64::try_from(page.limit).unwrap_or(i64::MAX)
}

impl DieselProfileRepository {
    async fn candidate_page(
        &self,
        page: ProfilePageRequest,
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = candidate_profiles::table
            .select(CandidateProfileRow::as_select())
            .into_boxed();
        if let Some(after) = page.after {
            query = query.filter(candidate_profiles::account_id.gt(after.get()));
        }
        if page.filter == ListFilter::Complete {
            query = query.filter(candidate_profiles::display_name.ne(""));
        }
        let rows: Vec<CandidateProfileRow> = query
            .order(candidate_profiles::account_id.asc())
            .limit(page_limit(&page))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row_to_candidate(row).map(Profile::Candidate))
            .collect()
    }

    async fn company_page(
        &self,
        page: ProfilePageRequest,
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = company_profiles::table
            .select(CompanyProfileRow::as_select())
            .into_boxed();
        if let Some(after) = page.after {
            query = query.filter(company_profiles::account_id.gt(after.get()));
        }
        if page.filter == ListFilter::Complete {
            query = query.filter(company_profiles::company_name.ne(""));
        }
        let rows: Vec<CompanyProfileRow> = query
            .order(company_profiles::account_id.asc())
            .limit(page_limit(&page))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| row_to_company(row).map(Profile::Company))
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn upsert_candidate(
        &self,
        account_id: AccountId,
        data: &CandidateProfileData,
    ) -> Result<CandidateProfile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = candidate_write(account_id, data);
        let row: CandidateProfileRow = diesel::insert_into(candidate_profiles::table)
            .values(&write)
            .on_conflict(candidate_profiles::account_id)
            .do_update()
            .set(&write)
            .returning(CandidateProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_candidate(row)
    }

    async fn upsert_company(
        &self,
        account_id: AccountId,
        data: &CompanyProfileData,
    ) -> Result<CompanyProfile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = company_write(account_id, data);
        let row: CompanyProfileRow = diesel::insert_into(company_profiles::table)
            .values(&write)
            .on_conflict(company_profiles::account_id)
            .do_update()
            .set(&write)
            .returning(CompanyProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_company(row)
    }

    async fn find_by_account(
        &self,
        account_id: AccountId,
        kind: AccountKind,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        match kind {
            AccountKind::Candidate => {
                let row: Option<CandidateProfileRow> = candidate_profiles::table
                    .filter(candidate_profiles::account_id.eq(account_id.get()))
                    .select(CandidateProfileRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|r| row_to_candidate(r).map(Profile::Candidate))
                    .transpose()
            }
            AccountKind::Company => {
                let row: Option<CompanyProfileRow> = company_profiles::table
                    .filter(company_profiles::account_id.eq(account_id.get()))
                    .select(CompanyProfileRow::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                row.map(|r| row_to_company(r).map(Profile::Company))
                    .transpose()
            }
        }
    }

    async fn list_page(
        &self,
        page: ProfilePageRequest,
    ) -> Result<Vec<Profile>, ProfileRepositoryError> {
        match page.kind {
            AccountKind::Candidate => self.candidate_page(page).await,
            AccountKind::Company => self.company_page(page).await,
        }
    }
}
