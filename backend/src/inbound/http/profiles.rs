//! Profile API handlers.
//!
//! ```text
//! PUT /api/v1/profile/candidate {"displayName":"Alice","sectors":["Tech"]}
//! PUT /api/v1/profile/company {"companyName":"Acme","employeeCount":12}
//! GET /api/v1/profile
//! GET /api/v1/profiles/{accountId}
//! GET /api/v1/candidates
//! GET /api/v1/companies
//! ```
//!
//! Every profile body carries a `kind` discriminator so clients can tell
//! candidate and company shapes apart.

use actix_web::{get, put, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountKind, CandidateProfile, CandidateProfileDraft, CompanyProfile, CompanyProfileDraft,
    ListFilter, Profile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_account_id;

/// Candidate profile body for `PUT /api/v1/profile/candidate`.
///
/// Omitted fields are stored empty; the write replaces the whole profile.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateProfileRequest {
    #[schema(example = "Alice")]
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub years_experience: Option<u32>,
    pub salary_range: Option<String>,
    pub native_language: Option<String>,
    pub other_languages: Vec<String>,
    pub job_titles: Vec<String>,
    pub education_level: Option<String>,
    pub education_areas: Vec<String>,
    #[serde(alias = "sector")]
    #[schema(example = json!(["Tech"]))]
    pub sectors: Vec<String>,
    pub tools: Vec<String>,
    pub birth_day: Option<u32>,
    pub birth_month: Option<u32>,
    pub birth_year: Option<u32>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub remote_work: Option<String>,
    pub relocation: Option<String>,
    /// Reference to an uploaded CV.
    pub cv: Option<String>,
}

impl From<CandidateProfileRequest> for CandidateProfileDraft {
    fn from(value: CandidateProfileRequest) -> Self {
        Self {
            display_name: value.display_name,
            first_name: value.first_name,
            last_name: value.last_name,
            job_title: value.job_title,
            years_experience: value.years_experience,
            salary_range: value.salary_range,
            native_language: value.native_language,
            other_languages: value.other_languages,
            job_titles: value.job_titles,
            education_level: value.education_level,
            education_areas: value.education_areas,
            sectors: value.sectors,
            tools: value.tools,
            birth_day: value.birth_day,
            birth_month: value.birth_month,
            birth_year: value.birth_year,
            avatar: value.avatar,
            location: value.location,
            phone: value.phone,
            summary: value.summary,
            availability: value.availability,
            remote_work: value.remote_work,
            relocation: value.relocation,
            cv: value.cv,
        }
    }
}

/// Company profile body for `PUT /api/v1/profile/company`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfileRequest {
    #[schema(example = "Acme")]
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub employee_count: Option<u32>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub vat_number: Option<String>,
    pub description: Option<String>,
}

impl From<CompanyProfileRequest> for CompanyProfileDraft {
    fn from(value: CompanyProfileRequest) -> Self {
        Self {
            company_name: value.company_name,
            sector: value.sector,
            employee_count: value.employee_count,
            headquarters: value.headquarters,
            logo: value.logo,
            vat_number: value.vat_number,
            description: value.description,
        }
    }
}

/// Stored candidate profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfileBody {
    pub account_id: i64,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub years_experience: Option<u32>,
    pub salary_range: Option<String>,
    pub native_language: Option<String>,
    pub other_languages: Vec<String>,
    pub job_titles: Vec<String>,
    pub education_level: Option<String>,
    pub education_areas: Vec<String>,
    pub sectors: Vec<String>,
    pub tools: Vec<String>,
    pub birth_day: Option<u8>,
    pub birth_month: Option<u8>,
    pub birth_year: Option<u16>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub remote_work: Option<String>,
    pub relocation: Option<String>,
    pub cv: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CandidateProfile> for CandidateProfileBody {
    fn from(profile: CandidateProfile) -> Self {
        let CandidateProfile {
            account_id,
            data,
            updated_at,
        } = profile;
        Self {
            account_id: account_id.get(),
            display_name: data.display_name,
            first_name: data.first_name,
            last_name: data.last_name,
            job_title: data.job_title,
            years_experience: data.years_experience,
            salary_range: data.salary_range,
            native_language: data.native_language,
            other_languages: data.other_languages.into_inner(),
            job_titles: data.job_titles.into_inner(),
            education_level: data.education_level,
            education_areas: data.education_areas.into_inner(),
            sectors: data.sectors.into_inner(),
            tools: data.tools.into_inner(),
            birth_day: data.birth_day,
            birth_month: data.birth_month,
            birth_year: data.birth_year,
            avatar: data.avatar,
            location: data.location,
            phone: data.phone,
            summary: data.summary,
            availability: data.availability,
            remote_work: data.remote_work,
            relocation: data.relocation,
            cv: data.cv,
            updated_at,
        }
    }
}

/// Stored company profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileBody {
    pub account_id: i64,
    pub company_name: String,
    pub sector: Option<String>,
    pub employee_count: Option<u32>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub vat_number: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CompanyProfile> for CompanyProfileBody {
    fn from(profile: CompanyProfile) -> Self {
        let CompanyProfile {
            account_id,
            data,
            updated_at,
        } = profile;
        Self {
            account_id: account_id.get(),
            company_name: data.company_name,
            sector: data.sector,
            employee_count: data.employee_count,
            headquarters: data.headquarters,
            logo: data.logo,
            vat_number: data.vat_number,
            description: data.description,
            updated_at,
        }
    }
}

/// A profile of either kind, tagged with `kind`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileResponse {
    Candidate(CandidateProfileBody),
    Company(CompanyProfileBody),
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Candidate(profile) => Self::Candidate(profile.into()),
            Profile::Company(profile) => Self::Company(profile.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountPath {
    account_id: i64,
}

/// Create or replace the signed-in candidate's profile.
#[utoipa::path(
    put,
    path = "/api/v1/profile/candidate",
    request_body = CandidateProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account missing or not a candidate", body = ErrorSchema),
        (status = 422, description = "Invalid profile field", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertCandidateProfile"
)]
#[put("/profile/candidate")]
pub async fn upsert_candidate_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CandidateProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = session.require_account_id()?;
    let profile = state
        .profiles
        .upsert_candidate_profile(account_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ProfileResponse::Candidate(profile.into())))
}

/// Create or replace the signed-in company's profile.
#[utoipa::path(
    put,
    path = "/api/v1/profile/company",
    request_body = CompanyProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account missing or not a company", body = ErrorSchema),
        (status = 422, description = "Invalid profile field", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertCompanyProfile"
)]
#[put("/profile/company")]
pub async fn upsert_company_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CompanyProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = session.require_account_id()?;
    let profile = state
        .profiles
        .upsert_company_profile(account_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(ProfileResponse::Company(profile.into())))
}

/// Return the signed-in account's profile.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Own profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "No profile yet", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "ownProfile"
)]
#[get("/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = session.require_account_id()?;
    let profile = state.profiles.get_profile(account_id).await?;
    Ok(web::Json(profile.into()))
}

/// Return the profile attached to an account, complete or not.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{accountId}",
    params(("accountId" = i64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Invalid account id", body = ErrorSchema),
        (status = 404, description = "No such profile", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile",
    security([])
)]
#[get("/profiles/{account_id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<AccountPath>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let account_id = parse_account_id(path.into_inner().account_id)?;
    let profile = state.profiles.get_profile(account_id).await?;
    Ok(web::Json(profile.into()))
}

async fn collect_complete(
    state: &HttpState,
    kind: AccountKind,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    let profiles: Vec<ProfileResponse> = state
        .profiles
        .list_profiles(kind, ListFilter::Complete)
        .map_ok(ProfileResponse::from)
        .try_collect()
        .await?;
    Ok(web::Json(profiles))
}

/// List candidate profiles with a display name, ordered by account id.
#[utoipa::path(
    get,
    path = "/api/v1/candidates",
    responses(
        (status = 200, description = "Candidate profiles", body = [ProfileResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listCandidates",
    security([])
)]
#[get("/candidates")]
pub async fn list_candidates(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    collect_complete(&state, AccountKind::Candidate).await
}

/// List company profiles with a company name, ordered by account id.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "Company profiles", body = [ProfileResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listCompanies",
    security([])
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    collect_complete(&state, AccountKind::Company).await
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
