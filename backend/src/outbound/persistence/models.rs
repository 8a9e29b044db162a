//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{accounts, candidate_profiles, company_profiles};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i64,
    pub email: String,
    pub credential: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub email: &'a str,
    pub credential: &'a str,
    pub kind: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = candidate_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CandidateProfileRow {
    pub account_id: i64,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub years_experience: Option<i32>,
    pub salary_range: Option<String>,
    pub native_language: Option<String>,
    pub other_languages: Vec<String>,
    pub job_titles: Vec<String>,
    pub education_level: Option<String>,
    pub education_areas: Vec<String>,
    pub sectors: Vec<String>,
    pub tools: Vec<String>,
    pub birth_day: Option<i16>,
    pub birth_month: Option<i16>,
    pub birth_year: Option<i16>,
    pub avatar: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    pub availability: Option<String>,
    pub remote_work: Option<String>,
    pub relocation: Option<String>,
    pub cv: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Full candidate row used both as the insert and as the conflict update,
/// so a second write replaces every column including cleared ones.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = candidate_profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CandidateProfileWrite<'a> {
    pub account_id: i64,
    pub display_name: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub job_title: Option<&'a str>,
    pub years_experience: Option<i32>,
    pub salary_range: Option<&'a str>,
    pub native_language: Option<&'a str>,
    pub other_languages: &'a [String],
    pub job_titles: &'a [String],
    pub education_level: Option<&'a str>,
    pub education_areas: &'a [String],
    pub sectors: &'a [String],
    pub tools: &'a [String],
    pub birth_day: Option<i16>,
    pub birth_month: Option<i16>,
    pub birth_year: Option<i16>,
    pub avatar: Option<&'a str>,
    pub location: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub availability: Option<&'a str>,
    pub remote_work: Option<&'a str>,
    pub relocation: Option<&'a str>,
    pub cv: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = company_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyProfileRow {
    pub account_id: i64,
    pub company_name: String,
    pub sector: Option<String>,
    pub employee_count: Option<i64>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub vat_number: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = company_profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CompanyProfileWrite<'a> {
    pub account_id: i64,
    pub company_name: &'a str,
    pub sector: Option<&'a str>,
    pub employee_count: Option<i64>,
    pub headquarters: Option<&'a str>,
    pub logo: Option<&'a str>,
    pub vat_number: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
