//! Candidate profile model and validation.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::{
    LONG_TEXT_MAX_LEN, ProfileField, ProfileValidationError, TEXT_MAX_LEN, TagSet, bounded,
    optional_text, required_text,
};
use crate::domain::AccountId;

/// Upper bound for declared years of experience.
pub const YEARS_EXPERIENCE_MAX: u32 = 80;
/// Earliest accepted birth year.
pub const BIRTH_YEAR_MIN: u32 = 1900;

/// Unvalidated candidate profile input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateProfileDraft {
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
    pub cv: Option<String>,
}

/// Normalised candidate attributes ready for persistence.
///
/// ## Invariants
/// - `display_name` is trimmed and non-empty when produced by
///   [`CandidateProfileDraft::validate`]. Rows loaded from storage may carry
///   an empty name.
/// - Optional strings are trimmed and never blank.
/// - `birth_day`, `birth_month` and `birth_year` form a real date when all
///   three are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct CandidateProfileData {
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub years_experience: Option<u32>,
    pub salary_range: Option<String>,
    pub native_language: Option<String>,
    pub other_languages: TagSet,
    pub job_titles: TagSet,
    pub education_level: Option<String>,
    pub education_areas: TagSet,
    pub sectors: TagSet,
    pub tools: TagSet,
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
    /// Reference to an uploaded CV, stored like `avatar`.
    pub cv: Option<String>,
}

impl CandidateProfileData {
    /// Whether the profile is listed in the public directory.
    pub fn is_complete(&self) -> bool {
        !self.display_name.trim().is_empty()
    }
}

impl CandidateProfileDraft {
    /// Validate against the current calendar year.
    pub fn validate(self) -> Result<CandidateProfileData, ProfileValidationError> {
        self.validate_as_of(Utc::now().year())
    }

    pub(crate) fn validate_as_of(
        self,
        current_year: i32,
    ) -> Result<CandidateProfileData, ProfileValidationError> {
        use ProfileField as F;

        let max_year = u32::try_from(current_year).unwrap_or(BIRTH_YEAR_MIN);
        let birth_day = bounded(F::BirthDay, self.birth_day, 1, 31)?;
        let birth_month = bounded(F::BirthMonth, self.birth_month, 1, 12)?;
        let birth_year = bounded(F::BirthYear, self.birth_year, BIRTH_YEAR_MIN, max_year)?;
        if let (Some(day), Some(month), Some(year)) = (birth_day, birth_month, birth_year) {
            let year = i32::try_from(year).map_err(|_| ProfileValidationError::InvalidDate)?;
            NaiveDate::from_ymd_opt(year, month, day).ok_or(ProfileValidationError::InvalidDate)?;
        }

        Ok(CandidateProfileData {
            display_name: required_text(F::DisplayName, self.display_name, TEXT_MAX_LEN)?,
            first_name: optional_text(F::FirstName, self.first_name, TEXT_MAX_LEN)?,
            last_name: optional_text(F::LastName, self.last_name, TEXT_MAX_LEN)?,
            job_title: optional_text(F::JobTitle, self.job_title, TEXT_MAX_LEN)?,
            years_experience: bounded(
                F::YearsExperience,
                self.years_experience,
                0,
                YEARS_EXPERIENCE_MAX,
            )?,
            salary_range: optional_text(F::SalaryRange, self.salary_range, TEXT_MAX_LEN)?,
            native_language: optional_text(F::NativeLanguage, self.native_language, TEXT_MAX_LEN)?,
            other_languages: TagSet::from_raw(F::OtherLanguages, self.other_languages)?,
            job_titles: TagSet::from_raw(F::JobTitles, self.job_titles)?,
            education_level: optional_text(F::EducationLevel, self.education_level, TEXT_MAX_LEN)?,
            education_areas: TagSet::from_raw(F::EducationAreas, self.education_areas)?,
            sectors: TagSet::from_raw(F::Sectors, self.sectors)?,
            tools: TagSet::from_raw(F::Tools, self.tools)?,
            birth_day: narrow_date_part(birth_day)?,
            birth_month: narrow_date_part(birth_month)?,
            birth_year: narrow_date_part(birth_year)?,
            avatar: optional_text(F::Avatar, self.avatar, TEXT_MAX_LEN)?,
            location: optional_text(F::Location, self.location, TEXT_MAX_LEN)?,
            phone: optional_text(F::Phone, self.phone, TEXT_MAX_LEN)?,
            summary: optional_text(F::Summary, self.summary, LONG_TEXT_MAX_LEN)?,
            availability: optional_text(F::Availability, self.availability, TEXT_MAX_LEN)?,
            remote_work: optional_text(F::RemoteWork, self.remote_work, TEXT_MAX_LEN)?,
            relocation: optional_text(F::Relocation, self.relocation, TEXT_MAX_LEN)?,
            cv: optional_text(F::Cv, self.cv, TEXT_MAX_LEN)?,
        })
    }
}

fn narrow_date_part<T: TryFrom<u32>>(
    value: Option<u32>,
) -> Result<Option<T>, ProfileValidationError> {
    value
        .map(T::try_from)
        .transpose()
        .map_err(|_| ProfileValidationError::InvalidDate)
}

/// Candidate profile as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub account_id: AccountId,
    pub data: CandidateProfileData,
    pub updated_at: DateTime<Utc>,
}
