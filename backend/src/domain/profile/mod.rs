//! Role-specific profiles attached to accounts.
//!
//! Inbound adapters build a `*Draft` from untrusted input; `validate` turns it
//! into the normalised `*Data` that repositories persist. Stored profiles pair
//! that data with the owning account and the last write time.

mod candidate;
mod company;
mod tags;

use std::fmt;

use chrono::{DateTime, Utc};

use super::{AccountId, AccountKind};

pub use candidate::{CandidateProfile, CandidateProfileData, CandidateProfileDraft};
pub use company::{CompanyProfile, CompanyProfileData, CompanyProfileDraft};
pub use tags::{TAG_MAX_LEN, TAG_SET_MAX, TagSet};

/// Default maximum length of an optional text field.
pub const TEXT_MAX_LEN: usize = 255;
/// Maximum length of long-form text such as summaries.
pub const LONG_TEXT_MAX_LEN: usize = 4000;

/// Profile attribute named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    DisplayName,
    FirstName,
    LastName,
    JobTitle,
    YearsExperience,
    SalaryRange,
    NativeLanguage,
    OtherLanguages,
    JobTitles,
    EducationLevel,
    EducationAreas,
    Sectors,
    Tools,
    BirthDay,
    BirthMonth,
    BirthYear,
    BirthDate,
    Avatar,
    Location,
    Phone,
    Summary,
    Availability,
    RemoteWork,
    Relocation,
    Cv,
    CompanyName,
    Sector,
    EmployeeCount,
    Headquarters,
    Logo,
    VatNumber,
    Description,
}

impl ProfileField {
    /// Field name as it appears in JSON payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DisplayName => "displayName",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::JobTitle => "jobTitle",
            Self::YearsExperience => "yearsExperience",
            Self::SalaryRange => "salaryRange",
            Self::NativeLanguage => "nativeLanguage",
            Self::OtherLanguages => "otherLanguages",
            Self::JobTitles => "jobTitles",
            Self::EducationLevel => "educationLevel",
            Self::EducationAreas => "educationAreas",
            Self::Sectors => "sectors",
            Self::Tools => "tools",
            Self::BirthDay => "birthDay",
            Self::BirthMonth => "birthMonth",
            Self::BirthYear => "birthYear",
            Self::BirthDate => "birthDate",
            Self::Avatar => "avatar",
            Self::Location => "location",
            Self::Phone => "phone",
            Self::Summary => "summary",
            Self::Availability => "availability",
            Self::RemoteWork => "remoteWork",
            Self::Relocation => "relocation",
            Self::Cv => "cv",
            Self::CompanyName => "companyName",
            Self::Sector => "sector",
            Self::EmployeeCount => "employeeCount",
            Self::Headquarters => "headquarters",
            Self::Logo => "logo",
            Self::VatNumber => "vatNumber",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for profile drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    Required { field: ProfileField },
    TooLong { field: ProfileField, max: usize },
    TagTooLong { field: ProfileField, max: usize },
    TooManyTags { field: ProfileField, max: usize },
    OutOfRange { field: ProfileField, min: i64, max: i64 },
    InvalidDate,
}

impl ProfileValidationError {
    /// Field the failure refers to.
    pub fn field(&self) -> ProfileField {
        match self {
            Self::Required { field }
            | Self::TooLong { field, .. }
            | Self::TagTooLong { field, .. }
            | Self::TooManyTags { field, .. }
            | Self::OutOfRange { field, .. } => *field,
            Self::InvalidDate => ProfileField::BirthDate,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required { .. } => "required",
            Self::TooLong { .. } => "too_long",
            Self::TagTooLong { .. } => "tag_too_long",
            Self::TooManyTags { .. } => "too_many_tags",
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidDate => "invalid_date",
        }
    }
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            Self::TagTooLong { field, max } => {
                write!(f, "each {field} entry must be at most {max} characters")
            }
            Self::TooManyTags { field, max } => {
                write!(f, "{field} must contain at most {max} entries")
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{field} must be between {min} and {max}")
            }
            Self::InvalidDate => write!(f, "birth date is not a valid calendar date"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Trim `raw`; blank input becomes `None`.
pub(crate) fn optional_text(
    field: ProfileField,
    raw: Option<String>,
    max: usize,
) -> Result<Option<String>, ProfileValidationError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ProfileValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_owned()))
}

pub(crate) fn required_text(
    field: ProfileField,
    raw: Option<String>,
    max: usize,
) -> Result<String, ProfileValidationError> {
    optional_text(field, raw, max)?.ok_or(ProfileValidationError::Required { field })
}

pub(crate) fn bounded<T>(
    field: ProfileField,
    value: Option<T>,
    min: T,
    max: T,
) -> Result<Option<T>, ProfileValidationError>
where
    T: PartialOrd + Copy + Into<i64>,
{
    match value {
        Some(v) if v < min || v > max => Err(ProfileValidationError::OutOfRange {
            field,
            min: min.into(),
            max: max.into(),
        }),
        other => Ok(other),
    }
}

/// A stored profile of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    Candidate(CandidateProfile),
    Company(CompanyProfile),
}

impl Profile {
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::Candidate(profile) => profile.account_id,
            Self::Company(profile) => profile.account_id,
        }
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Self::Candidate(_) => AccountKind::Candidate,
            Self::Company(_) => AccountKind::Company,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::Candidate(profile) => profile.updated_at,
            Self::Company(profile) => profile.updated_at,
        }
    }
}

/// Which rows a directory listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Only profiles with a non-empty display or company name.
    #[default]
    Complete,
    /// Every stored profile.
    All,
}

#[cfg(test)]
mod tests;
