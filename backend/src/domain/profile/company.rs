//! Company profile model and validation.

use chrono::{DateTime, Utc};

use super::{
    LONG_TEXT_MAX_LEN, ProfileField, ProfileValidationError, TEXT_MAX_LEN, optional_text,
    required_text,
};
use crate::domain::AccountId;

/// Unvalidated company profile input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyProfileDraft {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    pub employee_count: Option<u32>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub vat_number: Option<String>,
    pub description: Option<String>,
}

/// Normalised company attributes ready for persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct CompanyProfileData {
    pub company_name: String,
    pub sector: Option<String>,
    pub employee_count: Option<u32>,
    pub headquarters: Option<String>,
    pub logo: Option<String>,
    pub vat_number: Option<String>,
    pub description: Option<String>,
}

impl CompanyProfileData {
    /// Whether the profile is listed in the public directory.
    pub fn is_complete(&self) -> bool {
        !self.company_name.trim().is_empty()
    }
}

impl CompanyProfileDraft {
    pub fn validate(self) -> Result<CompanyProfileData, ProfileValidationError> {
        use ProfileField as F;

        Ok(CompanyProfileData {
            company_name: required_text(F::CompanyName, self.company_name, TEXT_MAX_LEN)?,
            sector: optional_text(F::Sector, self.sector, TEXT_MAX_LEN)?,
            employee_count: self.employee_count,
            headquarters: optional_text(F::Headquarters, self.headquarters, TEXT_MAX_LEN)?,
            logo: optional_text(F::Logo, self.logo, TEXT_MAX_LEN)?,
            vat_number: optional_text(F::VatNumber, self.vat_number, TEXT_MAX_LEN)?,
            description: optional_text(F::Description, self.description, LONG_TEXT_MAX_LEN)?,
        })
    }
}

/// Company profile as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    pub account_id: AccountId,
    pub data: CompanyProfileData,
    pub updated_at: DateTime<Utc>,
}
