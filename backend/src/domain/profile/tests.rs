//! Draft validation behaviour for both profile kinds.

use super::*;
use rstest::{fixture, rstest};

const THIS_YEAR: i32 = 2026;

#[fixture]
fn candidate_draft() -> CandidateProfileDraft {
    CandidateProfileDraft {
        display_name: Some("Alice".into()),
        ..CandidateProfileDraft::default()
    }
}

#[fixture]
fn company_draft() -> CompanyProfileDraft {
    CompanyProfileDraft {
        company_name: Some("Acme".into()),
        ..CompanyProfileDraft::default()
    }
}

#[rstest]
fn minimal_candidate_leaves_other_fields_empty(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        sectors: vec!["Tech".into()],
        ..candidate_draft
    };
    let data = draft.validate_as_of(THIS_YEAR).expect("valid draft");

    assert_eq!(data.display_name, "Alice");
    assert_eq!(data.sectors.as_slice(), ["Tech"]);
    assert!(data.first_name.is_none());
    assert!(data.years_experience.is_none());
    assert!(data.tools.is_empty());
    assert!(data.is_complete());
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
#[case(Some("   ".to_owned()))]
fn candidate_requires_display_name(#[case] display_name: Option<String>) {
    let draft = CandidateProfileDraft {
        display_name,
        ..CandidateProfileDraft::default()
    };
    let err = draft.validate_as_of(THIS_YEAR).expect_err("missing name");
    assert_eq!(
        err,
        ProfileValidationError::Required {
            field: ProfileField::DisplayName
        }
    );
}

#[rstest]
fn candidate_trims_and_blanks_optional_text(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        display_name: Some("  Alice  ".into()),
        first_name: Some("  Alice ".into()),
        last_name: Some("   ".into()),
        ..candidate_draft
    };
    let data = draft.validate_as_of(THIS_YEAR).expect("valid draft");
    assert_eq!(data.display_name, "Alice");
    assert_eq!(data.first_name.as_deref(), Some("Alice"));
    assert!(data.last_name.is_none());
}

#[rstest]
fn candidate_work_preferences_and_cv_are_optional_text(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        remote_work: Some(" hybrid ".into()),
        relocation: Some("  ".into()),
        cv: Some("cv/alice.pdf".into()),
        ..candidate_draft
    };
    let data = draft.validate_as_of(THIS_YEAR).expect("valid draft");
    assert_eq!(data.remote_work.as_deref(), Some("hybrid"));
    assert!(data.relocation.is_none());
    assert_eq!(data.cv.as_deref(), Some("cv/alice.pdf"));
}

#[rstest]
fn overlong_cv_reference_names_the_field(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        cv: Some("x".repeat(TEXT_MAX_LEN + 1)),
        ..candidate_draft
    };
    let err = draft.validate_as_of(THIS_YEAR).expect_err("too long");
    assert_eq!(err.field(), ProfileField::Cv);
}

#[rstest]
fn birth_date_parts_narrow_to_storage_width(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        birth_day: Some(29),
        birth_month: Some(2),
        birth_year: Some(2000),
        ..candidate_draft
    };
    let data = draft.validate_as_of(THIS_YEAR).expect("leap day");
    assert_eq!(
        (data.birth_day, data.birth_month, data.birth_year),
        (Some(29_u8), Some(2_u8), Some(2000_u16))
    );
}

#[rstest]
fn candidate_summary_allows_long_text(candidate_draft: CandidateProfileDraft) {
    let long = "x".repeat(TEXT_MAX_LEN + 1);
    let ok = CandidateProfileDraft {
        summary: Some(long.clone()),
        ..candidate_draft.clone()
    };
    assert!(ok.validate_as_of(THIS_YEAR).is_ok());

    let too_long = CandidateProfileDraft {
        job_title: Some(long),
        ..candidate_draft
    };
    let err = too_long.validate_as_of(THIS_YEAR).expect_err("job title too long");
    assert_eq!(err.field(), ProfileField::JobTitle);
    assert_eq!(err.code(), "too_long");
}

#[rstest]
#[case(Some(81), None, None, None, ProfileField::YearsExperience)]
#[case(None, Some(0), None, None, ProfileField::BirthDay)]
#[case(None, Some(32), None, None, ProfileField::BirthDay)]
#[case(None, None, Some(13), None, ProfileField::BirthMonth)]
#[case(None, None, None, Some(1899), ProfileField::BirthYear)]
#[case(None, None, None, Some(2027), ProfileField::BirthYear)]
fn candidate_numeric_ranges(
    candidate_draft: CandidateProfileDraft,
    #[case] years: Option<u32>,
    #[case] day: Option<u32>,
    #[case] month: Option<u32>,
    #[case] year: Option<u32>,
    #[case] field: ProfileField,
) {
    let draft = CandidateProfileDraft {
        years_experience: years,
        birth_day: day,
        birth_month: month,
        birth_year: year,
        ..candidate_draft
    };
    let err = draft.validate_as_of(THIS_YEAR).expect_err("out of range");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), "out_of_range");
}

#[rstest]
#[case(29, 2, 2023, false)]
#[case(29, 2, 2024, true)]
#[case(31, 4, 1990, false)]
#[case(15, 6, 1990, true)]
fn candidate_birth_date_must_exist(
    candidate_draft: CandidateProfileDraft,
    #[case] day: u32,
    #[case] month: u32,
    #[case] year: u32,
    #[case] valid: bool,
) {
    let draft = CandidateProfileDraft {
        birth_day: Some(day),
        birth_month: Some(month),
        birth_year: Some(year),
        ..candidate_draft
    };
    let result = draft.validate_as_of(THIS_YEAR);
    if valid {
        let data = result.expect("real date");
        assert_eq!(data.birth_day, Some(day as u8));
        assert_eq!(data.birth_year, Some(year as u16));
    } else {
        assert_eq!(result.expect_err("impossible date"), ProfileValidationError::InvalidDate);
    }
}

#[rstest]
fn partial_birth_date_is_accepted(candidate_draft: CandidateProfileDraft) {
    let draft = CandidateProfileDraft {
        birth_day: Some(31),
        birth_month: Some(2),
        ..candidate_draft
    };
    let data = draft.validate_as_of(THIS_YEAR).expect("partial date");
    assert_eq!(data.birth_month, Some(2));
    assert!(data.birth_year.is_none());
}

#[rstest]
fn company_requires_name() {
    let err = CompanyProfileDraft::default()
        .validate()
        .expect_err("missing company name");
    assert_eq!(err.field(), ProfileField::CompanyName);
    assert_eq!(err.to_string(), "companyName must not be empty");
}

#[rstest]
fn company_normalises_fields(company_draft: CompanyProfileDraft) {
    let draft = CompanyProfileDraft {
        company_name: Some(" Acme ".into()),
        sector: Some(" Retail ".into()),
        employee_count: Some(0),
        logo: Some("".into()),
        ..company_draft
    };
    let data = draft.validate().expect("valid company");
    assert_eq!(data.company_name, "Acme");
    assert_eq!(data.sector.as_deref(), Some("Retail"));
    assert_eq!(data.employee_count, Some(0));
    assert!(data.logo.is_none());
}

#[rstest]
fn list_filter_defaults_to_complete() {
    assert_eq!(ListFilter::default(), ListFilter::Complete);
}
