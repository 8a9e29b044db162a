//! Account data model: identifiers, normalised emails and account kinds.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum accepted length of a normalised email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors raised while building account values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    NonPositiveId,
    EmptyEmail,
    EmailTooLong { max: usize },
    MalformedEmail,
    UnknownKind { value: String },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "account id must be positive"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::MalformedEmail => write!(f, "email is not a valid address"),
            Self::UnknownKind { value } => {
                write!(f, "unknown account kind '{value}', expected candidate or company")
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Surrogate account identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AccountId(i64);

impl AccountId {
    /// Validate a raw identifier; ids start at 1.
    pub fn new(id: i64) -> Result<Self, AccountValidationError> {
        if id <= 0 {
            return Err(AccountValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<AccountId> for i64 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address, trimmed and lower-cased so comparisons are
/// case-insensitive.
///
/// # Examples
/// ```
/// use talfy::domain::Email;
///
/// let email = Email::parse("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(Email::parse("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalise and validate raw user input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(AccountValidationError::MalformedEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Role an account registers under. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Candidate,
    Company,
}

impl AccountKind {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = AccountValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "company" => Ok(Self::Company),
            _ => Err(AccountValidationError::UnknownKind {
                value: s.to_owned(),
            }),
        }
    }
}

/// A registered account. The credential never leaves the identity layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    kind: AccountKind,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: AccountId, email: Email, kind: AccountKind, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            kind,
            created_at,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Number of committed accounts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCounts {
    pub candidates: u64,
    pub companies: u64,
}

impl AccountCounts {
    /// Add `count` rows to the bucket for `kind`.
    pub fn record(&mut self, kind: AccountKind, count: u64) {
        match kind {
            AccountKind::Candidate => self.candidates += count,
            AccountKind::Company => self.companies += count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com", "a@x.com")]
    #[case("  A@X.com  ", "a@x.com")]
    #[case("Ada.Lovelace+jobs@Example.org", "ada.lovelace+jobs@example.org")]
    fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        let email = Email::parse(raw).expect("valid email");
        assert_eq!(email.as_ref(), expected);
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("   ", AccountValidationError::EmptyEmail)]
    #[case("no-at-sign.com", AccountValidationError::MalformedEmail)]
    #[case("a@nodot", AccountValidationError::MalformedEmail)]
    #[case("a b@x.com", AccountValidationError::MalformedEmail)]
    fn email_rejects_bad_input(#[case] raw: &str, #[case] expected: AccountValidationError) {
        assert_eq!(Email::parse(raw), Err(expected));
    }

    #[rstest]
    fn email_rejects_overlong_addresses() {
        let raw = format!("{}@x.com", "a".repeat(EMAIL_MAX));
        assert_eq!(
            Email::parse(raw),
            Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX })
        );
    }

    #[rstest]
    #[case("candidate", AccountKind::Candidate)]
    #[case(" Company ", AccountKind::Company)]
    #[case("CANDIDATE", AccountKind::Candidate)]
    fn kind_parses_case_insensitively(#[case] raw: &str, #[case] expected: AccountKind) {
        assert_eq!(raw.parse::<AccountKind>(), Ok(expected));
    }

    #[rstest]
    fn kind_rejects_unknown_values() {
        let err = "recruiter".parse::<AccountKind>().expect_err("unknown kind");
        assert!(err.to_string().contains("recruiter"));
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn account_id_must_be_positive(#[case] raw: i64) {
        assert_eq!(AccountId::new(raw), Err(AccountValidationError::NonPositiveId));
    }

    #[rstest]
    fn counts_record_per_kind() {
        let mut counts = AccountCounts::default();
        counts.record(AccountKind::Candidate, 3);
        counts.record(AccountKind::Company, 1);
        counts.record(AccountKind::Candidate, 1);
        assert_eq!(
            counts,
            AccountCounts {
                candidates: 4,
                companies: 1
            }
        );
    }
}
