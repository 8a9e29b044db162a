//! Clear-text secrets and their stored credential form.
//!
//! A [`Secret`] only exists between request parsing and hashing. It is
//! zeroised on drop and never serialised. The persisted form is a
//! [`CredentialHash`], an Argon2id PHC string.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum number of characters in a new secret.
pub const SECRET_MIN_LEN: usize = 8;

/// First password policy rule a candidate secret failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakSecretRule {
    TooShort,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl WeakSecretRule {
    /// Stable code reported in error details.
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooShort => "too_short",
            Self::MissingUppercase => "missing_uppercase",
            Self::MissingDigit => "missing_digit",
            Self::MissingSymbol => "missing_symbol",
        }
    }
}

impl fmt::Display for WeakSecretRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "password must be at least {SECRET_MIN_LEN} characters"),
            Self::MissingUppercase => write!(f, "password must contain an uppercase letter"),
            Self::MissingDigit => write!(f, "password must contain a digit"),
            Self::MissingSymbol => write!(f, "password must contain a symbol"),
        }
    }
}

impl std::error::Error for WeakSecretRule {}

/// Clear-text secret supplied by a user.
///
/// ## Invariants
/// - Secrets built with [`Secret::new`] satisfy the password policy.
/// - Secrets built with [`Secret::for_verification`] are unchecked and only
///   ever compared against a stored hash.
///
/// # Examples
/// ```
/// use talfy::domain::{Secret, WeakSecretRule};
///
/// assert!(Secret::new("Abcdef1!").is_ok());
/// assert_eq!(Secret::new("abcdef1!").err(), Some(WeakSecretRule::MissingUppercase));
/// ```
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Accept a new secret if it satisfies the password policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, WeakSecretRule> {
        let raw = Zeroizing::new(raw.into());
        if raw.chars().count() < SECRET_MIN_LEN {
            return Err(WeakSecretRule::TooShort);
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(WeakSecretRule::MissingUppercase);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(WeakSecretRule::MissingDigit);
        }
        if !raw.chars().any(|c| c.is_ascii_punctuation()) {
            return Err(WeakSecretRule::MissingSymbol);
        }
        Ok(Self(raw))
    }

    /// Wrap a login attempt without applying the policy.
    pub fn for_verification(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Salted one-way hash of a secret in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Wrap a PHC string produced by a hasher or read from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The algorithm prefix is useful in logs, the salt and digest are not.
        let prefix = self.0.split('$').nth(1).unwrap_or("unknown");
        write!(f, "CredentialHash({prefix})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", WeakSecretRule::TooShort)]
    #[case("Ab1!", WeakSecretRule::TooShort)]
    #[case("abcdefg1!", WeakSecretRule::MissingUppercase)]
    #[case("Abcdefgh!", WeakSecretRule::MissingDigit)]
    #[case("Abcdefg12", WeakSecretRule::MissingSymbol)]
    fn policy_reports_first_failed_rule(#[case] raw: &str, #[case] expected: WeakSecretRule) {
        assert_eq!(Secret::new(raw).err(), Some(expected));
    }

    #[rstest]
    #[case("Abcdef1!")]
    #[case("Correct-Horse-9")]
    #[case("ZZZZZZZ9~")]
    fn policy_accepts_strong_secrets(#[case] raw: &str) {
        let secret = Secret::new(raw).expect("strong secret");
        assert_eq!(secret.expose(), raw);
    }

    #[rstest]
    fn verification_secrets_skip_policy() {
        assert_eq!(Secret::for_verification("wrong").expose(), "wrong");
    }

    #[rstest]
    fn debug_output_hides_material() {
        let secret = Secret::for_verification("Abcdef1!");
        assert_eq!(format!("{secret:?}"), "Secret(***)");

        let hash = CredentialHash::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$ZGlnZXN0");
        assert_eq!(format!("{hash:?}"), "CredentialHash(argon2id)");
    }

    #[rstest]
    #[case(WeakSecretRule::TooShort, "too_short")]
    #[case(WeakSecretRule::MissingUppercase, "missing_uppercase")]
    #[case(WeakSecretRule::MissingDigit, "missing_digit")]
    #[case(WeakSecretRule::MissingSymbol, "missing_symbol")]
    fn rule_codes_are_stable(#[case] rule: WeakSecretRule, #[case] code: &str) {
        assert_eq!(rule.code(), code);
    }
}
