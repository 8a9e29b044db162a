//! Ordered, de-duplicated tag lists.

use serde::{Deserialize, Serialize};

use super::{ProfileField, ProfileValidationError};

/// Longest accepted tag, in characters.
pub const TAG_MAX_LEN: usize = 64;
/// Largest accepted number of tags in one set.
pub const TAG_SET_MAX: usize = 50;

/// Set of short strings that keeps first-seen order.
///
/// # Examples
/// ```
/// use talfy::domain::{ProfileField, TagSet};
///
/// let tags = TagSet::from_raw(
///     ProfileField::Tools,
///     vec![" SQL ".into(), "".into(), "Excel".into(), "SQL".into()],
/// )
/// .expect("valid tags");
/// assert_eq!(tags.as_slice(), ["SQL", "Excel"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Normalise raw entries: trim, drop blanks, keep the first duplicate.
    pub fn from_raw(
        field: ProfileField,
        raw: Vec<String>,
    ) -> Result<Self, ProfileValidationError> {
        let mut tags: Vec<String> = Vec::with_capacity(raw.len());
        for entry in raw {
            let trimmed = entry.trim();
            if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
                continue;
            }
            if trimmed.chars().count() > TAG_MAX_LEN {
                return Err(ProfileValidationError::TagTooLong {
                    field,
                    max: TAG_MAX_LEN,
                });
            }
            tags.push(trimmed.to_owned());
        }
        if tags.len() > TAG_SET_MAX {
            return Err(ProfileValidationError::TooManyTags {
                field,
                max: TAG_SET_MAX,
            });
        }
        Ok(Self(tags))
    }

    /// Wrap tags read back from storage, which were normalised on write.
    pub fn from_stored(tags: Vec<String>) -> Self {
        Self(tags)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
