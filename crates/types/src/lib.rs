//! Shared value types for HealthBro.
//!
//! These types are used by the triage engine and by every front end that feeds it
//! (CLI, REST). They carry no behaviour beyond validation and comparison.

mod severity;

pub use severity::Severity;

/// Errors that can occur when creating validated types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input did not name a known severity tier
    #[error("unknown severity: '{0}'")]
    UnknownSeverity(String),
}

/// A string type that guarantees non-empty content.
///
/// Symptom labels and profile fields are entered as free text, so this wrapper trims leading
/// and trailing whitespace on construction and rejects anything left blank.
///
/// Comparisons through [`NonEmptyText::eq_ignore_case`] and
/// [`NonEmptyText::contains_ignore_case`] are case-insensitive; derived `PartialEq` is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased copy of the text, used as the matching key.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// True if `other` equals this text ignoring case.
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.folded() == other.trim().to_lowercase()
    }

    /// True if `needle` occurs anywhere in this text ignoring case.
    ///
    /// A blank needle never matches.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.trim();
        !needle.is_empty() && self.folded().contains(&needle.to_lowercase())
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_rejects_blank() {
        let text = NonEmptyText::new("  Fever \n").expect("valid text");
        assert_eq!(text.as_str(), "Fever");

        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn case_insensitive_helpers() {
        let text = NonEmptyText::new("Severe Chest Pain").unwrap();
        assert!(text.eq_ignore_case("severe chest pain"));
        assert!(!text.eq_ignore_case("chest pain"));
        assert!(text.contains_ignore_case("CHEST PAIN"));
        assert!(!text.contains_ignore_case("  "));
    }

    #[test]
    fn deserialize_rejects_blank() {
        let ok: NonEmptyText = serde_json::from_str("\" Cough \"").unwrap();
        assert_eq!(ok.as_str(), "Cough");

        let err = serde_json::from_str::<NonEmptyText>("\"  \"");
        assert!(err.is_err());
    }
}
