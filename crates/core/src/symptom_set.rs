//! Immutable symptom collections.

use healthbro_types::NonEmptyText;
use serde::{Deserialize, Serialize};

/// An ordered, de-duplicated set of free-text symptom labels.
///
/// Labels are trimmed and blank labels are dropped. Duplicates are detected ignoring case and
/// the first spelling wins. Insertion order is kept for display only; rule evaluation does not
/// depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomSet {
    labels: Vec<NonEmptyText>,
}

impl SymptomSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<NonEmptyText> = Vec::new();
        for label in labels {
            let Ok(label) = NonEmptyText::new(label) else {
                continue;
            };
            if !kept.iter().any(|k| k.eq_ignore_case(label.as_str())) {
                kept.push(label);
            }
        }
        Self { labels: kept }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NonEmptyText> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True if some label equals `label` exactly, ignoring case.
    pub fn contains_label(&self, label: &str) -> bool {
        self.iter().any(|l| l.eq_ignore_case(label))
    }

    /// True if some label contains any of `keywords` as a case-insensitive substring.
    pub fn mentions_any<K: AsRef<str>>(&self, keywords: &[K]) -> bool {
        self.iter()
            .any(|l| keywords.iter().any(|k| l.contains_ignore_case(k.as_ref())))
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|l| l.as_str().to_owned()).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl From<Vec<String>> for SymptomSet {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<SymptomSet> for Vec<String> {
    fn from(set: SymptomSet) -> Self {
        set.labels.into_iter().map(NonEmptyText::into_inner).collect()
    }
}
