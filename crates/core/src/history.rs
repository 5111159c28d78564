//! Symptom check history.
//!
//! Every symptom analysis is kept as a [`SymptomCheckRecord`]: the verdict, the symptoms it was
//! computed from, an `SC-<4 digits>` identifier, and a timestamp. Records are prepended to an
//! append-only list and are never mutated or deleted. Nothing outlives the process.
//!
//! The engine never reads or writes this list; [`crate::TriageService`] layers it on top.

use crate::constants::{RECORD_ID_MAX, RECORD_ID_MIN, RECORD_ID_PREFIX};
use crate::symptom_set::SymptomSet;
use crate::verdict::Verdict;
use crate::{TriageError, TriageResult};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, RwLock};
use std::{fmt, str::FromStr};

/// Identifier of a symptom check, displayed as `SC-1234`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u16);

impl RecordId {
    /// Number of distinct identifiers.
    pub const CAPACITY: usize = (RECORD_ID_MAX - RECORD_ID_MIN) as usize + 1;

    /// Wraps a number in `1000..=9999`.
    pub fn new(number: u16) -> TriageResult<Self> {
        if (RECORD_ID_MIN..=RECORD_ID_MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(TriageError::InvalidRecordId(number.to_string()))
        }
    }

    /// Draws an identifier uniformly from the full range.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(RECORD_ID_MIN..=RECORD_ID_MAX))
    }

    pub fn number(self) -> u16 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:04}", RECORD_ID_PREFIX, self.0)
    }
}

impl FromStr for RecordId {
    type Err = TriageError;

    /// Accepts exactly `SC-` followed by four ASCII digits in range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TriageError::InvalidRecordId(s.to_owned());
        let digits = s.strip_prefix(RECORD_ID_PREFIX).ok_or_else(invalid)?;
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u16 = digits.parse().map_err(|_| invalid())?;
        Self::new(number).map_err(|_| invalid())
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One stored symptom analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomCheckRecord {
    id: RecordId,
    symptoms: SymptomSet,
    verdict: Verdict,
    recorded_at: DateTime<Utc>,
}

impl SymptomCheckRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn symptoms(&self) -> &SymptomSet {
        &self.symptoms
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// ISO calendar date, `YYYY-MM-DD` (UTC).
    pub fn date(&self) -> String {
        self.recorded_at.format("%Y-%m-%d").to_string()
    }

    /// 24-hour `HH:MM` (UTC), independent of locale.
    pub fn time(&self) -> String {
        self.recorded_at.format("%H:%M").to_string()
    }
}

/// Ordered, append-only storage for symptom checks.
pub trait HistoryStore: Send + Sync {
    /// Stores a new record at the front of the list and returns it.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `symptoms` is empty,
    /// - `HistoryFull` if no identifier is free,
    /// - `HistoryLockPoisoned` if a previous writer panicked.
    fn record(
        &self,
        symptoms: SymptomSet,
        verdict: Verdict,
        recorded_at: DateTime<Utc>,
    ) -> TriageResult<SymptomCheckRecord>;

    /// All records, newest first.
    fn list(&self) -> TriageResult<Vec<SymptomCheckRecord>>;

    fn get(&self, id: RecordId) -> TriageResult<Option<SymptomCheckRecord>>;

    fn len(&self) -> TriageResult<usize>;

    fn is_empty(&self) -> TriageResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Process-lifetime history held in memory.
///
/// Identifiers are drawn at random and re-drawn on collision, so they are unique within one
/// store. Once all [`RecordId::CAPACITY`] identifiers are taken, recording fails.
#[derive(Debug)]
pub struct InMemoryHistory {
    inner: RwLock<Entries>,
    rng: Mutex<StdRng>,
}

#[derive(Debug, Default)]
struct Entries {
    records: VecDeque<SymptomCheckRecord>,
    taken: HashSet<RecordId>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Uses a caller-supplied generator, e.g. a seeded one for reproducible ids.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            inner: RwLock::new(Entries::default()),
            rng: Mutex::new(rng),
        }
    }

    fn next_id(&self, taken: &HashSet<RecordId>) -> TriageResult<RecordId> {
        if taken.len() >= RecordId::CAPACITY {
            return Err(TriageError::HistoryFull);
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| TriageError::HistoryLockPoisoned)?;
        loop {
            let id = RecordId::random(&mut *rng);
            if !taken.contains(&id) {
                return Ok(id);
            }
        }
    }

    fn read(&self) -> TriageResult<std::sync::RwLockReadGuard<'_, Entries>> {
        self.inner
            .read()
            .map_err(|_| TriageError::HistoryLockPoisoned)
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistory {
    fn record(
        &self,
        symptoms: SymptomSet,
        verdict: Verdict,
        recorded_at: DateTime<Utc>,
    ) -> TriageResult<SymptomCheckRecord> {
        if symptoms.is_empty() {
            return Err(TriageError::InvalidInput(
                "at least one symptom is required".into(),
            ));
        }

        let mut entries = self
            .inner
            .write()
            .map_err(|_| TriageError::HistoryLockPoisoned)?;
        let id = self.next_id(&entries.taken)?;

        let record = SymptomCheckRecord {
            id,
            symptoms,
            verdict,
            recorded_at,
        };
        entries.taken.insert(id);
        entries.records.push_front(record.clone());
        Ok(record)
    }

    fn list(&self) -> TriageResult<Vec<SymptomCheckRecord>> {
        Ok(self.read()?.records.iter().cloned().collect())
    }

    fn get(&self, id: RecordId) -> TriageResult<Option<SymptomCheckRecord>> {
        Ok(self.read()?.records.iter().find(|r| r.id == id).cloned())
    }

    fn len(&self) -> TriageResult<usize> {
        Ok(self.read()?.records.len())
    }
}
