//! Triage service: the engine plus the history it feeds.
//!
//! Front ends hold one `TriageService` for the life of the process and share it across
//! requests. Assessment goes straight to the engine; recording a symptom check also stamps and
//! stores it.

use crate::config::TriageConfig;
use crate::engine::TriageEngine;
use crate::history::{HistoryStore, InMemoryHistory, RecordId, SymptomCheckRecord};
use crate::reading::VitalsReading;
use crate::symptom_set::SymptomSet;
use crate::verdict::Verdict;
use crate::TriageResult;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct TriageService {
    engine: Arc<TriageEngine>,
    history: Arc<dyn HistoryStore>,
}

impl TriageService {
    pub fn new(engine: TriageEngine, history: impl HistoryStore + 'static) -> Self {
        Self {
            engine: Arc::new(engine),
            history: Arc::new(history),
        }
    }

    /// Engine built from `config` with an empty in-memory history.
    pub fn in_memory(config: TriageConfig) -> TriageResult<Self> {
        Ok(Self::new(TriageEngine::new(config)?, InMemoryHistory::new()))
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    pub fn assess_vitals(&self, reading: &VitalsReading) -> Verdict {
        let verdict = self.engine.assess_vitals(reading);
        tracing::debug!(
            severity = %verdict.severity(),
            rules = ?verdict.fired_rules(),
            "vitals assessed"
        );
        verdict
    }

    pub fn assess_symptoms(&self, symptoms: &SymptomSet) -> Verdict {
        let verdict = self.engine.assess_symptoms(symptoms);
        tracing::debug!(
            severity = %verdict.severity(),
            rules = ?verdict.fired_rules(),
            symptoms = symptoms.len(),
            "symptoms assessed"
        );
        verdict
    }

    /// Assesses the labels and stores the result, stamped with the current time.
    pub fn check_symptoms<I, S>(&self, labels: I) -> TriageResult<SymptomCheckRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.check_symptoms_at(SymptomSet::new(labels), Utc::now())
    }

    /// As [`TriageService::check_symptoms`] with an explicit timestamp.
    pub fn check_symptoms_at(
        &self,
        symptoms: SymptomSet,
        recorded_at: DateTime<Utc>,
    ) -> TriageResult<SymptomCheckRecord> {
        let verdict = self.assess_symptoms(&symptoms);
        let record = self.history.record(symptoms, verdict, recorded_at)?;
        let severity = record.verdict().severity();
        if severity.is_urgent() {
            tracing::warn!(id = %record.id(), %severity, "urgent symptom check recorded");
        } else {
            tracing::info!(id = %record.id(), %severity, "symptom check recorded");
        }
        Ok(record)
    }

    /// Stored symptom checks, newest first.
    pub fn history(&self) -> TriageResult<Vec<SymptomCheckRecord>> {
        self.history.list()
    }

    pub fn find(&self, id: RecordId) -> TriageResult<Option<SymptomCheckRecord>> {
        self.history.get(id)
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::new(TriageEngine::default(), InMemoryHistory::new())
    }
}

impl std::fmt::Debug for TriageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriageService")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
