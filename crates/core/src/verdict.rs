//! The engine's output record.

use healthbro_types::Severity;
use serde::{Deserialize, Serialize};

/// Result of assessing a vitals reading or a symptom set.
///
/// Fresh verdicts come only from the engine; callers read them through accessors, so a verdict
/// never changes after it is produced. `Deserialize` exists to reload stored
/// [`crate::SymptomCheckRecord`]s and does not re-run or check any rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    severity: Severity,
    recommendation: String,
    immediate_action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    candidate_conditions: Vec<String>,
    fired_rules: Vec<String>,
}

impl Verdict {
    pub(crate) fn new(
        severity: Severity,
        recommendation: impl Into<String>,
        immediate_action: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            recommendation: recommendation.into(),
            immediate_action: immediate_action.into(),
            candidate_conditions: Vec::new(),
            fired_rules: Vec::new(),
        }
    }

    pub(crate) fn with_candidate_conditions(mut self, conditions: &[&str]) -> Self {
        self.candidate_conditions = conditions.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    pub(crate) fn with_fired_rule(mut self, rule_id: &str) -> Self {
        self.fired_rules.push(rule_id.to_owned());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Narrative clinical assessment.
    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    /// Short actionable text.
    pub fn immediate_action(&self) -> &str {
        &self.immediate_action
    }

    /// Candidate conditions, in display order. Empty for vitals verdicts.
    pub fn candidate_conditions(&self) -> &[String] {
        &self.candidate_conditions
    }

    /// Ids of the rules that decided this verdict, in the order they were evaluated.
    pub fn fired_rules(&self) -> &[String] {
        &self.fired_rules
    }
}
