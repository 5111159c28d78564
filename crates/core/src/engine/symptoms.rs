//! Symptom keyword cascades.
//!
//! Two independent cascades run over the same [`SymptomSet`]:
//!
//! Candidate conditions (first match wins):
//! 1. `respiratory-infection` - a fever keyword AND a respiratory keyword
//! 2. `cardiac` - a cardiac keyword
//! 3. `neurological` - every neuro label present as an exact label
//! 4. `undifferentiated` - otherwise
//!
//! A set that satisfies both 1 and 2 gets only the respiratory cluster. Severity is evaluated
//! separately, so a cardiac red flag in such a set still yields High.
//!
//! Severity (first match wins):
//! 1. `red-flag` - any red-flag keyword -> High
//! 2. `symptom-burden` - at least `medium_symptom_count` distinct symptoms -> Medium
//! 3. `fever` - any fever keyword -> Medium
//! 4. `minor` - otherwise -> Low

use crate::config::SymptomRules;
use crate::constants::{
    CARDIAC_CONDITIONS, NEURO_CONDITIONS, RESPIRATORY_INFECTION_CONDITIONS,
    SYMPTOM_ACTION_HIGH, SYMPTOM_ACTION_LOW, SYMPTOM_ACTION_MEDIUM, SYMPTOM_RECOMMENDATION_HIGH,
    SYMPTOM_RECOMMENDATION_LOW, SYMPTOM_RECOMMENDATION_MEDIUM, UNDIFFERENTIATED_CONDITIONS,
};
use crate::rules::{Cascade, Rule};
use crate::symptom_set::SymptomSet;
use healthbro_types::Severity;

pub(crate) type ConditionCluster = &'static [&'static str];

pub(crate) fn condition_cascade(rules: &SymptomRules) -> Cascade<SymptomSet, ConditionCluster> {
    let fever = rules.fever_keywords.clone();
    let respiratory = rules.respiratory_keywords.clone();
    let cardiac = rules.cardiac_keywords.clone();
    let neuro = rules.neuro_labels.clone();

    Cascade::new("undifferentiated", UNDIFFERENTIATED_CONDITIONS)
        .with_rule(Rule::new(
            "respiratory-infection",
            move |s: &SymptomSet| s.mentions_any(&fever) && s.mentions_any(&respiratory),
            RESPIRATORY_INFECTION_CONDITIONS,
        ))
        .with_rule(Rule::new(
            "cardiac",
            move |s: &SymptomSet| s.mentions_any(&cardiac),
            CARDIAC_CONDITIONS,
        ))
        .with_rule(Rule::new(
            "neurological",
            move |s: &SymptomSet| neuro.iter().all(|label| s.contains_label(label)),
            NEURO_CONDITIONS,
        ))
}

pub(crate) fn severity_cascade(rules: &SymptomRules) -> Cascade<SymptomSet, Severity> {
    let red_flags = rules.red_flag_keywords.clone();
    let fever = rules.fever_keywords.clone();
    let burden = rules.medium_symptom_count;

    Cascade::new("minor", Severity::Low)
        .with_rule(Rule::new(
            "red-flag",
            move |s: &SymptomSet| s.mentions_any(&red_flags),
            Severity::High,
        ))
        .with_rule(Rule::new(
            "symptom-burden",
            move |s: &SymptomSet| s.len() >= burden,
            Severity::Medium,
        ))
        .with_rule(Rule::new(
            "fever",
            move |s: &SymptomSet| s.mentions_any(&fever),
            Severity::Medium,
        ))
}

/// Recommendation and immediate action for a symptom verdict, keyed only by severity.
pub(crate) fn narrative(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::High => (SYMPTOM_RECOMMENDATION_HIGH, SYMPTOM_ACTION_HIGH),
        Severity::Medium => (SYMPTOM_RECOMMENDATION_MEDIUM, SYMPTOM_ACTION_MEDIUM),
        Severity::Low => (SYMPTOM_RECOMMENDATION_LOW, SYMPTOM_ACTION_LOW),
    }
}
