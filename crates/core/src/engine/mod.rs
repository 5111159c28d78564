//! The triage engine.
//!
//! Pure and synchronous: each call reads only its argument and the immutable rule table, and
//! allocates only its own [`Verdict`]. A [`TriageEngine`] is `Send + Sync` and can be shared
//! behind an `Arc` by any number of concurrent callers.

mod symptoms;
mod vitals;

pub use vitals::VitalsOutcome;

use crate::config::TriageConfig;
use crate::reading::VitalsReading;
use crate::rules::Cascade;
use crate::symptom_set::SymptomSet;
use crate::verdict::Verdict;
use crate::TriageResult;
use healthbro_types::Severity;
use std::sync::OnceLock;

/// Compiled rule table for both evaluators.
#[derive(Debug)]
pub struct TriageEngine {
    config: TriageConfig,
    vitals: Cascade<VitalsReading, VitalsOutcome>,
    conditions: Cascade<SymptomSet, symptoms::ConditionCluster>,
    severity: Cascade<SymptomSet, Severity>,
}

impl TriageEngine {
    /// Builds an engine from a configuration, validating it first.
    pub fn new(config: TriageConfig) -> TriageResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: TriageConfig) -> Self {
        Self {
            vitals: vitals::cascade(config.vitals),
            conditions: symptoms::condition_cascade(&config.symptoms),
            severity: symptoms::severity_cascade(&config.symptoms),
            config,
        }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Runs the vitals cascade. The first matching guard decides the verdict.
    pub fn assess_vitals(&self, reading: &VitalsReading) -> Verdict {
        let m = self.vitals.evaluate(reading);
        Verdict::new(m.outcome.severity, m.outcome.assessment, m.outcome.action)
            .with_fired_rule(m.rule_id)
    }

    /// Runs the candidate-condition and severity cascades independently.
    ///
    /// Recommendation and immediate action depend only on the severity tier.
    pub fn assess_symptoms(&self, symptoms: &SymptomSet) -> Verdict {
        let conditions = self.conditions.evaluate(symptoms);
        let severity = self.severity.evaluate(symptoms);
        let (recommendation, action) = symptoms::narrative(*severity.outcome);

        Verdict::new(*severity.outcome, recommendation, action)
            .with_candidate_conditions(conditions.outcome)
            .with_fired_rule(conditions.rule_id)
            .with_fired_rule(severity.rule_id)
    }

    /// Vitals guard ids in evaluation order, fallback last.
    pub fn vitals_rule_ids(&self) -> Vec<&'static str> {
        self.vitals.rule_ids()
    }

    /// Candidate-condition rule ids in evaluation order, fallback last.
    pub fn condition_rule_ids(&self) -> Vec<&'static str> {
        self.conditions.rule_ids()
    }

    /// Symptom severity rule ids in evaluation order, fallback last.
    pub fn severity_rule_ids(&self) -> Vec<&'static str> {
        self.severity.rule_ids()
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::build(TriageConfig::default())
    }
}

fn default_engine() -> &'static TriageEngine {
    static ENGINE: OnceLock<TriageEngine> = OnceLock::new();
    ENGINE.get_or_init(TriageEngine::default)
}

/// Assesses a vitals reading with the default rule table.
pub fn assess_vitals(reading: &VitalsReading) -> Verdict {
    default_engine().assess_vitals(reading)
}

/// Assesses a symptom set with the default rule table.
pub fn assess_symptoms(symptoms: &SymptomSet) -> Verdict {
    default_engine().assess_symptoms(symptoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VitalsThresholds;
    use crate::reading::BloodPressure;
    use crate::TriageError;

    fn symptoms(labels: &[&str]) -> SymptomSet {
        SymptomSet::new(labels)
    }

    #[test]
    fn baseline_vitals_are_low_routine_monitoring() {
        let verdict = assess_vitals(&VitalsReading::default());
        assert_eq!(verdict.severity(), Severity::Low);
        assert!(verdict.recommendation().contains("routine monitoring"));
        assert_eq!(
            verdict.immediate_action(),
            "Continue standard monitoring protocol"
        );
        assert!(verdict.candidate_conditions().is_empty());
        assert_eq!(verdict.fired_rules(), ["vitals-normal"]);
    }

    #[test]
    fn severe_hypoxemia_overrides_everything_else() {
        let worst_everything = VitalsReading {
            heart_rate: 30.0,
            blood_pressure: Some(BloodPressure::new(220.0, 130.0)),
            temperature: 41.0,
            oxygen_saturation: 70.0,
            respiratory_rate: Some(40.0),
        };
        for spo2 in [0.0, 50.0, 89.0, 89.99] {
            let reading = VitalsReading {
                oxygen_saturation: spo2,
                ..worst_everything
            };
            let verdict = assess_vitals(&reading);
            assert_eq!(verdict.severity(), Severity::High);
            assert_eq!(verdict.fired_rules(), ["severe-hypoxemia"]);
        }
    }

    #[test]
    fn cascade_order_is_load_bearing() {
        let reading = VitalsReading {
            oxygen_saturation: 92.0,
            blood_pressure: Some(BloodPressure::new(190.0, 80.0)),
            ..VitalsReading::default()
        };
        let verdict = assess_vitals(&reading);
        assert_eq!(verdict.severity(), Severity::Medium);
        assert!(verdict.recommendation().contains("mild hypoxemia"));
        assert_eq!(verdict.fired_rules(), ["mild-hypoxemia"]);
    }

    #[test]
    fn saturation_band_is_half_open() {
        let at = |spo2: f64| {
            assess_vitals(&VitalsReading {
                oxygen_saturation: spo2,
                ..VitalsReading::default()
            })
        };

        let ninety = at(90.0);
        assert_eq!(ninety.severity(), Severity::Medium);
        assert_eq!(ninety.fired_rules(), ["mild-hypoxemia"]);

        let ninety_four = at(94.0);
        assert_eq!(ninety_four.severity(), Severity::Low);
        assert_eq!(ninety_four.fired_rules(), ["vitals-normal"]);

        // 94 falls through to the next guards rather than landing in the band.
        let ninety_four_hypertensive = assess_vitals(&VitalsReading {
            oxygen_saturation: 94.0,
            blood_pressure: Some(BloodPressure::new(190.0, 80.0)),
            ..VitalsReading::default()
        });
        assert_eq!(ninety_four_hypertensive.severity(), Severity::High);
        assert_eq!(
            ninety_four_hypertensive.fired_rules(),
            ["hypertensive-urgency"]
        );
    }

    #[test]
    fn fever_and_cough_suggest_respiratory_infection() {
        let verdict = assess_symptoms(&symptoms(&["Fever", "Cough"]));
        assert_eq!(
            verdict.candidate_conditions(),
            ["Influenza", "COVID-19", "Community-acquired pneumonia"]
        );
        assert_eq!(verdict.severity(), Severity::Medium);
        assert_eq!(
            verdict.recommendation(),
            "Schedule an appointment with your doctor within 24-48 hours."
        );
        assert_eq!(verdict.fired_rules(), ["respiratory-infection", "fever"]);
    }

    #[test]
    fn chest_pain_is_high_with_cardiac_cluster() {
        let verdict = assess_symptoms(&symptoms(&["Chest pain"]));
        assert_eq!(verdict.severity(), Severity::High);
        assert_eq!(
            verdict.candidate_conditions().first().map(String::as_str),
            Some("Acute coronary syndrome")
        );
        assert_eq!(
            verdict.candidate_conditions(),
            ["Acute coronary syndrome", "Pulmonary embolism", "Cardiac arrhythmia"]
        );
        assert_eq!(
            verdict.recommendation(),
            "Seek emergency medical attention immediately."
        );
    }

    #[test]
    fn headache_with_photophobia_is_neurological() {
        let verdict = assess_symptoms(&symptoms(&["Headache", "Photophobia"]));
        assert_eq!(
            verdict.candidate_conditions(),
            ["Migraine", "Meningitis", "Tension headache"]
        );
        assert_eq!(verdict.severity(), Severity::Low);
    }

    #[test]
    fn respiratory_cluster_with_cardiac_red_flag_is_still_high() {
        let verdict = assess_symptoms(&symptoms(&["Fever", "Cough", "Chest pain"]));
        assert_eq!(verdict.severity(), Severity::High);
        assert_eq!(
            verdict.candidate_conditions(),
            ["Influenza", "COVID-19", "Community-acquired pneumonia"]
        );
        assert_eq!(verdict.fired_rules(), ["respiratory-infection", "red-flag"]);
    }

    #[test]
    fn symptom_order_does_not_change_the_verdict() {
        let forward = assess_symptoms(&symptoms(&["Fever", "Cough", "Chest pain"]));
        let reversed = assess_symptoms(&symptoms(&["Chest pain", "Cough", "Fever"]));
        assert_eq!(forward, reversed);

        let forward = assess_symptoms(&symptoms(&["Headache", "Photophobia", "Nausea"]));
        let reversed = assess_symptoms(&symptoms(&["Nausea", "Photophobia", "Headache"]));
        assert_eq!(forward, reversed);
    }

    #[test]
    fn unmatched_symptoms_need_further_evaluation() {
        let verdict = assess_symptoms(&symptoms(&["Itchy elbow"]));
        assert_eq!(
            verdict.candidate_conditions(),
            ["Further evaluation required"]
        );
        assert_eq!(verdict.severity(), Severity::Low);
        assert_eq!(
            verdict.recommendation(),
            "Monitor symptoms and consult doctor if they persist beyond 3 days."
        );
    }

    #[test]
    fn recommendation_depends_only_on_severity() {
        let a = assess_symptoms(&symptoms(&["Nausea", "Fatigue", "Dizziness"]));
        let b = assess_symptoms(&symptoms(&["Fever"]));
        assert_eq!(a.fired_rules()[1], "symptom-burden");
        assert_eq!(b.fired_rules()[1], "fever");
        assert_eq!(a.severity(), b.severity());
        assert_eq!(a.recommendation(), b.recommendation());
        assert_eq!(a.immediate_action(), b.immediate_action());
    }

    #[test]
    fn assessments_are_idempotent() {
        let reading = VitalsReading {
            heart_rate: 130.0,
            ..VitalsReading::default()
        };
        let first = serde_json::to_vec(&assess_vitals(&reading)).unwrap();
        let second = serde_json::to_vec(&assess_vitals(&reading)).unwrap();
        assert_eq!(first, second);

        let set = symptoms(&["Fever", "Cough", "Chest pain"]);
        let first = serde_json::to_vec(&assess_symptoms(&set)).unwrap();
        let second = serde_json::to_vec(&assess_symptoms(&set)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn custom_configuration_changes_thresholds() {
        let engine = TriageEngine::new(TriageConfig {
            vitals: VitalsThresholds {
                tachycardia: 100.0,
                ..VitalsThresholds::default()
            },
            ..TriageConfig::default()
        })
        .expect("valid config");
        assert_eq!(engine.config().vitals.tachycardia, 100.0);

        let reading = VitalsReading {
            heart_rate: 110.0,
            ..VitalsReading::default()
        };
        assert_eq!(engine.assess_vitals(&reading).fired_rules(), ["tachycardia"]);
        assert_eq!(assess_vitals(&reading).fired_rules(), ["vitals-normal"]);
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut config = TriageConfig::default();
        config.symptoms.medium_symptom_count = 0;
        assert!(matches!(
            TriageEngine::new(config),
            Err(TriageError::InvalidConfig(_))
        ));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(TriageEngine::default());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    let reading = VitalsReading {
                        heart_rate: 100.0 + f64::from(i) * 10.0,
                        ..VitalsReading::default()
                    };
                    engine.assess_vitals(&reading).severity()
                })
            })
            .collect();

        let severities: Vec<Severity> = handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect();
        assert_eq!(
            severities,
            vec![Severity::Low, Severity::Low, Severity::Low, Severity::Medium]
        );
    }
}
