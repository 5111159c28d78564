//! Triage rule configuration.
//!
//! There is exactly one rule table. Front ends that need different cut-offs supply a
//! [`TriageConfig`] instead of carrying their own copy of the rules. Configuration is resolved
//! once at process startup (from a YAML file named on the command line or in
//! `HEALTHBRO_TRIAGE_CONFIG`) and then passed into the engine; nothing re-reads the
//! environment while assessing.

use crate::constants::*;
use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete rule configuration. Omitted fields take the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriageConfig {
    pub vitals: VitalsThresholds,
    pub symptoms: SymptomRules,
}

/// Cut-offs for the vitals cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VitalsThresholds {
    /// SpO2 below this is severe hypoxemia.
    pub spo2_severe: f64,
    /// SpO2 in `[spo2_severe, spo2_mild)` is mild hypoxemia.
    pub spo2_mild: f64,
    pub systolic_urgent: f64,
    pub diastolic_urgent: f64,
    pub systolic_stage2: f64,
    pub diastolic_stage2: f64,
    pub tachycardia: f64,
    pub bradycardia: f64,
    pub fever: f64,
    pub tachypnea: f64,
}

impl Default for VitalsThresholds {
    fn default() -> Self {
        Self {
            spo2_severe: DEFAULT_SPO2_SEVERE,
            spo2_mild: DEFAULT_SPO2_MILD,
            systolic_urgent: DEFAULT_SYSTOLIC_URGENT,
            diastolic_urgent: DEFAULT_DIASTOLIC_URGENT,
            systolic_stage2: DEFAULT_SYSTOLIC_STAGE2,
            diastolic_stage2: DEFAULT_DIASTOLIC_STAGE2,
            tachycardia: DEFAULT_TACHYCARDIA,
            bradycardia: DEFAULT_BRADYCARDIA,
            fever: DEFAULT_FEVER,
            tachypnea: DEFAULT_TACHYPNEA,
        }
    }
}

/// Keyword lists and counts for the symptom cascades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymptomRules {
    pub fever_keywords: Vec<String>,
    pub respiratory_keywords: Vec<String>,
    pub cardiac_keywords: Vec<String>,
    pub red_flag_keywords: Vec<String>,
    /// Exact labels that must all be present for the neurological cluster.
    pub neuro_labels: Vec<String>,
    /// This many distinct symptoms (or more) raise severity to Medium.
    pub medium_symptom_count: usize,
}

impl Default for SymptomRules {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| (*s).to_owned()).collect()
        }

        Self {
            fever_keywords: owned(FEVER_KEYWORDS),
            respiratory_keywords: owned(RESPIRATORY_KEYWORDS),
            cardiac_keywords: owned(CARDIAC_KEYWORDS),
            red_flag_keywords: owned(RED_FLAG_KEYWORDS),
            neuro_labels: owned(NEURO_LABELS),
            medium_symptom_count: DEFAULT_MEDIUM_SYMPTOM_COUNT,
        }
    }
}

impl TriageConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> TriageResult<Self> {
        let cfg: Self = serde_yaml::from_str(yaml).map_err(TriageError::ConfigParse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a YAML file.
    pub fn load(path: &Path) -> TriageResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| TriageError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks that thresholds are finite and ordered, and keyword lists are usable.
    pub fn validate(&self) -> TriageResult<()> {
        self.vitals.validate()?;
        self.symptoms.validate()
    }
}

impl VitalsThresholds {
    fn validate(&self) -> TriageResult<()> {
        let values = [
            ("spo2_severe", self.spo2_severe),
            ("spo2_mild", self.spo2_mild),
            ("systolic_urgent", self.systolic_urgent),
            ("diastolic_urgent", self.diastolic_urgent),
            ("systolic_stage2", self.systolic_stage2),
            ("diastolic_stage2", self.diastolic_stage2),
            ("tachycardia", self.tachycardia),
            ("bradycardia", self.bradycardia),
            ("fever", self.fever),
            ("tachypnea", self.tachypnea),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TriageError::InvalidConfig(format!(
                "{} must be a finite number",
                name
            )));
        }

        let ordered = [
            ("spo2_severe", self.spo2_severe, "spo2_mild", self.spo2_mild),
            (
                "systolic_stage2",
                self.systolic_stage2,
                "systolic_urgent",
                self.systolic_urgent,
            ),
            (
                "diastolic_stage2",
                self.diastolic_stage2,
                "diastolic_urgent",
                self.diastolic_urgent,
            ),
        ];
        for (low_name, low, high_name, high) in ordered {
            if low > high {
                return Err(TriageError::InvalidConfig(format!(
                    "{} ({}) must not exceed {} ({})",
                    low_name, low, high_name, high
                )));
            }
        }

        if self.bradycardia >= self.tachycardia {
            return Err(TriageError::InvalidConfig(format!(
                "bradycardia ({}) must be below tachycardia ({})",
                self.bradycardia, self.tachycardia
            )));
        }

        Ok(())
    }
}

impl SymptomRules {
    fn validate(&self) -> TriageResult<()> {
        let lists = [
            ("fever_keywords", &self.fever_keywords),
            ("respiratory_keywords", &self.respiratory_keywords),
            ("cardiac_keywords", &self.cardiac_keywords),
            ("red_flag_keywords", &self.red_flag_keywords),
            ("neuro_labels", &self.neuro_labels),
        ];
        for (name, list) in lists {
            if list.is_empty() {
                return Err(TriageError::InvalidConfig(format!("{} cannot be empty", name)));
            }
            if list.iter().any(|k| k.trim().is_empty()) {
                return Err(TriageError::InvalidConfig(format!(
                    "{} cannot contain blank entries",
                    name
                )));
            }
        }

        if self.medium_symptom_count == 0 {
            return Err(TriageError::InvalidConfig(
                "medium_symptom_count must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Resolve the triage configuration from an optional file path.
///
/// `None` yields the built-in defaults.
pub fn resolve_triage_config(path: Option<PathBuf>) -> TriageResult<TriageConfig> {
    match path {
        Some(path) => {
            let cfg = TriageConfig::load(&path)?;
            tracing::info!("loaded triage configuration from {}", path.display());
            Ok(cfg)
        }
        None => Ok(TriageConfig::default()),
    }
}

/// Resolve the triage configuration from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the defaults.
pub fn triage_config_from_env_value(value: Option<String>) -> TriageResult<TriageConfig> {
    let path = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    resolve_triage_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        TriageConfig::default()
            .validate()
            .expect("default configuration should validate");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let cfg = TriageConfig::from_yaml_str(
            "vitals:\n  fever: 38.0\nsymptoms:\n  medium_symptom_count: 4\n",
        )
        .expect("valid yaml");

        assert_eq!(cfg.vitals.fever, 38.0);
        assert_eq!(cfg.vitals.spo2_severe, DEFAULT_SPO2_SEVERE);
        assert_eq!(cfg.symptoms.medium_symptom_count, 4);
        assert_eq!(cfg.symptoms.neuro_labels, vec!["Headache", "Photophobia"]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = TriageConfig::from_yaml_str("vitals:\n  fevr: 38.0\n")
            .expect_err("typo should be rejected");
        assert!(matches!(err, TriageError::ConfigParse(_)));
    }

    #[test]
    fn misordered_thresholds_are_rejected() {
        let err = TriageConfig::from_yaml_str("vitals:\n  spo2_severe: 95\n  spo2_mild: 94\n")
            .expect_err("severe above mild");
        assert!(matches!(err, TriageError::InvalidConfig(_)));

        let err = TriageConfig::from_yaml_str("vitals:\n  bradycardia: 130\n")
            .expect_err("bradycardia above tachycardia");
        assert!(matches!(err, TriageError::InvalidConfig(_)));

        let err = TriageConfig::from_yaml_str("vitals:\n  systolic_stage2: 200\n")
            .expect_err("stage 2 above urgency");
        assert!(matches!(err, TriageError::InvalidConfig(_)));
    }

    #[test]
    fn blank_keywords_are_rejected() {
        let err = TriageConfig::from_yaml_str("symptoms:\n  cardiac_keywords: [\"  \"]\n")
            .expect_err("blank keyword");
        assert!(matches!(err, TriageError::InvalidConfig(_)));

        let err = TriageConfig::from_yaml_str("symptoms:\n  red_flag_keywords: []\n")
            .expect_err("empty list");
        assert!(matches!(err, TriageError::InvalidConfig(_)));

        let err = TriageConfig::from_yaml_str("symptoms:\n  medium_symptom_count: 0\n")
            .expect_err("zero count");
        assert!(matches!(err, TriageError::InvalidConfig(_)));
    }

    #[test]
    fn env_value_resolution() {
        let cfg = triage_config_from_env_value(Some("   ".into())).expect("blank uses defaults");
        assert_eq!(cfg, TriageConfig::default());

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "vitals:\n  tachypnea: 22").expect("write yaml");
        let cfg = triage_config_from_env_value(Some(file.path().display().to_string()))
            .expect("file loads");
        assert_eq!(cfg.vitals.tachypnea, 22.0);

        let err = triage_config_from_env_value(Some("/definitely/not/here.yaml".into()))
            .expect_err("missing file");
        assert!(matches!(err, TriageError::ConfigRead { .. }));
    }
}
