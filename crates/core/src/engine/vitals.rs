//! Vitals threshold cascade.
//!
//! Guards run from most to least severe and the first match decides:
//!
//! | # | id                     | condition                                   | severity |
//! |---|------------------------|---------------------------------------------|----------|
//! | 1 | `severe-hypoxemia`     | SpO2 < 90                                   | High     |
//! | 2 | `mild-hypoxemia`       | SpO2 in [90, 94)                            | Medium   |
//! | 3 | `hypertensive-urgency` | systolic > 180 or diastolic > 120           | High     |
//! | 4 | `stage-2-hypertension` | systolic > 160 or diastolic > 100           | Medium   |
//! | 5 | `tachycardia`          | HR > 120                                    | Medium   |
//! | 6 | `bradycardia`          | HR < 50                                     | Medium   |
//! | 7 | `febrile`              | Temp > 38.5                                 | Medium   |
//! | 8 | `tachypnea`            | RR present and > 24                         | Medium   |
//! | - | `vitals-normal`        | otherwise                                   | Low      |
//!
//! Numbers shown are the defaults from [`VitalsThresholds`].

use crate::config::VitalsThresholds;
use crate::reading::VitalsReading;
use crate::rules::{Cascade, Rule};
use healthbro_types::Severity;

/// Fixed text attached to one vitals guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalsOutcome {
    pub severity: Severity,
    pub assessment: &'static str,
    pub action: &'static str,
}

const SEVERE_HYPOXEMIA: VitalsOutcome = VitalsOutcome {
    severity: Severity::High,
    assessment: "Immediate medical attention required - severe hypoxemia (SpO2 < 90%)",
    action: "Administer supplemental oxygen at 2-6L/min via nasal cannula, monitor response",
};

const MILD_HYPOXEMIA: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Close monitoring required - mild hypoxemia (SpO2 90-94%)",
    action: "Consider supplemental oxygen, assess for respiratory distress",
};

const HYPERTENSIVE_URGENCY: VitalsOutcome = VitalsOutcome {
    severity: Severity::High,
    assessment: "Hypertensive urgency - risk of end-organ damage",
    action: "Administer antihypertensives per protocol, monitor for neurological symptoms",
};

const STAGE_2_HYPERTENSION: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Stage 2 hypertension - requires evaluation",
    action: "Recheck BP after 15 min rest, consider medication adjustment",
};

const TACHYCARDIA: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Tachycardia - assess for underlying cause",
    action: "Check for dehydration, infection, or arrhythmia. Consider ECG if persistent",
};

const BRADYCARDIA: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Bradycardia - evaluate for cardiac causes",
    action: "Assess perfusion, consider atropine if symptomatic",
};

const FEBRILE: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Febrile - investigate source of infection",
    action: "Administer antipyretics (acetaminophen/ibuprofen), obtain cultures if indicated",
};

const TACHYPNEA: VitalsOutcome = VitalsOutcome {
    severity: Severity::Medium,
    assessment: "Tachypnea - assess for respiratory distress",
    action: "Evaluate for pulmonary embolism, pneumonia, or metabolic acidosis",
};

const NORMAL: VitalsOutcome = VitalsOutcome {
    severity: Severity::Low,
    assessment: "Vitals within normal parameters - routine monitoring indicated",
    action: "Continue standard monitoring protocol",
};

pub(crate) fn cascade(t: VitalsThresholds) -> Cascade<VitalsReading, VitalsOutcome> {
    Cascade::new("vitals-normal", NORMAL)
        .with_rule(Rule::new(
            "severe-hypoxemia",
            move |r: &VitalsReading| r.oxygen_saturation < t.spo2_severe,
            SEVERE_HYPOXEMIA,
        ))
        .with_rule(Rule::new(
            "mild-hypoxemia",
            move |r: &VitalsReading| (t.spo2_severe..t.spo2_mild).contains(&r.oxygen_saturation),
            MILD_HYPOXEMIA,
        ))
        .with_rule(Rule::new(
            "hypertensive-urgency",
            move |r: &VitalsReading| {
                r.blood_pressure.is_some_and(|bp| {
                    bp.systolic > t.systolic_urgent || bp.diastolic > t.diastolic_urgent
                })
            },
            HYPERTENSIVE_URGENCY,
        ))
        .with_rule(Rule::new(
            "stage-2-hypertension",
            move |r: &VitalsReading| {
                r.blood_pressure.is_some_and(|bp| {
                    bp.systolic > t.systolic_stage2 || bp.diastolic > t.diastolic_stage2
                })
            },
            STAGE_2_HYPERTENSION,
        ))
        .with_rule(Rule::new(
            "tachycardia",
            move |r: &VitalsReading| r.heart_rate > t.tachycardia,
            TACHYCARDIA,
        ))
        .with_rule(Rule::new(
            "bradycardia",
            move |r: &VitalsReading| r.heart_rate < t.bradycardia,
            BRADYCARDIA,
        ))
        .with_rule(Rule::new(
            "febrile",
            move |r: &VitalsReading| r.temperature > t.fever,
            FEBRILE,
        ))
        .with_rule(Rule::new(
            "tachypnea",
            move |r: &VitalsReading| r.respiratory_rate.is_some_and(|rr| rr > t.tachypnea),
            TACHYPNEA,
        ))
}
