//! Constants used throughout the HealthBro core crate.
//!
//! Baseline vitals, default rule thresholds, keyword lists, and the fixed narrative text the
//! engine attaches to each verdict all live here so the rule table can be audited in one place.

// Baseline vitals: the "normal" values a reading falls back to when a field is unset.

pub const BASELINE_HEART_RATE: f64 = 75.0;
pub const BASELINE_SYSTOLIC: f64 = 120.0;
pub const BASELINE_DIASTOLIC: f64 = 80.0;
pub const BASELINE_TEMPERATURE: f64 = 37.0;
pub const BASELINE_OXYGEN_SATURATION: f64 = 98.0;
pub const BASELINE_RESPIRATORY_RATE: f64 = 16.0;

// Default vitals thresholds. Comparisons are strict except the SpO2 band `[severe, mild)`.

pub const DEFAULT_SPO2_SEVERE: f64 = 90.0;
pub const DEFAULT_SPO2_MILD: f64 = 94.0;
pub const DEFAULT_SYSTOLIC_URGENT: f64 = 180.0;
pub const DEFAULT_DIASTOLIC_URGENT: f64 = 120.0;
pub const DEFAULT_SYSTOLIC_STAGE2: f64 = 160.0;
pub const DEFAULT_DIASTOLIC_STAGE2: f64 = 100.0;
pub const DEFAULT_TACHYCARDIA: f64 = 120.0;
pub const DEFAULT_BRADYCARDIA: f64 = 50.0;
pub const DEFAULT_FEVER: f64 = 38.5;
pub const DEFAULT_TACHYPNEA: f64 = 24.0;

// Symptom keyword lists. Matching is case-insensitive substring unless noted.

pub const FEVER_KEYWORDS: &[&str] = &["fever", "febrile", "pyrexia"];
pub const RESPIRATORY_KEYWORDS: &[&str] = &["cough", "dyspnea", "dyspnoea", "shortness of breath"];
pub const CARDIAC_KEYWORDS: &[&str] = &["chest pain", "palpitations", "diaphoresis"];
pub const RED_FLAG_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "altered mental status",
    "severe pain",
    "uncontrolled bleeding",
];
/// Matched as exact labels (case-insensitive), all of which must be present.
pub const NEURO_LABELS: &[&str] = &["Headache", "Photophobia"];
pub const DEFAULT_MEDIUM_SYMPTOM_COUNT: usize = 3;

// Candidate condition clusters.

pub const RESPIRATORY_INFECTION_CONDITIONS: &[&str] =
    &["Influenza", "COVID-19", "Community-acquired pneumonia"];
pub const CARDIAC_CONDITIONS: &[&str] = &[
    "Acute coronary syndrome",
    "Pulmonary embolism",
    "Cardiac arrhythmia",
];
pub const NEURO_CONDITIONS: &[&str] = &["Migraine", "Meningitis", "Tension headache"];
pub const UNDIFFERENTIATED_CONDITIONS: &[&str] = &["Further evaluation required"];

// Symptom-path narrative, keyed by severity tier only.

pub const SYMPTOM_RECOMMENDATION_HIGH: &str = "Seek emergency medical attention immediately.";
pub const SYMPTOM_RECOMMENDATION_MEDIUM: &str =
    "Schedule an appointment with your doctor within 24-48 hours.";
pub const SYMPTOM_RECOMMENDATION_LOW: &str =
    "Monitor symptoms and consult doctor if they persist beyond 3 days.";

pub const SYMPTOM_ACTION_HIGH: &str =
    "Call emergency services or go to the nearest emergency department now";
pub const SYMPTOM_ACTION_MEDIUM: &str = "Book a doctor's appointment and keep a symptom diary";
pub const SYMPTOM_ACTION_LOW: &str = "Rest, stay hydrated, and monitor symptoms";

// History record identifiers: `SC-<4 digits>`.

pub const RECORD_ID_PREFIX: &str = "SC-";
pub const RECORD_ID_MIN: u16 = 1000;
pub const RECORD_ID_MAX: u16 = 9999;

/// Environment variable naming an optional YAML threshold file.
pub const TRIAGE_CONFIG_ENV: &str = "HEALTHBRO_TRIAGE_CONFIG";

/// Default file for the locally stored user profile.
pub const DEFAULT_PROFILE_FILENAME: &str = "healthbro_profile.json";
