//! JSON request and response bodies for the REST API.

use healthbro_core::{RawVitals, SymptomCheckRecord, Verdict};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Vitals as entered in the portal form. Any field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct VitalsReq {
    /// Beats per minute.
    pub heart_rate: Option<f64>,
    /// Systolic over diastolic, e.g. `"120/80"`.
    pub blood_pressure: Option<String>,
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// SpO2 percentage.
    pub oxygen_saturation: Option<f64>,
    /// Breaths per minute.
    pub respiratory_rate: Option<f64>,
}

impl From<VitalsReq> for RawVitals {
    fn from(req: VitalsReq) -> Self {
        RawVitals {
            heart_rate: req.heart_rate.map(|v| v.to_string()),
            blood_pressure: req.blood_pressure,
            temperature: req.temperature.map(|v| v.to_string()),
            oxygen_saturation: req.oxygen_saturation.map(|v| v.to_string()),
            respiratory_rate: req.respiratory_rate.map(|v| v.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SymptomsReq {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VerdictRes {
    /// `Low`, `Medium` or `High`.
    pub severity: String,
    pub recommendation: String,
    pub immediate_action: String,
    /// Empty for vitals verdicts.
    pub candidate_conditions: Vec<String>,
    /// Ids of the rules that decided the verdict, in evaluation order.
    pub fired_rules: Vec<String>,
}

impl From<&Verdict> for VerdictRes {
    fn from(verdict: &Verdict) -> Self {
        Self {
            severity: verdict.severity().to_string(),
            recommendation: verdict.recommendation().to_owned(),
            immediate_action: verdict.immediate_action().to_owned(),
            candidate_conditions: verdict.candidate_conditions().to_vec(),
            fired_rules: verdict.fired_rules().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomCheckRes {
    /// `SC-` followed by four digits.
    pub id: String,
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// `HH:MM`, UTC.
    pub time: String,
    /// RFC 3339 timestamp.
    pub recorded_at: String,
    pub symptoms: Vec<String>,
    pub verdict: VerdictRes,
}

impl From<&SymptomCheckRecord> for SymptomCheckRes {
    fn from(record: &SymptomCheckRecord) -> Self {
        Self {
            id: record.id().to_string(),
            date: record.date(),
            time: record.time(),
            recorded_at: record.recorded_at().to_rfc3339(),
            symptoms: record.symptoms().to_strings(),
            verdict: VerdictRes::from(record.verdict()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListSymptomChecksRes {
    /// Newest first.
    pub checks: Vec<SymptomCheckRes>,
}
