//! Vitals readings and the coercion of raw form input into them.
//!
//! The vitals evaluator is only defined over well-typed numbers. Turning free text from a form
//! or command line into a [`VitalsReading`] is the caller's job, and [`RawVitals`] is the one
//! place that does it: missing or malformed values fall back to the documented baseline rather
//! than to zero.

use crate::constants::{
    BASELINE_DIASTOLIC, BASELINE_HEART_RATE, BASELINE_OXYGEN_SATURATION,
    BASELINE_RESPIRATORY_RATE, BASELINE_SYSTOLIC, BASELINE_TEMPERATURE,
};
use crate::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Blood pressure in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
}

impl BloodPressure {
    pub fn new(systolic: f64, diastolic: f64) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }

    /// Parses `"systolic/diastolic"`.
    ///
    /// Both parts must be finite numbers; anything else (missing slash, extra parts, text)
    /// yields `None`, which the evaluator treats as an absent reading.
    pub fn parse(input: &str) -> Option<Self> {
        let (systolic, diastolic) = input.split_once('/')?;
        Some(Self::new(parse_finite(systolic)?, parse_finite(diastolic)?))
    }
}

impl Default for BloodPressure {
    fn default() -> Self {
        Self::new(BASELINE_SYSTOLIC, BASELINE_DIASTOLIC)
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

impl FromStr for BloodPressure {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            TriageError::InvalidInput(format!(
                "blood pressure must be 'systolic/diastolic', got: '{}'",
                s
            ))
        })
    }
}

/// One snapshot of a patient's vital signs.
///
/// `Default` is the normal baseline: HR 75, BP 120/80, Temp 37, SpO2 98, RR 16.
///
/// This is not the same as `RawVitals::default().to_reading()`, which leaves the respiratory
/// rate absent. Both produce the same verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    /// Beats per minute.
    pub heart_rate: f64,
    /// `None` when the pressure text could not be parsed; blood pressure guards are skipped.
    pub blood_pressure: Option<BloodPressure>,
    /// Degrees Celsius.
    pub temperature: f64,
    /// SpO2 percentage, 0-100.
    pub oxygen_saturation: f64,
    /// Breaths per minute. `None` skips the tachypnea guard; it is never read as zero.
    pub respiratory_rate: Option<f64>,
}

impl Default for VitalsReading {
    fn default() -> Self {
        Self {
            heart_rate: BASELINE_HEART_RATE,
            blood_pressure: Some(BloodPressure::default()),
            temperature: BASELINE_TEMPERATURE,
            oxygen_saturation: BASELINE_OXYGEN_SATURATION,
            respiratory_rate: Some(BASELINE_RESPIRATORY_RATE),
        }
    }
}

/// Unvalidated vitals as typed into a form or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVitals {
    pub heart_rate: Option<String>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<String>,
    pub oxygen_saturation: Option<String>,
    pub respiratory_rate: Option<String>,
}

impl RawVitals {
    /// Coerces the raw text into a reading.
    ///
    /// - heart rate, temperature, SpO2: missing or malformed -> baseline
    /// - blood pressure: missing -> baseline `120/80`, malformed -> absent
    /// - respiratory rate: missing or malformed -> absent
    pub fn to_reading(&self) -> VitalsReading {
        let blood_pressure = match present(self.blood_pressure.as_deref()) {
            None => Some(BloodPressure::default()),
            Some(text) => {
                let parsed = BloodPressure::parse(text);
                if parsed.is_none() {
                    tracing::warn!(
                        field = "blood_pressure",
                        value = text,
                        "malformed blood pressure; treating as absent"
                    );
                }
                parsed
            }
        };

        let respiratory_rate =
            present(self.respiratory_rate.as_deref()).and_then(|text| match parse_finite(text) {
                Some(value) => Some(value),
                None => {
                    tracing::warn!(
                        field = "respiratory_rate",
                        value = text,
                        "malformed respiratory rate; treating as absent"
                    );
                    None
                }
            });

        VitalsReading {
            heart_rate: coerce("heart_rate", self.heart_rate.as_deref(), BASELINE_HEART_RATE),
            blood_pressure,
            temperature: coerce(
                "temperature",
                self.temperature.as_deref(),
                BASELINE_TEMPERATURE,
            ),
            oxygen_saturation: coerce(
                "oxygen_saturation",
                self.oxygen_saturation.as_deref(),
                BASELINE_OXYGEN_SATURATION,
            ),
            respiratory_rate,
        }
    }

    /// Strict variant of [`RawVitals::to_reading`]: any malformed value is an error.
    ///
    /// Missing values still take their defaults.
    pub fn try_to_reading(&self) -> TriageResult<VitalsReading> {
        let fields = [
            ("heart_rate", &self.heart_rate),
            ("temperature", &self.temperature),
            ("oxygen_saturation", &self.oxygen_saturation),
            ("respiratory_rate", &self.respiratory_rate),
        ];
        for (name, value) in fields {
            if let Some(text) = present(value.as_deref()) {
                if parse_finite(text).is_none() {
                    return Err(TriageError::InvalidInput(format!(
                        "{} must be a finite number, got: '{}'",
                        name, text
                    )));
                }
            }
        }
        if let Some(text) = present(self.blood_pressure.as_deref()) {
            text.parse::<BloodPressure>()?;
        }
        Ok(self.to_reading())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn coerce(field: &'static str, raw: Option<&str>, baseline: f64) -> f64 {
    match present(raw) {
        None => baseline,
        Some(text) => parse_finite(text).unwrap_or_else(|| {
            tracing::warn!(field, value = text, baseline, "malformed vitals value; using baseline");
            baseline
        }),
    }
}
