//! # HealthBro Core
//!
//! Rule-based triage for the HealthBro patient portal.
//!
//! The heart of the crate is the [`TriageEngine`]: two pure, deterministic evaluators that map
//! either a [`VitalsReading`] or a [`SymptomSet`] to a [`Verdict`]. Both are ordered
//! first-match-wins cascades built from [`rules::Cascade`], with thresholds and keyword lists
//! taken from a [`TriageConfig`].
//!
//! Around the engine sit the in-process collaborators:
//! - [`RawVitals`] coerces free-text form input into a complete reading
//! - [`InMemoryHistory`] keeps `SC-xxxx` symptom check records for the session
//! - [`TriageService`] wires the engine to a history store
//! - [`profile`] persists the single user profile as JSON
//!
//! **No transport concerns**: HTTP and command line front ends live in `api-rest` and `cli`.
//!
//! The verdicts are decision support only and are not a medical diagnosis.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod history;
pub mod profile;
pub mod reading;
pub mod rules;
pub mod service;
pub mod symptom_set;
pub mod verdict;

pub use config::{
    resolve_triage_config, triage_config_from_env_value, SymptomRules, TriageConfig,
    VitalsThresholds,
};
pub use engine::{assess_symptoms, assess_vitals, TriageEngine};
pub use error::{TriageError, TriageResult};
pub use history::{HistoryStore, InMemoryHistory, RecordId, SymptomCheckRecord};
pub use profile::{JsonFileProfileRepository, ProfileRepository, UserProfile};
pub use reading::{BloodPressure, RawVitals, VitalsReading};
pub use service::TriageService;
pub use symptom_set::SymptomSet;
pub use verdict::Verdict;

pub use healthbro_types::{NonEmptyText, Severity};
