//! Locally stored user profile.
//!
//! The portal keeps a single profile per installation. [`ProfileRepository`] is the seam for
//! wherever that lives; [`JsonFileProfileRepository`] keeps it as one JSON file. The triage
//! engine never touches profiles.

use crate::{TriageError, TriageResult};
use chrono::NaiveDate;
use healthbro_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Personal details shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub occupation: String,
    pub location: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            dob: "1990-01-01".into(),
            email: "john.doe@example.com".into(),
            phone: "+1234567890".into(),
            occupation: "Patient".into(),
            location: "New York, USA".into(),
        }
    }
}

impl UserProfile {
    /// Checks that the name is present, the date of birth parses, and the email has an `@`.
    pub fn validate(&self) -> TriageResult<()> {
        NonEmptyText::new(&self.name)
            .map_err(|_| TriageError::InvalidInput("name cannot be empty".into()))?;

        NaiveDate::parse_from_str(self.dob.trim(), "%Y-%m-%d").map_err(|e| {
            TriageError::InvalidInput(format!("dob must be YYYY-MM-DD, got '{}': {}", self.dob, e))
        })?;

        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(TriageError::InvalidInput(format!(
                "email '{}' is missing '@'",
                email
            )));
        }

        Ok(())
    }
}

/// Storage for the single user profile.
pub trait ProfileRepository {
    /// Loads the saved profile, or the default profile if none has been saved.
    fn load(&self) -> TriageResult<UserProfile>;

    /// Validates and saves the profile, replacing any previous one.
    fn save(&self, profile: &UserProfile) -> TriageResult<()>;
}

/// Profile stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileProfileRepository {
    path: PathBuf,
}

impl JsonFileProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileRepository for JsonFileProfileRepository {
    fn load(&self) -> TriageResult<UserProfile> {
        if !self.path.is_file() {
            return Ok(UserProfile::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(TriageError::FileRead)?;
        serde_json::from_str(&contents).map_err(TriageError::Deserialization)
    }

    fn save(&self, profile: &UserProfile) -> TriageResult<()> {
        profile.validate()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(TriageError::ProfileDirCreation)?;
        }
        let json = serde_json::to_string_pretty(profile).map_err(TriageError::Serialization)?;
        fs::write(&self.path, json).map_err(TriageError::FileWrite)?;
        tracing::debug!("saved profile to {}", self.path.display());
        Ok(())
    }
}
