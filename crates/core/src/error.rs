//! Error type for the collaborator layer around the triage engine.
//!
//! The engine itself is total over its typed inputs and never returns these; they come from
//! parsing caller input, loading configuration, and the history/profile stores.

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid triage configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration file {}: {source}", .path.display())]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration YAML: {0}")]
    ConfigParse(serde_yaml::Error),

    #[error("invalid record id: '{0}' (expected SC-<4 digits>)")]
    InvalidRecordId(String),
    #[error("history is full: every record id is in use")]
    HistoryFull,
    #[error("history store lock poisoned")]
    HistoryLockPoisoned,

    #[error("failed to create profile directory: {0}")]
    ProfileDirCreation(std::io::Error),
    #[error("failed to write profile file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read profile file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize profile: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize profile: {0}")]
    Deserialization(serde_json::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
