use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackupError {
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(String),
    #[error("workspace is empty: {0}")]
    WorkspaceEmpty(String),
    #[error("missing SEED.md in workspace")]
    MissingSeed,
    #[error("invalid backup JSON: {0}")]
    InvalidJson(String),
    #[error("invalid backup format: {0}")]
    InvalidFormat(String),
    #[error("restore target already contains an entity (One Body, One Soul)")]
    OneBodyViolation,
}

pub type BackupResult<T> = Result<T, BackupError>;
