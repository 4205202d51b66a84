//! Error types
//!
//! Contract violations are bugs in the orchestration and abort the current
//! operation. Persistence failures come from the outside world. Expected
//! empty states (no candidates, no couples) are not errors at all.

use crate::components::PersonId;

pub type Result<T> = std::result::Result<T, SimError>;

/// Coarse classification so callers can match on intent instead of variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvariantViolation,
    Persistence,
}

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("{id} is deceased and cannot {operation}")]
    Deceased { id: PersonId, operation: &'static str },

    #[error("{id} is already married")]
    AlreadyMarried { id: PersonId },

    #[error("{id} cannot {relation} themself")]
    SelfReference { id: PersonId, relation: &'static str },

    #[error("no individual with id {0}")]
    UnknownPerson(PersonId),

    #[error("invalid gender {0:?}, expected \"male\" or \"female\"")]
    InvalidGender(String),

    #[error("invariant broken: {0}")]
    Invariant(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("unsupported save version {0}")]
    UnsupportedVersion(u8),
}

impl SimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::Deceased { .. }
            | SimError::AlreadyMarried { .. }
            | SimError::SelfReference { .. }
            | SimError::UnknownPerson(_)
            | SimError::InvalidGender(_)
            | SimError::Invariant(_) => ErrorKind::InvariantViolation,
            SimError::Io(_)
            | SimError::Json(_)
            | SimError::Bincode(_)
            | SimError::UnsupportedVersion(_) => ErrorKind::Persistence,
        }
    }
}
