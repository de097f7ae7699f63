use serde::Serialize;
use thiserror::Error;

/// Failure reported by a data provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Table unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed table: {0}")]
    Malformed(String),
}

/// What kind of row a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Person,
    Equipment,
    Job,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Person => "Person",
            Self::Equipment => "Equipment",
            Self::Job => "Job",
        })
    }
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("{kind} {id} not found.")]
    NotFound { kind: EntityKind, id: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
}

impl RosterError {
    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
