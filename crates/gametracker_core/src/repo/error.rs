//! Repository error taxonomy.

use crate::db::DbError;
use crate::model::{EntityId, EntityKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors returned by every repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before touching the store.
    Validation(ValidationError),
    /// No row exists for the requested id.
    NotFound { entity: EntityKind, id: EntityId },
    /// Store error, passed through unchanged.
    Db(DbError),
    /// Persisted state cannot form a valid record.
    InvalidData(String),
}

impl RepoError {
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Returns whether this is a not-found condition for any entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Locally detected input problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The user's player reference does not match a stored player by both
    /// name and id.
    PlayerMismatch { name: String, id: EntityId },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerMismatch { name, id } => {
                write!(f, "player name does not match id (name `{name}`, id {id})")
            }
        }
    }
}

impl Error for ValidationError {}
