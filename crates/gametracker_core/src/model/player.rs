//! Player record.

use super::{EntityId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

/// A named player. Names are unique among stored players.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
}

impl Player {
    /// Creates an unsaved player; the store assigns the id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(UNSAVED_ID, name)
    }

    /// Creates a reference to an already stored player.
    pub fn with_id(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
