//! User record.
//!
//! # Invariants
//! - `player` must name a stored player by both id and name before the user
//!   can be stored.

use super::player::Player;
use super::{EntityId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

/// An account that plays as exactly one [`Player`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub player: Player,
    /// Free-form profile text; opaque to the store.
    pub personal_info: String,
}

impl User {
    pub fn new(name: impl Into<String>, player: Player, personal_info: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            player,
            personal_info: personal_info.into(),
        }
    }

    /// Returns a copy of this user carrying the id the store assigned.
    pub fn stored_as(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}
