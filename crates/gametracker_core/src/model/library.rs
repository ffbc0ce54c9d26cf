//! Library aggregate: one user plus the games filed under it.

use super::game::Game;
use super::user::User;
use super::{EntityId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

/// A user's game collection.
///
/// `games` is ordered by insertion (ascending game id) when hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Library {
    pub id: EntityId,
    pub user: User,
    pub games: Vec<Game>,
}

impl Library {
    /// Creates an unsaved, empty library owned by `user`.
    pub fn new(user: User) -> Self {
        Self {
            id: UNSAVED_ID,
            user,
            games: Vec::new(),
        }
    }

    /// Returns whether the library holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
