//! Domain records for players, users, libraries and games.
//!
//! # Responsibility
//! - Define the plain data shapes the repositories persist and hydrate.
//!
//! # Invariants
//! - Every stored record is identified by a positive `EntityId`.
//! - An id of `0` means the record has not been stored yet.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod game;
pub mod library;
pub mod player;
pub mod user;

/// Row identifier assigned by the store.
pub type EntityId = i64;

/// Identifier carried by records that have not been stored yet.
pub const UNSAVED_ID: EntityId = 0;

/// Entity categories, used to label lookups in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    User,
    Library,
    Game,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::User => "user",
            Self::Library => "library",
            Self::Game => "game",
        };
        f.write_str(name)
    }
}
