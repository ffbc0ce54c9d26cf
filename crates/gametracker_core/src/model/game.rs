//! Game record.

use super::{EntityId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

/// One game filed under a library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    pub id: EntityId,
    pub library_id: EntityId,
    pub name: String,
    pub producer: String,
    /// Raw value payload (e.g. a serialized price). Round-trips byte-exact.
    pub value: Vec<u8>,
}

impl Game {
    /// Creates an unsaved game under `library_id`.
    pub fn new(
        library_id: EntityId,
        name: impl Into<String>,
        producer: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            library_id,
            name: name.into(),
            producer: producer.into(),
            value: value.into(),
        }
    }
}
