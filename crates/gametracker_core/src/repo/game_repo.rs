//! Game repository over a storage driver.

use crate::db::StorageDriver;
use crate::model::game::Game;
use crate::model::{EntityId, EntityKind};
use crate::repo::{single_row, EntityRepository, FindById, RepoResult};
use rusqlite::params;

/// SQL-backed game repository.
#[derive(Clone, Copy)]
pub struct SqliteGameRepository<'d> {
    driver: &'d dyn StorageDriver,
}

impl<'d> SqliteGameRepository<'d> {
    pub fn new(driver: &'d dyn StorageDriver) -> Self {
        Self { driver }
    }
}

impl FindById for SqliteGameRepository<'_> {
    type Entity = Game;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Game> {
        let rows = self.driver.query(
            "SELECT library_id, game_name, producer, value
             FROM games
             WHERE id = ?1
             LIMIT 1;",
            params![id],
        )?;
        let row = single_row(rows, EntityKind::Game, id)?;

        Ok(Game {
            id,
            library_id: row.get("library_id")?,
            name: row.get("game_name")?,
            producer: row.get("producer")?,
            value: row.get("value")?,
        })
    }
}

impl EntityRepository for SqliteGameRepository<'_> {
    fn store(&self, game: &Game) -> RepoResult<EntityId> {
        let id = self.driver.query_scalar_int(
            "INSERT INTO games (library_id, game_name, producer, value)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id;",
            params![game.library_id, game.name, game.producer, game.value],
        )?;
        Ok(id)
    }

    fn remove(&self, game: &Game) -> RepoResult<()> {
        self.driver
            .execute("DELETE FROM games WHERE id = ?1;", params![game.id])?;
        Ok(())
    }
}
