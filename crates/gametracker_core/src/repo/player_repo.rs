//! Player repository over a storage driver.
//!
//! # Invariants
//! - `store` is idempotent by name and never rewrites an existing row.
//! - Players are never deleted through this repository.

use crate::db::StorageDriver;
use crate::model::player::Player;
use crate::model::{EntityId, EntityKind};
use crate::repo::{single_row, FindById, PlayerRepository, RepoResult};
use rusqlite::params;

/// SQL-backed [`PlayerRepository`].
#[derive(Clone, Copy)]
pub struct SqlitePlayerRepository<'d> {
    driver: &'d dyn StorageDriver,
}

impl<'d> SqlitePlayerRepository<'d> {
    pub fn new(driver: &'d dyn StorageDriver) -> Self {
        Self { driver }
    }
}

impl FindById for SqlitePlayerRepository<'_> {
    type Entity = Player;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Player> {
        let rows = self.driver.query(
            "SELECT player_name FROM players WHERE id = ?1 LIMIT 1;",
            params![id],
        )?;
        let row = single_row(rows, EntityKind::Player, id)?;

        Ok(Player {
            id,
            name: row.get("player_name")?,
        })
    }
}

impl PlayerRepository for SqlitePlayerRepository<'_> {
    fn store(&self, player: &Player) -> RepoResult<()> {
        if self.player_exists(&player.name)? {
            return Ok(());
        }

        self.driver.execute(
            "INSERT INTO players (player_name) VALUES (?1);",
            params![player.name],
        )?;
        Ok(())
    }

    fn name_matches_id(&self, name: &str, id: EntityId) -> RepoResult<bool> {
        let matched = self.driver.query_scalar_int(
            "SELECT EXISTS(
                SELECT 1
                FROM players
                WHERE id = ?1 AND player_name = ?2
            );",
            params![id, name],
        )?;
        Ok(matched == 1)
    }

    fn player_exists(&self, name: &str) -> RepoResult<bool> {
        let exists = self.driver.query_scalar_int(
            "SELECT EXISTS(SELECT 1 FROM players WHERE player_name = ?1);",
            params![name],
        )?;
        Ok(exists == 1)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Player>> {
        let mut rows = self.driver.query(
            "SELECT id, player_name FROM players WHERE player_name = ?1 LIMIT 1;",
            params![name],
        )?;
        let Some(row) = rows.next_row() else {
            return Ok(None);
        };

        Ok(Some(Player {
            id: row.get("id")?,
            name: row.get("player_name")?,
        }))
    }
}
