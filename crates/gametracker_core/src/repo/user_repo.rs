//! User repository over a storage driver.
//!
//! # Responsibility
//! - Persist users and hydrate their player through a `PlayerRepository`.
//!
//! # Invariants
//! - A user is inserted only after its player reference matched a stored
//!   player by both name and id.
//! - Reads return the player as currently stored, not as referenced at
//!   insert time.

use crate::db::StorageDriver;
use crate::model::user::User;
use crate::model::{EntityId, EntityKind};
use crate::repo::player_repo::SqlitePlayerRepository;
use crate::repo::{
    single_row, EntityRepository, FindById, PlayerRepository, RepoError, RepoResult,
    UserRepository, ValidationError,
};
use rusqlite::params;

/// SQL-backed [`UserRepository`], composed with a player repository.
#[derive(Clone, Copy)]
pub struct SqliteUserRepository<'d, P> {
    driver: &'d dyn StorageDriver,
    players: P,
}

impl<'d, P: PlayerRepository> SqliteUserRepository<'d, P> {
    pub fn new(driver: &'d dyn StorageDriver, players: P) -> Self {
        Self { driver, players }
    }
}

impl<'d> SqliteUserRepository<'d, SqlitePlayerRepository<'d>> {
    /// Wires users and players to the same driver.
    pub fn with_driver(driver: &'d dyn StorageDriver) -> Self {
        Self::new(driver, SqlitePlayerRepository::new(driver))
    }
}

impl<P: PlayerRepository> FindById for SqliteUserRepository<'_, P> {
    type Entity = User;

    fn find_by_id(&self, id: EntityId) -> RepoResult<User> {
        let rows = self.driver.query(
            "SELECT user_name, player_id, personal_info
             FROM users
             WHERE id = ?1
             LIMIT 1;",
            params![id],
        )?;
        let row = single_row(rows, EntityKind::User, id)?;
        let player_id: EntityId = row.get("player_id")?;
        let player = self.players.find_by_id(player_id)?;

        Ok(User {
            id,
            name: row.get("user_name")?,
            player,
            personal_info: row.get("personal_info")?,
        })
    }
}

impl<P: PlayerRepository> EntityRepository for SqliteUserRepository<'_, P> {
    fn store(&self, user: &User) -> RepoResult<EntityId> {
        let player = &user.player;
        if !self.players.name_matches_id(&player.name, player.id)? {
            return Err(ValidationError::PlayerMismatch {
                name: player.name.clone(),
                id: player.id,
            }
            .into());
        }

        let id = self.driver.query_scalar_int(
            "INSERT INTO users (user_name, player_id, personal_info)
             VALUES (?1, ?2, ?3)
             RETURNING id;",
            params![user.name, player.id, user.personal_info],
        )?;

        // Player already matched above, so this only confirms the row.
        self.players.store(player)?;
        Ok(id)
    }

    fn remove(&self, user: &User) -> RepoResult<()> {
        self.driver
            .execute("DELETE FROM users WHERE id = ?1;", params![user.id])?;
        Ok(())
    }
}

impl<P: PlayerRepository> UserRepository for SqliteUserRepository<'_, P> {
    fn user_existed(&self, name: &str) -> RepoResult<bool> {
        let exists = self.driver.query_scalar_int(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = ?1);",
            params![name],
        )?;
        Ok(exists == 1)
    }

    fn store_info(&self, user: &User, info: &str) -> RepoResult<()> {
        let changed = self.driver.execute(
            "UPDATE users SET personal_info = ?1 WHERE id = ?2;",
            params![info, user.id],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::User, user.id));
        }

        Ok(())
    }

    fn load_info(&self, user: &User) -> RepoResult<String> {
        let rows = self.driver.query(
            "SELECT personal_info FROM users WHERE id = ?1 LIMIT 1;",
            params![user.id],
        )?;
        let row = single_row(rows, EntityKind::User, user.id)?;
        Ok(row.get("personal_info")?)
    }
}
