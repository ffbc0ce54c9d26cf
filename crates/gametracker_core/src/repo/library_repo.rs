//! Library repository over a storage driver.
//!
//! # Responsibility
//! - Persist library rows.
//! - Hydrate a library with its owning user and its games.
//!
//! # Invariants
//! - Hydrated games are ordered by ascending game id (insertion order).
//! - Removing a library leaves its games in place.
//! - The owning user is not checked here; the `libraries.user_id` foreign
//!   key rejects unknown users.

use crate::db::StorageDriver;
use crate::model::game::Game;
use crate::model::library::Library;
use crate::model::user::User;
use crate::model::{EntityId, EntityKind};
use crate::repo::game_repo::SqliteGameRepository;
use crate::repo::player_repo::SqlitePlayerRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::{single_row, EntityRepository, FindById, LibraryRepository, RepoResult};
use rusqlite::params;

/// SQL-backed [`LibraryRepository`], composed with user and game lookups.
#[derive(Clone, Copy)]
pub struct SqliteLibraryRepository<'d, U, G> {
    driver: &'d dyn StorageDriver,
    users: U,
    games: G,
}

impl<'d, U, G> SqliteLibraryRepository<'d, U, G>
where
    U: FindById<Entity = User>,
    G: FindById<Entity = Game>,
{
    pub fn new(driver: &'d dyn StorageDriver, users: U, games: G) -> Self {
        Self {
            driver,
            users,
            games,
        }
    }
}

impl<'d>
    SqliteLibraryRepository<
        'd,
        SqliteUserRepository<'d, SqlitePlayerRepository<'d>>,
        SqliteGameRepository<'d>,
    >
{
    /// Wires libraries, users, players and games to the same driver.
    pub fn with_driver(driver: &'d dyn StorageDriver) -> Self {
        Self::new(
            driver,
            SqliteUserRepository::with_driver(driver),
            SqliteGameRepository::new(driver),
        )
    }
}

impl<U, G> FindById for SqliteLibraryRepository<'_, U, G>
where
    U: FindById<Entity = User>,
    G: FindById<Entity = Game>,
{
    type Entity = Library;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Library> {
        let rows = self.driver.query(
            "SELECT user_id FROM libraries WHERE id = ?1 LIMIT 1;",
            params![id],
        )?;
        let user_id: EntityId = single_row(rows, EntityKind::Library, id)?.get("user_id")?;
        let user = self.users.find_by_id(user_id)?;

        let game_rows = self.driver.query(
            "SELECT id FROM games WHERE library_id = ?1 ORDER BY id ASC;",
            params![id],
        )?;
        let games = game_rows
            .map(|row| -> RepoResult<Game> {
                let game_id: EntityId = row.get("id")?;
                self.games.find_by_id(game_id)
            })
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(Library { id, user, games })
    }
}

impl<U, G> EntityRepository for SqliteLibraryRepository<'_, U, G>
where
    U: FindById<Entity = User>,
    G: FindById<Entity = Game>,
{
    fn store(&self, library: &Library) -> RepoResult<EntityId> {
        let id = self.driver.query_scalar_int(
            "INSERT INTO libraries (user_id) VALUES (?1) RETURNING id;",
            params![library.user.id],
        )?;
        Ok(id)
    }

    fn remove(&self, library: &Library) -> RepoResult<()> {
        self.driver
            .execute("DELETE FROM libraries WHERE id = ?1;", params![library.id])?;
        Ok(())
    }
}

impl<U, G> LibraryRepository for SqliteLibraryRepository<'_, U, G>
where
    U: FindById<Entity = User>,
    G: FindById<Entity = Game>,
{
    fn library_exists(&self, id: EntityId) -> RepoResult<bool> {
        let exists = self.driver.query_scalar_int(
            "SELECT EXISTS(SELECT 1 FROM libraries WHERE id = ?1);",
            params![id],
        )?;
        Ok(exists == 1)
    }
}
