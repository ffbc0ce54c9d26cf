//! Repository contracts and SQL-backed implementations.
//!
//! # Responsibility
//! - Translate entity operations into parameterized SQL and back.
//! - Rebuild aggregates (user + player, library + user + games) by composing
//!   repositories instead of joining in SQL.
//!
//! # Invariants
//! - Single-row lookups report a missing row as `RepoError::NotFound`.
//! - `remove` on an id with no row is a successful no-op.
//! - Multi-statement reads are not transactional; a row vanishing mid-read
//!   surfaces as `NotFound` rather than being skipped.

pub mod error;
pub mod game_repo;
pub mod library_repo;
pub mod player_repo;
pub mod user_repo;

pub use error::{RepoError, RepoResult, ValidationError};

use crate::db::{SqlRow, SqlRows};
use crate::model::library::Library;
use crate::model::player::Player;
use crate::model::user::User;
use crate::model::{EntityId, EntityKind};

/// Lookup shared by every repository.
pub trait FindById {
    type Entity;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Self::Entity>;
}

/// Common `{store, remove, find_by_id}` shape for users, libraries and games.
///
/// `store` ignores `entity.id` and returns the id assigned by the store.
pub trait EntityRepository: FindById {
    fn store(&self, entity: &Self::Entity) -> RepoResult<EntityId>;
    fn remove(&self, entity: &Self::Entity) -> RepoResult<()>;
}

/// Player persistence. Players are upserted by name and never removed.
pub trait PlayerRepository: FindById<Entity = Player> {
    /// Inserts the player unless one with the same name already exists.
    fn store(&self, player: &Player) -> RepoResult<()>;
    /// Returns whether a stored player matches both `name` and `id`.
    fn name_matches_id(&self, name: &str, id: EntityId) -> RepoResult<bool>;
    fn player_exists(&self, name: &str) -> RepoResult<bool>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Player>>;
}

pub trait UserRepository: EntityRepository<Entity = User> {
    fn user_existed(&self, name: &str) -> RepoResult<bool>;
    fn store_info(&self, user: &User, info: &str) -> RepoResult<()>;
    fn load_info(&self, user: &User) -> RepoResult<String>;
}

pub trait LibraryRepository: EntityRepository<Entity = Library> {
    fn library_exists(&self, id: EntityId) -> RepoResult<bool>;
}

impl<T: FindById + ?Sized> FindById for &T {
    type Entity = T::Entity;

    fn find_by_id(&self, id: EntityId) -> RepoResult<Self::Entity> {
        (**self).find_by_id(id)
    }
}

impl<T: EntityRepository + ?Sized> EntityRepository for &T {
    fn store(&self, entity: &Self::Entity) -> RepoResult<EntityId> {
        (**self).store(entity)
    }

    fn remove(&self, entity: &Self::Entity) -> RepoResult<()> {
        (**self).remove(entity)
    }
}

impl<T: PlayerRepository + ?Sized> PlayerRepository for &T {
    fn store(&self, player: &Player) -> RepoResult<()> {
        (**self).store(player)
    }

    fn name_matches_id(&self, name: &str, id: EntityId) -> RepoResult<bool> {
        (**self).name_matches_id(name, id)
    }

    fn player_exists(&self, name: &str) -> RepoResult<bool> {
        (**self).player_exists(name)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Player>> {
        (**self).find_by_name(name)
    }
}

impl<T: UserRepository + ?Sized> UserRepository for &T {
    fn user_existed(&self, name: &str) -> RepoResult<bool> {
        (**self).user_existed(name)
    }

    fn store_info(&self, user: &User, info: &str) -> RepoResult<()> {
        (**self).store_info(user, info)
    }

    fn load_info(&self, user: &User) -> RepoResult<String> {
        (**self).load_info(user)
    }
}

/// Takes the first row of a single-row lookup or reports the id as missing.
pub(crate) fn single_row(
    mut rows: SqlRows,
    entity: EntityKind,
    id: EntityId,
) -> RepoResult<SqlRow> {
    rows.next_row()
        .ok_or_else(|| RepoError::not_found(entity, id))
}
