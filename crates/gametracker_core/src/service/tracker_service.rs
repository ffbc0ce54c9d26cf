//! Game tracker use-case service.
//!
//! # Responsibility
//! - Offer caller-level flows (register, open library, add game) on top of
//!   the repositories, returning hydrated records.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Steps run sequentially without a surrounding transaction.

use crate::db::StorageDriver;
use crate::model::game::Game;
use crate::model::library::Library;
use crate::model::player::Player;
use crate::model::user::User;
use crate::model::EntityId;
use crate::repo::game_repo::SqliteGameRepository;
use crate::repo::library_repo::SqliteLibraryRepository;
use crate::repo::player_repo::SqlitePlayerRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::{
    EntityRepository, LibraryRepository, PlayerRepository, RepoError, RepoResult,
    UserRepository,
};
use log::debug;

/// Use-case wrapper over the four repositories.
pub struct TrackerService<P, U, L, G> {
    players: P,
    users: U,
    libraries: L,
    games: G,
}

/// Service with every repository backed by one driver.
pub type SqliteTrackerService<'d> = TrackerService<
    SqlitePlayerRepository<'d>,
    SqliteUserRepository<'d, SqlitePlayerRepository<'d>>,
    SqliteLibraryRepository<
        'd,
        SqliteUserRepository<'d, SqlitePlayerRepository<'d>>,
        SqliteGameRepository<'d>,
    >,
    SqliteGameRepository<'d>,
>;

impl<'d> SqliteTrackerService<'d> {
    pub fn with_driver(driver: &'d dyn StorageDriver) -> Self {
        Self::new(
            SqlitePlayerRepository::new(driver),
            SqliteUserRepository::with_driver(driver),
            SqliteLibraryRepository::with_driver(driver),
            SqliteGameRepository::new(driver),
        )
    }
}

impl<P, U, L, G> TrackerService<P, U, L, G>
where
    P: PlayerRepository,
    U: UserRepository,
    L: LibraryRepository,
    G: EntityRepository<Entity = Game>,
{
    pub fn new(players: P, users: U, libraries: L, games: G) -> Self {
        Self {
            players,
            users,
            libraries,
            games,
        }
    }

    /// Stores a player by name (reusing an existing one) and returns it with
    /// its stored id.
    pub fn register_player(&self, name: &str) -> RepoResult<Player> {
        self.players.store(&Player::new(name))?;
        let player = self.players.find_by_name(name)?.ok_or_else(|| {
            RepoError::InvalidData(format!("player `{name}` missing right after store"))
        })?;
        debug!(
            "event=player_registered module=service status=ok player_id={}",
            player.id
        );
        Ok(player)
    }

    /// Stores a user for an already registered player and returns it
    /// hydrated.
    pub fn register_user(
        &self,
        name: &str,
        player: Player,
        personal_info: &str,
    ) -> RepoResult<User> {
        let id = self
            .users
            .store(&User::new(name, player, personal_info))?;
        debug!("event=user_registered module=service status=ok user_id={id}");
        self.users.find_by_id(id)
    }

    /// Replaces a user's personal info and returns the stored value.
    pub fn update_info(&self, user: &User, info: &str) -> RepoResult<String> {
        self.users.store_info(user, info)?;
        self.users.load_info(user)
    }

    /// Creates an empty library for `user` and returns it hydrated.
    pub fn open_library(&self, user: &User) -> RepoResult<Library> {
        let id = self.libraries.store(&Library::new(user.clone()))?;
        debug!(
            "event=library_opened module=service status=ok library_id={id} user_id={}",
            user.id
        );
        self.libraries.find_by_id(id)
    }

    /// Files a new game under `library_id` and returns it as stored.
    pub fn add_game(
        &self,
        library_id: EntityId,
        name: &str,
        producer: &str,
        value: &[u8],
    ) -> RepoResult<Game> {
        let id = self
            .games
            .store(&Game::new(library_id, name, producer, value))?;
        debug!("event=game_added module=service status=ok game_id={id} library_id={library_id}");
        self.games.find_by_id(id)
    }

    /// Loads a library with its user and games.
    pub fn library(&self, id: EntityId) -> RepoResult<Library> {
        self.libraries.find_by_id(id)
    }

    /// Removes a game by id; unknown ids are a no-op.
    pub fn remove_game(&self, game: &Game) -> RepoResult<()> {
        self.games.remove(game)
    }
}
