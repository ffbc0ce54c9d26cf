//! Data-access layer for the game tracker.
//!
//! Persists players, users, libraries and games in SQLite and rebuilds the
//! library and user aggregates by composing per-entity repositories.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, SqlRow, SqlRows, StorageDriver};
pub use logging::{
    default_log_level, init_logging, logging_status, DiagnosticSink, LogConfig, LogSink,
    WriterSink,
};
pub use model::game::Game;
pub use model::library::Library;
pub use model::player::Player;
pub use model::user::User;
pub use model::{EntityId, EntityKind, UNSAVED_ID};
pub use repo::game_repo::SqliteGameRepository;
pub use repo::library_repo::SqliteLibraryRepository;
pub use repo::player_repo::SqlitePlayerRepository;
pub use repo::user_repo::SqliteUserRepository;
pub use repo::{
    EntityRepository, FindById, LibraryRepository, PlayerRepository, RepoError, RepoResult,
    UserRepository, ValidationError,
};
pub use service::tracker_service::{SqliteTrackerService, TrackerService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
