use gametracker_core::db::open_db_in_memory;
use gametracker_core::{
    DbError, DbResult, EntityId, EntityKind, EntityRepository, FindById, Game, Library,
    LibraryRepository, Player, PlayerRepository, RepoError, SqlRows, SqliteGameRepository,
    SqliteLibraryRepository, SqlitePlayerRepository, SqliteUserRepository, StorageDriver, User,
};
use rusqlite::{Connection, ToSql};
use std::cell::Cell;

#[test]
fn empty_library_hydrates_user_and_no_games() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let user = stored_user(&conn);

    let id = libraries.store(&Library::new(user.clone())).unwrap();
    let library = libraries.find_by_id(id).unwrap();

    assert_eq!(library.id, id);
    assert_eq!(library.user, user);
    assert!(library.is_empty());
}

#[test]
fn library_games_come_back_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let games = SqliteGameRepository::new(&conn);
    let user = stored_user(&conn);
    let library_id = libraries.store(&Library::new(user.clone())).unwrap();
    let other_library = libraries.store(&Library::new(user)).unwrap();

    let mut expected = Vec::new();
    for (name, price) in [("Go", "1.00"), ("Chess", "9.99"), ("Shogi", "4.50")] {
        let mut game = Game::new(library_id, name, "X", price);
        game.id = games.store(&game).unwrap();
        games
            .store(&Game::new(other_library, "noise", "Y", "0"))
            .unwrap();
        expected.push(game);
    }

    let library = libraries.find_by_id(library_id).unwrap();
    assert_eq!(library.games, expected);
}

#[test]
fn game_roundtrip_preserves_raw_value_bytes() {
    let conn = open_db_in_memory().unwrap();
    let games = SqliteGameRepository::new(&conn);

    let binary = Game::new(3, "Chess", "Producer \u{00e9}", vec![0x00_u8, 0xff, 0x39, 0x2e]);
    let id = games.store(&binary).unwrap();
    let loaded = games.find_by_id(id).unwrap();
    assert_eq!(loaded.library_id, 3);
    assert_eq!(loaded.name, "Chess");
    assert_eq!(loaded.producer, "Producer \u{00e9}");
    assert_eq!(loaded.value, vec![0x00, 0xff, 0x39, 0x2e]);

    let empty = Game::new(3, "Free", "Nobody", Vec::<u8>::new());
    let empty_id = games.store(&empty).unwrap();
    assert!(games.find_by_id(empty_id).unwrap().value.is_empty());
}

#[test]
fn game_remove_is_idempotent_and_find_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let games = SqliteGameRepository::new(&conn);
    let mut game = Game::new(1, "Chess", "X", "9.99");
    game.id = games.store(&game).unwrap();

    games.remove(&game).unwrap();
    games.remove(&game).unwrap();

    assert!(matches!(
        games.find_by_id(game.id).unwrap_err(),
        RepoError::NotFound {
            entity: EntityKind::Game,
            ..
        }
    ));
}

#[test]
fn removing_library_does_not_cascade_to_games() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let games = SqliteGameRepository::new(&conn);
    let mut library = Library::new(stored_user(&conn));
    library.id = libraries.store(&library).unwrap();
    let game_id = games
        .store(&Game::new(library.id, "Chess", "X", "9.99"))
        .unwrap();

    libraries.remove(&library).unwrap();
    libraries.remove(&library).unwrap();

    assert!(!libraries.library_exists(library.id).unwrap());
    assert!(libraries.find_by_id(library.id).unwrap_err().is_not_found());
    assert_eq!(games.find_by_id(game_id).unwrap().library_id, library.id);
}

#[test]
fn library_lookup_of_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);

    assert!(matches!(
        libraries.find_by_id(12).unwrap_err(),
        RepoError::NotFound {
            entity: EntityKind::Library,
            id: 12
        }
    ));
}

#[test]
fn storing_library_for_unknown_user_fails_in_the_store() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let orphan = User::new("nobody", Player::with_id(1, "alice"), "").stored_as(500);

    assert!(matches!(
        libraries.store(&Library::new(orphan)).unwrap_err(),
        RepoError::Db(DbError::Sqlite(_))
    ));
}

#[test]
fn removing_user_who_owns_a_library_is_rejected_by_the_store() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let users = SqliteUserRepository::with_driver(&conn);
    let user = stored_user(&conn);
    libraries.store(&Library::new(user.clone())).unwrap();

    assert!(matches!(
        users.remove(&user).unwrap_err(),
        RepoError::Db(DbError::Sqlite(_))
    ));
}

#[test]
fn repositories_can_be_wired_to_separate_drivers() {
    let conn = open_db_in_memory().unwrap();
    let games_conn = open_db_in_memory().unwrap();
    let game_repo = SqliteGameRepository::new(&games_conn);
    let libraries =
        SqliteLibraryRepository::new(&conn, SqliteUserRepository::with_driver(&conn), game_repo);
    let library_id = libraries.store(&Library::new(stored_user(&conn))).unwrap();

    // The games table consulted for the id list lives on `conn`, the rows
    // themselves on `games_conn`.
    let game_id = game_repo
        .store(&Game::new(library_id, "Chess", "X", "9.99"))
        .unwrap();
    conn.execute(
        "INSERT INTO games (id, library_id, game_name, producer, value)
         VALUES (?1, ?2, 'shadow', 'shadow', x'00');",
        rusqlite::params![game_id, library_id],
    )
    .unwrap();

    let library = libraries.find_by_id(library_id).unwrap();
    assert_eq!(library.games.len(), 1);
    assert_eq!(library.games[0].name, "Chess");
}

#[test]
fn game_removed_mid_hydration_surfaces_as_not_found() {
    let conn = open_db_in_memory().unwrap();
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let games = SqliteGameRepository::new(&conn);
    let library_id = libraries.store(&Library::new(stored_user(&conn))).unwrap();
    games
        .store(&Game::new(library_id, "Go", "X", "1"))
        .unwrap();
    let doomed = games
        .store(&Game::new(library_id, "Chess", "X", "2"))
        .unwrap();

    let racing = RacingDriver {
        conn: &conn,
        doomed_game: doomed,
        fired: Cell::new(false),
    };
    let torn = SqliteLibraryRepository::with_driver(&racing);

    assert!(matches!(
        torn.find_by_id(library_id).unwrap_err(),
        RepoError::NotFound {
            entity: EntityKind::Game,
            id
        } if id == doomed
    ));
    assert!(racing.fired.get());
}

/// Deletes one game right after the library's game-id list is read.
struct RacingDriver<'c> {
    conn: &'c Connection,
    doomed_game: EntityId,
    fired: Cell<bool>,
}

impl StorageDriver for RacingDriver<'_> {
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
        self.conn.execute(sql, params).map_err(DbError::from)
    }

    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<SqlRows> {
        let rows = StorageDriver::query(self.conn, sql, params)?;
        if sql.contains("FROM games WHERE library_id") && !self.fired.replace(true) {
            self.conn
                .execute("DELETE FROM games WHERE id = ?1;", [self.doomed_game])?;
        }
        Ok(rows)
    }

    fn query_scalar_int(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<i64> {
        StorageDriver::query_scalar_int(self.conn, sql, params)
    }
}

fn stored_user(conn: &Connection) -> User {
    SqlitePlayerRepository::new(conn)
        .store(&Player::new("alice"))
        .unwrap();
    let user = User::new("alice_u", Player::with_id(1, "alice"), "hi");
    let id = SqliteUserRepository::with_driver(conn)
        .store(&user)
        .unwrap();
    user.stored_as(id)
}
