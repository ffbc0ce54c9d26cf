use gametracker_core::db::open_db_in_memory;
use gametracker_core::{
    DiagnosticSink, EntityKind, EntityRepository, FindById, Game, Library, Player,
    PlayerRepository, RepoError, SqliteGameRepository, SqliteLibraryRepository,
    SqlitePlayerRepository, SqliteTrackerService, SqliteUserRepository, User, UserRepository,
    WriterSink,
};

#[test]
fn player_user_library_game_flow_through_repositories() {
    let conn = open_db_in_memory().unwrap();
    let players = SqlitePlayerRepository::new(&conn);
    let users = SqliteUserRepository::with_driver(&conn);
    let libraries = SqliteLibraryRepository::with_driver(&conn);
    let games = SqliteGameRepository::new(&conn);

    players.store(&Player::new("alice")).unwrap();
    let user_id = users
        .store(&User::new("alice_u", Player::with_id(1, "alice"), "hi"))
        .unwrap();
    assert_eq!(user_id, 1);

    let user = users.find_by_id(user_id).unwrap();
    assert_eq!(user.player.name, "alice");

    users.store_info(&user, "bye").unwrap();
    assert_eq!(users.load_info(&user).unwrap(), "bye");

    let library_id = libraries.store(&Library::new(user)).unwrap();
    let mut chess = Game::new(library_id, "Chess", "X", "9.99");
    chess.id = games.store(&chess).unwrap();

    let library = libraries.find_by_id(library_id).unwrap();
    assert_eq!(library.games, vec![chess]);
    assert_eq!(library.games[0].value, b"9.99".to_vec());
    assert_eq!(library.user.personal_info, "bye");
}

#[test]
fn service_runs_the_same_flow_and_hydrates_each_step() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::with_driver(&conn);

    let player = service.register_player("alice").unwrap();
    assert_eq!(player, Player::with_id(1, "alice"));
    assert_eq!(service.register_player("alice").unwrap().id, 1);

    let user = service.register_user("alice_u", player, "hi").unwrap();
    assert_eq!(user.player.name, "alice");
    assert_eq!(service.update_info(&user, "bye").unwrap(), "bye");

    let library = service.open_library(&user).unwrap();
    assert!(library.games.is_empty());
    assert_eq!(library.user.id, user.id);

    let go = service.add_game(library.id, "Go", "Nihon", b"1.00").unwrap();
    let chess = service.add_game(library.id, "Chess", "X", b"9.99").unwrap();

    let hydrated = service.library(library.id).unwrap();
    assert_eq!(hydrated.games, vec![go.clone(), chess]);

    service.remove_game(&go).unwrap();
    service.remove_game(&go).unwrap();
    assert_eq!(service.library(library.id).unwrap().games.len(), 1);
}

#[test]
fn service_keeps_repository_validation() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::with_driver(&conn);
    service.register_player("alice").unwrap();

    let err = service
        .register_user("mallory", Player::with_id(1, "mallory"), "")
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(matches!(
        service.library(3).unwrap_err(),
        RepoError::NotFound {
            entity: EntityKind::Library,
            id: 3
        }
    ));
}

#[test]
fn diagnostic_sink_reports_flow_results() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteTrackerService::with_driver(&conn);
    let sink = WriterSink::new(Vec::new());

    let player = service.register_player("alice").unwrap();
    let user = service.register_user("alice_u", player, "hi").unwrap();
    let library = service.open_library(&user).unwrap();
    sink.log(&format!("library id={} owner={}", library.id, library.user.name));

    let written = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(written, "library id=1 owner=alice_u\n");
}

#[test]
fn entities_serialize_with_raw_value_bytes() {
    let game = Game::new(2, "Chess", "X", "9.99");
    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["library_id"], 2);
    assert_eq!(json["value"], serde_json::json!([57, 46, 57, 57]));

    let back: Game = serde_json::from_value(json).unwrap();
    assert_eq!(back, game);

    assert_eq!(
        serde_json::to_value(EntityKind::Library).unwrap(),
        serde_json::json!("library")
    );
}
