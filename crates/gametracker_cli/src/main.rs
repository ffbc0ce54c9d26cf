//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gametracker_core` linkage against a real database.
//! - Walk one player → user → library → game flow and report each step.
//!
//! Usage: `gametracker_cli [DB_PATH]` (in-memory when omitted). Set
//! `GAMETRACKER_LOG_DIR` to an absolute path to enable file logging.

use gametracker_core::{
    default_log_level, init_logging, open_db, open_db_in_memory, DiagnosticSink, LogConfig,
    RepoError, SqliteTrackerService, WriterSink,
};
use log::error;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "GAMETRACKER_LOG_DIR";

fn main() -> ExitCode {
    let sink = WriterSink::stdout();
    sink.log(&format!(
        "gametracker_core version={}",
        gametracker_core::core_version()
    ));

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(&LogConfig::new(default_log_level(), log_dir)) {
            sink.log(&format!("logging disabled: {err}"));
        }
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            sink.log(&format!("failed to open database: {err}"));
            return ExitCode::FAILURE;
        }
    };

    match run_smoke(&SqliteTrackerService::with_driver(&conn), &sink) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=smoke_run module=cli status=error error={err}");
            sink.log(&format!("smoke run failed: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn run_smoke(
    service: &SqliteTrackerService<'_>,
    sink: &dyn DiagnosticSink,
) -> Result<(), RepoError> {
    let player = service.register_player("alice")?;
    sink.log(&format!("player id={} name={}", player.id, player.name));

    let user = service.register_user("alice_u", player, "hi")?;
    sink.log(&format!(
        "user id={} name={} player={}",
        user.id, user.name, user.player.name
    ));

    let info = service.update_info(&user, "bye")?;
    sink.log(&format!("user id={} personal_info={info}", user.id));

    let library = service.open_library(&user)?;
    let game = service.add_game(library.id, "Chess", "X", b"9.99")?;
    sink.log(&format!(
        "game id={} name={} producer={} value={}",
        game.id,
        game.name,
        game.producer,
        String::from_utf8_lossy(&game.value)
    ));

    let library = service.library(library.id)?;
    sink.log(&format!(
        "library id={} owner={} games={}",
        library.id,
        library.user.name,
        library.games.len()
    ));
    Ok(())
}
