//! Tests for saved-session persistence and play statistics.

use chrono::{NaiveDate, TimeZone, Utc};
use matrixle::{PuzzleProvider, PuzzleTable, SessionRepository, SessionStore};
use matrixle_core::{CandidateGuess, Session, SessionStatus, reset_session, submit_guess};
use tempfile::NamedTempFile;

const MISS: [i64; 8] = [1, 1, 1, 1, 4, 5, 9, 9];

/// Creates a temporary database file and a repository with migrations
/// applied. The file handle must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SessionRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = SessionRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, d).expect("valid date")
}

/// Plays the built-in puzzle of `date`. `None` entries submit the secret.
fn play(date: NaiveDate, guesses: &[Option<[i64; 8]>]) -> Session {
    let table = PuzzleTable::builtin().expect("builtin table");
    let puzzle = table.puzzle_for_date(date).expect("puzzle");
    let secret = CandidateGuess::from(puzzle.equation().equation());
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

    guesses.iter().fold(reset_session(puzzle), |session, guess| {
        let candidate = match guess {
            Some(values) => CandidateGuess::from_values(*values),
            None => secret,
        };
        submit_guess(&session, &candidate, at).expect("accepted")
    })
}

#[test]
fn test_load_missing_day_is_none() {
    let (_db, repo) = setup_test_db();
    assert!(repo.load_session(day(1)).expect("load").is_none());
}

#[test]
fn test_save_and_load_roundtrip() {
    let (_db, repo) = setup_test_db();
    let session = play(day(1), &[Some(MISS)]);

    repo.save_session(&session).expect("save");
    let loaded = repo.load_session(day(1)).expect("load").expect("saved");

    assert_eq!(loaded, session);
}

#[test]
fn test_save_replaces_same_day() {
    let (_db, repo) = setup_test_db();
    repo.save_session(&play(day(2), &[Some(MISS)])).expect("first save");
    let later = play(day(2), &[Some(MISS), None]);
    repo.save_session(&later).expect("second save");

    let rows = repo.list_sessions().expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].play_date(), "2026-01-02");
    assert_eq!(*rows[0].attempts(), 2);
    assert_eq!(rows[0].status(), "won");
    assert_eq!(*rows[0].puzzle_id(), 2);

    let loaded = repo.load_session(day(2)).expect("load").expect("saved");
    assert_eq!(loaded.status(), SessionStatus::Won);
}

#[test]
fn test_delete_session() {
    let (_db, repo) = setup_test_db();
    repo.save_session(&play(day(1), &[])).expect("save");

    assert!(repo.delete_session(day(1)).expect("delete"));
    assert!(!repo.delete_session(day(1)).expect("second delete"));
    assert!(repo.load_session(day(1)).expect("load").is_none());
}

#[test]
fn test_reopen_keeps_data() {
    let (db, repo) = setup_test_db();
    repo.save_session(&play(day(1), &[Some(MISS)])).expect("save");

    let path = db.path().to_str().expect("Invalid path").to_string();
    let reopened = SessionRepository::open(path).expect("reopen");
    assert!(reopened.load_session(day(1)).expect("load").is_some());
}

#[test]
fn test_repository_as_session_store() {
    let (_db, repo) = setup_test_db();
    let session = play(day(3), &[Some(MISS)]);

    SessionStore::save(&repo, &session).expect("save");
    let loaded = SessionStore::load(&repo, day(3)).expect("load");
    assert_eq!(loaded, Some(session));
}

#[test]
fn test_stats_over_saved_days() {
    let (_db, repo) = setup_test_db();
    repo.save_session(&play(day(1), &[None])).expect("save");
    repo.save_session(&play(day(2), &[Some(MISS), None])).expect("save");
    repo.save_session(&play(day(3), &[Some(MISS); 6])).expect("save");
    repo.save_session(&play(day(4), &[Some(MISS)])).expect("save");

    let stats = repo.stats().expect("stats");
    assert_eq!(*stats.played(), 3);
    assert_eq!(*stats.wins(), 2);
    assert_eq!(*stats.losses(), 1);
    assert_eq!(*stats.in_progress(), 1);
    assert_eq!(*stats.distribution(), [1, 1, 0, 0, 0, 0]);
    assert_eq!(*stats.max_streak(), 2);
    assert_eq!(*stats.current_streak(), 0);
}

#[test]
fn test_stats_on_empty_database() {
    let (_db, repo) = setup_test_db();
    let stats = repo.stats().expect("stats");
    assert_eq!(*stats.played(), 0);
    assert_eq!(stats.win_rate(), 0.0);
}
