mod common;
use chrono::TimeDelta;
use common::{sidecar_of, temp_table, test_config, write_raw};
use keymark::core::history::DeleteTarget;
use keymark::core::journal::read_journal;
use keymark::core::session::Session;
use keymark::errors::AppError;
use keymark::models::entry::LogEntry;
use keymark::models::policy::DuplicatePolicy;

#[test]
fn test_record_applies_configured_start_time() {
    let path = temp_table("session_start_cfg");
    let mut cfg = test_config();
    cfg.default_start_time = Some("000130".into());

    let mut session = Session::create(&cfg, &path).unwrap();
    let entry = session.record("a", 1500.0).unwrap().unwrap();

    assert_eq!(entry, LogEntry::new("a", "00:01:31:500"));
    assert_eq!(session.entries().unwrap(), vec![entry]);
}

#[test]
fn test_start_offset_is_set_once() {
    let path = temp_table("session_start_once");
    let mut session = Session::create(&test_config(), &path).unwrap();
    assert!(!session.is_start_fixed());

    session.set_start_offset(TimeDelta::seconds(10)).unwrap();
    assert!(matches!(
        session.set_start_offset(TimeDelta::seconds(20)),
        Err(AppError::Other(_))
    ));
    assert_eq!(session.start_offset(), TimeDelta::seconds(10));

    let rec = session.record_at_frame("k", 60, 30.0).unwrap().unwrap();
    assert_eq!(rec.timestamp, "00:00:12:000");
}

#[test]
fn test_start_offset_is_fixed_by_the_first_record() {
    let path = temp_table("session_start_after_record");
    let mut session = Session::create(&test_config(), &path).unwrap();
    session.record("a", 1000.0).unwrap();
    assert!(session.is_start_fixed());

    assert!(matches!(
        session.set_start_offset(TimeDelta::hours(1)),
        Err(AppError::Other(_))
    ));

    let b = session.record("b", 2000.0).unwrap().unwrap();
    assert_eq!(b.timestamp, "00:00:02:000");

    // still fixed after deleting everything, and after a reopen
    session.delete(DeleteTarget::Last).unwrap();
    session.delete(DeleteTarget::Last).unwrap();
    let mut reopened = Session::open(&test_config(), &path).unwrap();
    assert!(reopened.set_start_offset(TimeDelta::hours(1)).is_err());
    assert_eq!(reopened.start_offset(), TimeDelta::zero());
}

#[test]
fn test_open_ignores_later_config_changes() {
    let path = temp_table("session_start_config_change");
    Session::create(&test_config(), &path).unwrap();

    let mut edited = test_config();
    edited.default_start_time = Some("010000".into());

    let mut session = Session::open(&edited, &path).unwrap();
    assert_eq!(session.start_offset(), TimeDelta::zero());
    let rec = session.record("a", 0.0).unwrap().unwrap();
    assert_eq!(rec.timestamp, "00:00:00:000");

    // a configured start is resolved once, at creation
    let second = temp_table("session_start_config_resolved");
    let mut cfg = test_config();
    cfg.default_start_time = Some("000010".into());
    Session::create(&cfg, &second).unwrap();

    let session = Session::open(&edited, &second).unwrap();
    assert_eq!(session.start_offset(), TimeDelta::seconds(10));
    assert!(session.is_start_fixed());
}

#[test]
fn test_table_without_state_keeps_zero_offset_once_it_has_entries() {
    let path = temp_table("session_start_legacy_table");
    write_raw(&path, "key,timestamp\na,00:00:01:000\n");

    let mut cfg = test_config();
    cfg.default_start_time = Some("010000".into());

    let mut session = Session::open(&cfg, &path).unwrap();
    assert!(session.is_start_fixed());
    assert_eq!(session.start_offset(), TimeDelta::zero());
    assert!(session.set_start_offset(TimeDelta::seconds(5)).is_err());
}

#[test]
fn test_unique_key_relog_after_delete_matches_across_reopen() {
    let path = temp_table("session_unique_key_relog");
    let mut cfg = test_config();
    cfg.duplicate_policy = DuplicatePolicy::UniqueKey;

    let mut session = Session::create(&cfg, &path).unwrap();
    session.record("a", 1000.0).unwrap();
    session.delete(DeleteTarget::Last).unwrap();
    let same_process = session.record("a", 2000.0).unwrap();

    let other = temp_table("session_unique_key_relog_reopen");
    let mut first = Session::create(&cfg, &other).unwrap();
    first.record("a", 1000.0).unwrap();
    first.delete(DeleteTarget::Last).unwrap();
    drop(first);
    let mut reopened = Session::open(&cfg, &other).unwrap();
    let across_reopen = reopened.record("a", 2000.0).unwrap();

    assert_eq!(same_process, Some(LogEntry::new("a", "00:00:02:000")));
    assert_eq!(same_process, across_reopen);

    // undo brings the deleted `a` back, so both copies are now present
    session.undo().unwrap();
    assert_eq!(session.entries().unwrap().len(), 2);
    assert!(session.record("a", 3000.0).unwrap().is_none());
}

#[test]
fn test_state_survives_reopen() {
    let path = temp_table("session_reopen");
    let cfg = test_config();

    {
        let mut session = Session::create(&cfg, &path).unwrap();
        session.set_start_offset(TimeDelta::seconds(5)).unwrap();
        session.record("a", 0.0).unwrap();
        session.record("b", 1000.0).unwrap();
        session.delete(DeleteTarget::Last).unwrap();
    }
    assert!(sidecar_of(&path, "session.json").exists());

    let mut session = Session::open(&cfg, &path).unwrap();
    assert_eq!(session.start_offset(), TimeDelta::seconds(5));
    assert_eq!(session.history().undo_len(), 1);

    session.undo().unwrap();
    let keys: Vec<String> = session.entries().unwrap().into_iter().map(|e| e.key).collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_record_invalidates_redo() {
    let path = temp_table("session_invalidate_redo");
    let mut session = Session::create(&test_config(), &path).unwrap();
    session.record("a", 1000.0).unwrap();
    session.record("b", 2000.0).unwrap();

    session.delete(DeleteTarget::Last).unwrap();
    session.undo().unwrap();
    assert_eq!(session.history().redo_len(), 1);

    session.record("c", 3000.0).unwrap();
    assert_eq!(session.history().redo_len(), 0);
    assert!(matches!(session.redo(), Err(AppError::NothingToRedo)));
}

#[test]
fn test_clear_resets_log_and_history() {
    let path = temp_table("session_clear");
    let mut session = Session::create(&test_config(), &path).unwrap();
    session.record("a", 1000.0).unwrap();
    session.record("b", 2000.0).unwrap();
    session.delete(DeleteTarget::Last).unwrap();

    session.clear().unwrap();
    assert!(session.entries().unwrap().is_empty());
    assert_eq!(session.history().undo_len(), 0);
    assert!(matches!(session.undo(), Err(AppError::NothingToUndo)));
}

#[test]
fn test_duplicate_policy_from_config() {
    let path = temp_table("session_policy");
    let mut cfg = test_config();
    cfg.duplicate_policy = DuplicatePolicy::UniqueKey;

    let mut session = Session::create(&cfg, &path).unwrap();
    assert!(session.record("a", 1000.0).unwrap().is_some());
    assert!(session.record("a", 2000.0).unwrap().is_none());
    assert_eq!(session.entries().unwrap().len(), 1);
}

#[test]
fn test_independent_sessions_do_not_share_state() {
    let first_path = temp_table("session_first");
    let second_path = temp_table("session_second");
    let cfg = test_config();

    let mut first = Session::create(&cfg, &first_path).unwrap();
    let mut second = Session::create(&cfg, &second_path).unwrap();

    first.set_start_offset(TimeDelta::seconds(60)).unwrap();
    first.record("a", 0.0).unwrap();
    second.record("b", 0.0).unwrap();
    first.delete(DeleteTarget::Last).unwrap();

    assert!(matches!(second.undo(), Err(AppError::NothingToUndo)));
    assert_eq!(second.entries().unwrap(), vec![LogEntry::new("b", "00:00:00:000")]);
    assert!(first.entries().unwrap().is_empty());
}

#[test]
fn test_search_and_tail_through_session() {
    let path = temp_table("session_query");
    let mut session = Session::create(&test_config(), &path).unwrap();
    session.record("x", 5100.0).unwrap();
    session.record("y", 50_000.0).unwrap();

    let hits = session.search("00:00:05").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.key, "x");
    assert_eq!(session.tail(1).unwrap()[0].entry.key, "y");
}

#[test]
fn test_operations_are_journaled() {
    let path = temp_table("session_journal");
    let mut session = Session::create(&test_config(), &path).unwrap();
    session.record("a", 1000.0).unwrap();
    session.delete(DeleteTarget::Last).unwrap();
    session.undo().unwrap();
    session.sort().unwrap();

    let ops: Vec<String> = read_journal(&path)
        .unwrap()
        .into_iter()
        .map(|l| l.operation)
        .collect();
    assert_eq!(ops, vec!["init", "log", "del", "undo", "sort"]);
}
