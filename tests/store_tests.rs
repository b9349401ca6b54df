mod common;
use common::{read_raw, temp_table, write_raw};
use keymark::core::query::{search, tail};
use keymark::core::store::{Appended, EventLog};
use keymark::errors::AppError;
use keymark::models::entry::LogEntry;
use keymark::models::policy::DuplicatePolicy;

fn keys(log: &EventLog) -> Vec<String> {
    log.entries().unwrap().into_iter().map(|e| e.key).collect()
}

#[test]
fn test_create_writes_header_only() {
    let path = temp_table("store_create");
    let log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();

    assert_eq!(read_raw(&path), "key,timestamp\n");
    assert!(log.is_empty().unwrap());
}

#[test]
fn test_missing_file_is_empty_log() {
    let path = temp_table("store_missing");
    let log = EventLog::open(&path, DuplicatePolicy::Allow).unwrap();

    assert!(log.entries().unwrap().is_empty());
    assert!(log.last_entries(5).unwrap().is_empty());
}

#[test]
fn test_append_and_last_entries() {
    let path = temp_table("store_append");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();

    assert_eq!(log.append("a", "00:00:01:000").unwrap(), Appended::Added(0));
    assert_eq!(log.append("b", "00:00:02:000").unwrap(), Appended::Added(1));
    assert_eq!(log.append("c", "00:00:03:000").unwrap(), Appended::Added(2));

    assert_eq!(
        read_raw(&path),
        "key,timestamp\na,00:00:01:000\nb,00:00:02:000\nc,00:00:03:000\n"
    );

    let last = log.last_entries(2).unwrap();
    assert_eq!(
        last,
        vec![
            LogEntry::new("b", "00:00:02:000"),
            LogEntry::new("c", "00:00:03:000")
        ]
    );
    assert_eq!(log.last_entries(10).unwrap().len(), 3);
}

#[test]
fn test_sort_orders_by_timestamp_and_is_idempotent() {
    let path = temp_table("store_sort");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();
    log.append("a", "00:00:02:000").unwrap();
    log.append("b", "00:00:01:000").unwrap();

    log.sort_by_timestamp().unwrap();
    assert_eq!(
        read_raw(&path),
        "key,timestamp\nb,00:00:01:000\na,00:00:02:000\n"
    );

    let once = read_raw(&path);
    log.sort_by_timestamp().unwrap();
    assert_eq!(read_raw(&path), once);
}

#[test]
fn test_sort_is_stable_and_puts_unparsable_last() {
    let path = temp_table("store_sort_stable");
    write_raw(
        &path,
        "key,timestamp\nx,garbage\nb,00:00:05:000\na,00:00:05:000\nc,00:00:01:000\n",
    );
    let log = EventLog::open(&path, DuplicatePolicy::Allow).unwrap();

    log.sort_by_timestamp().unwrap();
    assert_eq!(keys(&log), vec!["c", "b", "a", "x"]);
}

#[test]
fn test_remove_and_insert() {
    let path = temp_table("store_remove_insert");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();
    log.append("a", "00:00:01:000").unwrap();
    log.append("b", "00:00:02:000").unwrap();
    log.append("c", "00:00:03:000").unwrap();

    let removed = log.remove_at(1).unwrap();
    assert_eq!(removed, LogEntry::new("b", "00:00:02:000"));
    assert_eq!(keys(&log), vec!["a", "c"]);

    let last = log.remove_last().unwrap();
    assert_eq!(last.key, "c");

    // clamped to the end
    assert_eq!(log.insert_at(99, LogEntry::new("z", "00:00:09:000")).unwrap(), 1);
    assert_eq!(log.insert_at(0, LogEntry::new("y", "00:00:00:500")).unwrap(), 0);
    assert_eq!(keys(&log), vec!["y", "a", "z"]);
}

#[test]
fn test_remove_errors_on_bad_targets() {
    let path = temp_table("store_remove_errors");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();

    assert!(matches!(log.remove_last(), Err(AppError::NothingToUndo)));

    log.append("a", "00:00:01:000").unwrap();
    assert!(matches!(
        log.remove_at(3),
        Err(AppError::IndexOutOfRange { index: 3, len: 1 })
    ));
    assert_eq!(log.len().unwrap(), 1);
}

#[test]
fn test_clear_resets_to_header() {
    let path = temp_table("store_clear");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();
    log.append("a", "00:00:01:000").unwrap();

    log.clear().unwrap();
    assert_eq!(read_raw(&path), "key,timestamp\n");
}

#[test]
fn test_allow_policy_keeps_duplicates() {
    let path = temp_table("store_policy_allow");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();

    log.append("a", "00:00:01:000").unwrap();
    log.append("a", "00:00:01:000").unwrap();
    assert_eq!(log.len().unwrap(), 2);
}

#[test]
fn test_unique_key_policy_checks_table_contents() {
    let path = temp_table("store_policy_unique_key");
    let mut log = EventLog::create(&path, DuplicatePolicy::UniqueKey).unwrap();

    assert!(matches!(log.append("a", "00:00:01:000").unwrap(), Appended::Added(_)));
    assert_eq!(log.append("a", "00:00:02:000").unwrap(), Appended::Skipped);

    let mut reopened = EventLog::open(&path, DuplicatePolicy::UniqueKey).unwrap();
    assert_eq!(reopened.append("a", "00:00:03:000").unwrap(), Appended::Skipped);
    assert!(matches!(reopened.append("b", "00:00:03:000").unwrap(), Appended::Added(1)));

    reopened.clear().unwrap();
    assert!(matches!(reopened.append("a", "00:00:04:000").unwrap(), Appended::Added(0)));
}

#[test]
fn test_unique_key_allows_a_key_again_after_removal() {
    let path = temp_table("store_policy_unique_key_removed");
    let mut log = EventLog::create(&path, DuplicatePolicy::UniqueKey).unwrap();
    log.append("a", "00:00:01:000").unwrap();

    log.remove_last().unwrap();
    assert!(matches!(log.append("a", "00:00:02:000").unwrap(), Appended::Added(0)));

    // restoring a removed duplicate is not an append: the policy does not apply
    log.insert_at(0, LogEntry::new("a", "00:00:01:000")).unwrap();
    assert_eq!(log.append("a", "00:00:03:000").unwrap(), Appended::Skipped);
    assert_eq!(log.len().unwrap(), 2);
}

#[test]
fn test_unique_entry_policy_skips_identical_pairs_only() {
    let path = temp_table("store_policy_unique_entry");
    let mut log = EventLog::create(&path, DuplicatePolicy::UniqueEntry).unwrap();

    log.append("a", "00:00:01:000").unwrap();
    assert_eq!(log.append("a", "00:00:01:000").unwrap(), Appended::Skipped);
    assert!(matches!(log.append("a", "00:00:02:000").unwrap(), Appended::Added(1)));
}

#[test]
fn test_reads_legacy_column_order() {
    let path = temp_table("store_legacy_header");
    write_raw(&path, "timestamp, key\n00:00:01:000, a\n00:00:02:000, b\n");

    let mut log = EventLog::open(&path, DuplicatePolicy::Allow).unwrap();
    assert_eq!(
        log.entries().unwrap(),
        vec![
            LogEntry::new("a", "00:00:01:000"),
            LogEntry::new("b", "00:00:02:000")
        ]
    );

    // the next rewrite switches to the canonical layout
    log.append("c", "00:00:03:000").unwrap();
    assert!(read_raw(&path).starts_with("key,timestamp\na,00:00:01:000\n"));
}

#[test]
fn test_reads_headerless_and_unquoted_comma_key() {
    let path = temp_table("store_headerless");
    write_raw(&path, "a,00:00:01:000\n00:00:02:000,b\n,,00:00:03:000\n");

    let log = EventLog::open(&path, DuplicatePolicy::Allow).unwrap();
    assert_eq!(keys(&log), vec!["a", "b", ","]);
}

#[test]
fn test_comma_key_survives_rewrite() {
    let path = temp_table("store_comma_key");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();
    log.append(",", "00:00:01:000").unwrap();
    log.append(" ", "00:00:02:000").unwrap();

    let reopened = EventLog::open(&path, DuplicatePolicy::Allow).unwrap();
    assert_eq!(keys(&reopened), vec![",", " "]);
}

#[test]
fn test_tail_and_search() {
    let path = temp_table("store_query");
    let mut log = EventLog::create(&path, DuplicatePolicy::Allow).unwrap();
    log.append("x", "00:00:05:100").unwrap();
    log.append("y", "00:00:50:000").unwrap();
    log.append("A", "00:01:00:000").unwrap();

    let hits = search(&log, "00:00:05").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].index, 0);
    assert_eq!(hits[0].entry.key, "x");

    // case-sensitive
    assert!(search(&log, "a,").unwrap().is_empty());
    assert_eq!(search(&log, "A,").unwrap().len(), 1);

    let last = tail(&log, 2).unwrap();
    assert_eq!(last.iter().map(|e| e.index).collect::<Vec<_>>(), vec![1, 2]);
    assert!(tail(&log, 0).unwrap().is_empty());
}
