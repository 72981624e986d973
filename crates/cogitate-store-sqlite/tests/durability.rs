// crates/cogitate-store-sqlite/tests/durability.rs
// ============================================================================
// Module: Durability Tests
// Description: Tests that data survives a close-and-reopen of the same
//              SQLite file, across thoughts, branches, and metrics.
// ============================================================================
//! ## Overview
//! `SqliteThoughtStore::close` is a no-op: durability comes entirely from
//! the underlying WAL-mode file. These tests open a store, write through
//! it, drop it (releasing the connection), then open a second store
//! against the same path and confirm every write is still visible.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use cogitate_core::Branch;
use cogitate_core::BranchId;
use cogitate_core::ThinkingMode;
use cogitate_core::Thought;
use cogitate_core::ThoughtId;
use cogitate_core::ThoughtStore;
use cogitate_core::Timestamp;
use cogitate_store_sqlite::SqliteStoreConfig;
use cogitate_store_sqlite::SqliteStoreMode;
use cogitate_store_sqlite::SqliteThoughtStore;

fn open(path: &std::path::Path) -> SqliteThoughtStore {
    SqliteThoughtStore::new(SqliteStoreConfig {
        path: path.to_path_buf(),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
    })
    .expect("open store")
}

fn sample_thought(id: &str, content: &str) -> Thought {
    Thought::new(ThoughtId::new(id), content, ThinkingMode::Linear, 0.5, None, None, Vec::new(), Timestamp::from_millis(0))
        .expect("valid thought")
}

#[test]
fn thoughts_and_branches_survive_a_reopen_of_the_same_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cogitate.sqlite3");

    {
        let store = open(&path);
        store.store_thought(sample_thought("t1", "first thought")).unwrap();
        store.store_thought(sample_thought("t2", "second thought")).unwrap();
        store.store_branch(Branch::new(BranchId::new("b1"), 0.7, Timestamp::from_millis(0))).unwrap();
        store.set_active_branch(&BranchId::new("b1")).unwrap();
        store.append_thought_to_branch(&BranchId::new("b1"), ThoughtId::new("t1")).unwrap();
        drop(store);
    }

    let reopened = open(&path);

    let t1 = reopened.get_thought(&ThoughtId::new("t1")).unwrap();
    assert_eq!(t1.content, "first thought");
    let t2 = reopened.get_thought(&ThoughtId::new("t2")).unwrap();
    assert_eq!(t2.content, "second thought");

    let branch = reopened.get_branch(&BranchId::new("b1")).unwrap();
    assert_eq!(branch.thought_ids, vec![ThoughtId::new("t1")]);

    let active = reopened.get_active_branch().unwrap().expect("active branch persisted");
    assert_eq!(active.id, BranchId::new("b1"));

    let metrics = reopened.get_metrics().unwrap();
    assert_eq!(metrics.thought_count, 2);
    assert_eq!(metrics.branch_count, 1);
    assert_eq!(metrics.active_branch_id, Some(BranchId::new("b1")));
}

#[test]
fn reopening_twice_in_a_row_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cogitate.sqlite3");

    {
        let store = open(&path);
        store.store_thought(sample_thought("t1", "only thought")).unwrap();
    }
    {
        let store = open(&path);
        assert!(store.get_thought(&ThoughtId::new("t1")).is_ok());
    }
    let store = open(&path);
    assert!(store.get_thought(&ThoughtId::new("t1")).is_ok());
}
