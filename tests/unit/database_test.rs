//! Unit tests for the database layer and the durable slot backends.

use bookmark_organizer::database::migrations::{self, CURRENT_SCHEMA_VERSION};
use bookmark_organizer::database::Database;
use bookmark_organizer::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use bookmark_organizer::services::persistence::{PersistenceAdapter, SlotPersistence};
use bookmark_organizer::storage::{JsonFileStore, KeyValueStore, SqliteStore};
use bookmark_organizer::types::errors::PersistenceError;

const SLOT: &str = "bookmark-organizer.bookmarks";

// === Database ===

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_slot_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
            ["kv_slots"],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "Table 'kv_slots' should exist after migrations");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let result = migrations::run_all(db.connection());
    assert!(result.is_ok(), "Running migrations twice should succeed (idempotent)");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        CURRENT_SCHEMA_VERSION
    );
}

// === SqliteStore ===

#[test]
fn test_sqlite_store_read_write_remove() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.read("k").unwrap(), None);

    store.write("k", "first").unwrap();
    store.write("k", "second").unwrap();
    assert_eq!(store.read("k").unwrap(), Some("second".to_string()));

    let rows: i64 = store
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_slots", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.read("k").unwrap(), None);
}

#[test]
fn test_sqlite_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.db");

    let created = {
        let backend = SqliteStore::open(&path).unwrap();
        let mut store = BookmarkStore::open(SlotPersistence::new(backend, SLOT));
        store
            .create("Rust", "https://rust-lang.org", &["lang"])
            .unwrap()
            .into_value()
    };

    let reopened = BookmarkStore::open(SlotPersistence::new(SqliteStore::open(&path).unwrap(), SLOT));
    assert_eq!(reopened.list(), &[created]);
    assert!(reopened.load_error().is_none());
}

// === JsonFileStore ===

#[test]
fn test_json_file_store_read_write_remove() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("nested"));

    assert_eq!(store.read(SLOT).unwrap(), None);
    store.write(SLOT, "[]").unwrap();
    assert!(store.slot_path(SLOT).exists());
    assert_eq!(store.read(SLOT).unwrap(), Some("[]".to_string()));

    store.remove(SLOT).unwrap();
    assert!(!store.slot_path(SLOT).exists());
    store.remove(SLOT).unwrap();
}

#[test]
fn test_json_file_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (kept, removed) = {
        let mut store = BookmarkStore::open(SlotPersistence::new(JsonFileStore::new(dir.path()), SLOT));
        let kept = store.create("Kept", "https://kept.example", &[]).unwrap().into_value();
        let removed = store.create("Gone", "https://gone.example", &[]).unwrap().into_value();
        store.delete(&removed.id);
        (kept, removed)
    };

    let reopened = BookmarkStore::open(SlotPersistence::new(JsonFileStore::new(dir.path()), SLOT));
    assert_eq!(reopened.list(), &[kept]);
    assert!(reopened.get(&removed.id).is_none());
}

#[test]
fn test_json_file_corrupt_contents_fall_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileStore::new(dir.path());
    std::fs::write(backend.slot_path(SLOT), "not json at all").unwrap();

    let adapter = SlotPersistence::new(backend, SLOT);
    assert!(matches!(adapter.try_load(), Err(PersistenceError::Corrupt(_))));
    assert!(adapter.load().is_empty());
}

#[test]
fn test_json_file_write_into_unusable_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let mut store = JsonFileStore::new(&blocker);
    assert!(matches!(
        store.write(SLOT, "[]"),
        Err(PersistenceError::Write(_))
    ));
}
