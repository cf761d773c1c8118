//! Unit tests for the RPC handler: every method dispatched by `handle_method`.
//!
//! These tests go through the same code path as the `bookmarks-rpc` binary,
//! over a memory-backed slot so each test starts from an empty collection.

use std::sync::Mutex;

use serde_json::{json, Value};

use bookmark_organizer::app::App;
use bookmark_organizer::rpc_handler::handle_method;
use bookmark_organizer::services::persistence::SlotPersistence;
use bookmark_organizer::storage::MemoryStore;

fn setup() -> Mutex<App> {
    let persistence = SlotPersistence::new(MemoryStore::new(), "bookmarks");
    Mutex::new(App::with_persistence(Box::new(persistence)))
}

fn call(app: &Mutex<App>, method: &str, params: Value) -> Value {
    handle_method(app, method, &params)
        .unwrap_or_else(|e| panic!("{} failed: {}", method, e))
}

fn create(app: &Mutex<App>, title: &str, url: &str, tags: Value) -> String {
    let res = call(app, "bookmark.create", json!({"title": title, "url": url, "tags": tags}));
    res["bookmark"]["id"].as_str().unwrap().to_string()
}

// ─── Ping ───

#[test]
fn test_ping() {
    let app = setup();
    assert_eq!(call(&app, "ping", json!({})), json!({"pong": true}));
}

// ─── Unknown method ───

#[test]
fn test_unknown_method_returns_error() {
    let app = setup();
    let err = handle_method(&app, "nonexistent.method", &json!({})).unwrap_err();
    assert_eq!(err.code, "unknown_method");
    assert!(err.message.contains("unknown method"));
}

// ─── Bookmarks ───

#[test]
fn test_bookmark_create_and_list() {
    let app = setup();

    let res = call(
        &app,
        "bookmark.create",
        json!({"title": "Example", "url": "https://example.com", "tags": ["a", " b "]}),
    );
    assert_eq!(res["persisted"], true);
    assert!(res.get("warning").is_none());
    let bookmark = &res["bookmark"];
    assert!(bookmark["id"].is_string());
    assert_eq!(bookmark["url"], "https://example.com");
    assert_eq!(bookmark["tags"], json!(["a", "b"]));
    assert!(bookmark["createdAt"].as_str().unwrap().ends_with('Z'));
    assert!(bookmark["displayDate"].is_string());

    let list = call(&app, "bookmark.list", json!({}));
    assert_eq!(list["total"], 1);
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Example");
}

#[test]
fn test_bookmark_create_accepts_comma_separated_tags() {
    let app = setup();
    let res = call(
        &app,
        "bookmark.create",
        json!({"title": "T", "url": "https://t.example", "tags": "search, tools,,work"}),
    );
    assert_eq!(res["bookmark"]["tags"], json!(["search", "tools", "work"]));
}

#[test]
fn test_bookmark_create_invalid_url_is_validation_error() {
    let app = setup();
    let err = handle_method(
        &app,
        "bookmark.create",
        &json!({"title": "Bad", "url": "not-a-url"}),
    )
    .unwrap_err();
    assert_eq!(err.code, "validation");
    assert!(app.lock().unwrap().store.is_empty());
}

#[test]
fn test_bookmark_create_missing_params() {
    let app = setup();
    let err = handle_method(&app, "bookmark.create", &json!({"title": "No url"})).unwrap_err();
    assert_eq!(err.code, "invalid_params");

    let err = handle_method(
        &app,
        "bookmark.create",
        &json!({"title": "T", "url": "https://t.example", "tags": 5}),
    )
    .unwrap_err();
    assert_eq!(err.code, "invalid_params");
}

#[test]
fn test_bookmark_update_get_and_not_found() {
    let app = setup();
    let id = create(&app, "Old", "https://old.example", json!([]));

    let res = call(
        &app,
        "bookmark.update",
        json!({"id": id, "title": "New", "url": "https://new.example", "tags": ["x"]}),
    );
    assert_eq!(res["bookmark"]["title"], "New");
    assert_eq!(res["bookmark"]["id"], id.as_str());

    let got = call(&app, "bookmark.get", json!({"id": id}));
    assert_eq!(got["url"], "https://new.example");

    let err = handle_method(&app, "bookmark.get", &json!({"id": "missing"})).unwrap_err();
    assert_eq!(err.code, "not_found");

    let err = handle_method(
        &app,
        "bookmark.update",
        &json!({"id": "missing", "title": "X", "url": "https://x.example"}),
    )
    .unwrap_err();
    assert_eq!(err.code, "not_found");
}

#[test]
fn test_bookmark_delete_twice() {
    let app = setup();
    let id = create(&app, "Gone", "https://gone.example", json!([]));

    let first = call(&app, "bookmark.delete", json!({"id": id}));
    assert_eq!(first, json!({"removed": true, "persisted": true}));

    let second = call(&app, "bookmark.delete", json!({"id": id}));
    assert_eq!(second, json!({"removed": false, "persisted": true}));
}

#[test]
fn test_save_failure_is_reported_as_warning() {
    let mut store = MemoryStore::new();
    store.set_fail_writes(true);
    let app = Mutex::new(App::with_persistence(Box::new(SlotPersistence::new(
        store,
        "bookmarks",
    ))));

    let res = call(
        &app,
        "bookmark.create",
        json!({"title": "Volatile", "url": "https://v.example"}),
    );
    assert_eq!(res["persisted"], false);
    assert!(res["warning"].is_string());
    assert_eq!(call(&app, "bookmark.list", json!({}))["total"], 1);
}

// ─── Tags & filter ───

#[test]
fn test_tags_list_sorted_distinct() {
    let app = setup();
    assert_eq!(call(&app, "tags.list", json!({})), json!([]));

    create(&app, "W", "https://w.example", json!(["work", "b"]));
    create(&app, "H", "https://h.example", json!(["home", "b"]));
    assert_eq!(call(&app, "tags.list", json!({})), json!(["b", "home", "work"]));
}

#[test]
fn test_bookmark_filter_with_params() {
    let app = setup();
    create(&app, "Work", "https://w.example", json!(["work"]));
    create(&app, "Home", "https://h.example", json!(["home"]));

    let res = call(&app, "bookmark.filter", json!({"active_tag": "work"}));
    let items = res["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Work");
    assert_eq!(res["total"], 2);

    let res = call(&app, "bookmark.filter", json!({"search_term": "H.EXAMPLE"}));
    assert_eq!(res["items"].as_array().unwrap().len(), 1);
}

#[test]
fn test_bookmark_filter_rejects_ill_typed_params() {
    let app = setup();
    create(&app, "Work", "https://w.example", json!(["work"]));
    create(&app, "Home", "https://h.example", json!(["home"]));
    call(&app, "filter.set", json!({"active_tag": "home"}));

    let err = handle_method(&app, "bookmark.filter", &json!({"active_tag": 5})).unwrap_err();
    assert_eq!(err.code, "invalid_params");

    let err = handle_method(&app, "bookmark.filter", &json!({"search_term": 7})).unwrap_err();
    assert_eq!(err.code, "invalid_params");

    // An explicit null drops the stored tag for this query only.
    let res = call(&app, "bookmark.filter", json!({"active_tag": null}));
    assert_eq!(res["items"].as_array().unwrap().len(), 2);
    assert_eq!(call(&app, "filter.get", json!({}))["active_tag"], "home");
}

#[test]
fn test_filter_set_get_clear() {
    let app = setup();
    create(&app, "Work", "https://w.example", json!(["work"]));
    create(&app, "Home", "https://h.example", json!(["home"]));

    let res = call(&app, "filter.set", json!({"active_tag": "home"}));
    assert_eq!(res["filter"]["active_tag"], "home");
    assert_eq!(res["items"].as_array().unwrap().len(), 1);

    // bookmark.filter without params follows the stored filter.
    let res = call(&app, "bookmark.filter", json!({}));
    assert_eq!(res["items"][0]["title"], "Home");

    let res = call(&app, "filter.set", json!({"active_tag": null, "search_term": "work"}));
    assert_eq!(res["filter"]["active_tag"], Value::Null);
    assert_eq!(res["items"][0]["title"], "Work");

    assert_eq!(call(&app, "filter.get", json!({}))["search_term"], "work");

    let res = call(&app, "filter.clear", json!({}));
    assert_eq!(res["filter"], json!({"search_term": "", "active_tag": null}));

    let err = handle_method(&app, "filter.set", &json!({"active_tag": 3})).unwrap_err();
    assert_eq!(err.code, "invalid_params");
}

// ─── Editing session ───

#[test]
fn test_edit_begin_commit() {
    let app = setup();
    let id = create(&app, "Docs", "https://docs.rs", json!(["rust", "docs"]));

    let form = call(&app, "edit.begin", json!({"id": id}));
    assert_eq!(
        form,
        json!({"title": "Docs", "url": "https://docs.rs", "tags": "rust, docs"})
    );

    let current = call(&app, "edit.current", json!({}));
    assert_eq!(current["id"], id.as_str());

    let res = call(
        &app,
        "edit.commit",
        json!({"title": "Docs.rs", "url": "https://docs.rs", "tags": "rust"}),
    );
    assert_eq!(res["bookmark"]["title"], "Docs.rs");
    assert_eq!(res["bookmark"]["tags"], json!(["rust"]));

    let current = call(&app, "edit.current", json!({}));
    assert_eq!(current, json!({"id": null, "form": null}));
}

#[test]
fn test_edit_commit_invalid_keeps_session() {
    let app = setup();
    let id = create(&app, "Docs", "https://docs.rs", json!([]));
    call(&app, "edit.begin", json!({"id": id}));

    let err = handle_method(
        &app,
        "edit.commit",
        &json!({"title": "", "url": "https://docs.rs"}),
    )
    .unwrap_err();
    assert_eq!(err.code, "validation");
    assert_eq!(call(&app, "edit.current", json!({}))["id"], id.as_str());

    assert_eq!(call(&app, "edit.cancel", json!({})), json!({"ok": true}));
    assert_eq!(call(&app, "edit.current", json!({}))["id"], Value::Null);
}

#[test]
fn test_edit_errors() {
    let app = setup();

    let err = handle_method(&app, "edit.begin", &json!({"id": "missing"})).unwrap_err();
    assert_eq!(err.code, "not_found");

    let err = handle_method(
        &app,
        "edit.commit",
        &json!({"title": "T", "url": "https://t.example"}),
    )
    .unwrap_err();
    assert_eq!(err.code, "no_active_edit");
}

#[test]
fn test_edit_commit_after_delete_is_not_found() {
    let app = setup();
    let id = create(&app, "Docs", "https://docs.rs", json!([]));
    call(&app, "edit.begin", json!({"id": id}));
    call(&app, "bookmark.delete", json!({"id": id}));

    let err = handle_method(
        &app,
        "edit.commit",
        &json!({"title": "Docs", "url": "https://docs.rs"}),
    )
    .unwrap_err();
    assert_eq!(err.code, "not_found");
    assert_eq!(call(&app, "bookmark.list", json!({}))["total"], 0);
}
