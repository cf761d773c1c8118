//! RPC method handler for the bookmark organizer JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested without stdio.
//! `handle_method` is the whole presentation contract: read accessors
//! (`bookmark.list`, `bookmark.filter`, `tags.list`), store mutations and
//! the editing session.

use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::app::App;
use crate::managers::bookmark_store::{BookmarkStoreTrait, StoreOutcome};
use crate::managers::editing_session::EditForm;
use crate::services::validator;
use crate::types::bookmark::Bookmark;
use crate::types::errors::BookmarkError;

/// Error returned to the RPC client.
///
/// `code` is an `ErrorKind` name for store errors, or one of
/// `invalid_params`, `unknown_method`, `internal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpcError {
    pub code: String,
    pub message: String,
}

impl RpcError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_params".to_string(),
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "internal".to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

impl From<BookmarkError> for RpcError {
    fn from(err: BookmarkError) -> Self {
        Self {
            code: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Required string parameter.
fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, RpcError> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(format!("missing {}", name)))
}

/// Optional `tags` parameter: an array of strings or one comma-separated string.
fn tags_param(params: &Value) -> Result<Vec<String>, RpcError> {
    match params.get("tags") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(text)) => Ok(validator::parse_tag_input(text)),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| RpcError::invalid_params("tags must be strings"))
            })
            .collect(),
        Some(_) => Err(RpcError::invalid_params(
            "tags must be an array or a comma-separated string",
        )),
    }
}

fn bookmark_json(bookmark: &Bookmark) -> Value {
    let mut value = serde_json::to_value(bookmark).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("displayDate".to_string(), json!(bookmark.display_date()));
    }
    value
}

fn bookmarks_json<'a>(bookmarks: impl IntoIterator<Item = &'a Bookmark>) -> Vec<Value> {
    bookmarks.into_iter().map(bookmark_json).collect()
}

/// Attaches durability information to a mutation result.
fn outcome_json<T>(outcome: &StoreOutcome<T>, mut body: Map<String, Value>) -> Value {
    body.insert("persisted".to_string(), json!(outcome.is_durable()));
    if let Some(err) = &outcome.save_error {
        body.insert("warning".to_string(), json!(err.to_string()));
    }
    Value::Object(body)
}

fn form_json(form: Option<EditForm>) -> Value {
    match form {
        Some(form) => json!({"title": form.title, "url": form.url, "tags": form.tags}),
        None => Value::Null,
    }
}

fn single(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}

/// Dispatch a JSON-RPC method call.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, RpcError> {
    let mut a = app.lock().map_err(|e| RpcError::internal(e.to_string()))?;
    let a = &mut *a;

    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.create" => {
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let tags = tags_param(params)?;
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let outcome = a.store.create(title, url, &tag_refs)?;
            Ok(outcome_json(&outcome, single("bookmark", bookmark_json(&outcome.value))))
        }
        "bookmark.update" => {
            let id = str_param(params, "id")?;
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let tags = tags_param(params)?;
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let outcome = a.store.update(id, title, url, &tag_refs)?;
            Ok(outcome_json(&outcome, single("bookmark", bookmark_json(&outcome.value))))
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            let outcome = a.store.delete(id);
            Ok(outcome_json(&outcome, single("removed", json!(outcome.value))))
        }
        "bookmark.get" => {
            let id = str_param(params, "id")?;
            let bookmark = a
                .store
                .get(id)
                .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
            Ok(bookmark_json(bookmark))
        }
        "bookmark.list" => {
            let items = bookmarks_json(a.store.list());
            Ok(json!({"items": items, "total": a.store.len()}))
        }
        "bookmark.filter" => {
            let search_term = match params.get("search_term") {
                Some(v) => v
                    .as_str()
                    .ok_or_else(|| RpcError::invalid_params("search_term must be a string"))?,
                None => a.filter.search_term.as_str(),
            };
            let active_tag = match params.get("active_tag") {
                Some(Value::Null) => None,
                Some(Value::String(tag)) => Some(tag.as_str()),
                Some(_) => return Err(RpcError::invalid_params("active_tag must be a string or null")),
                None => a.filter.active_tag.as_deref(),
            };
            let items = bookmarks_json(a.store.filtered(search_term, active_tag));
            Ok(json!({"items": items, "total": a.store.len()}))
        }

        // ─── Tags & filter ───
        "tags.list" => Ok(json!(a.distinct_tags())),
        "filter.get" => Ok(json!(a.filter)),
        "filter.set" => {
            if let Some(v) = params.get("search_term") {
                let term = v
                    .as_str()
                    .ok_or_else(|| RpcError::invalid_params("search_term must be a string"))?;
                a.filter.search_term = term.to_string();
            }
            if let Some(v) = params.get("active_tag") {
                a.filter.active_tag = match v {
                    Value::Null => None,
                    Value::String(tag) => Some(tag.clone()),
                    _ => return Err(RpcError::invalid_params("active_tag must be a string or null")),
                };
            }
            let items = bookmarks_json(a.visible_bookmarks());
            Ok(json!({"filter": a.filter, "items": items}))
        }
        "filter.clear" => {
            a.filter.clear();
            Ok(json!({"filter": a.filter}))
        }

        // ─── Editing session ───
        "edit.begin" => {
            let id = str_param(params, "id")?;
            a.editing.begin_by_id(&a.store, id)?;
            Ok(form_json(a.editing.form()))
        }
        "edit.current" => Ok(json!({
            "id": a.editing.target().map(|b| b.id.clone()),
            "form": form_json(a.editing.form()),
        })),
        "edit.commit" => {
            let title = str_param(params, "title")?;
            let url = str_param(params, "url")?;
            let tags = tags_param(params)?;
            let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            let outcome = a.editing.commit(&mut a.store, title, url, &tag_refs)?;
            Ok(outcome_json(&outcome, single("bookmark", bookmark_json(&outcome.value))))
        }
        "edit.cancel" => {
            a.editing.cancel();
            Ok(json!({"ok": true}))
        }

        _ => Err(RpcError {
            code: "unknown_method".to_string(),
            message: format!("unknown method: {}", method),
        }),
    }
}
