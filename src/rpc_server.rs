//! Bookmark organizer RPC server: JSON-RPC over stdin/stdout for a UI front end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.create", "params":{"title":"...","url":"...","tags":["..."]}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":{"code":"...","message":"..."}}

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use bookmark_organizer::app::App;
use bookmark_organizer::logging;
use bookmark_organizer::rpc_handler::handle_method;
use bookmark_organizer::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use bookmark_organizer::types::settings::OrganizerSettings;

use log::{debug, error, info, warn};
use serde_json::{json, Value};

fn respond(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() -> ExitCode {
    let mut engine = SettingsEngine::new(None);
    let (settings, settings_error) = match engine.load() {
        Ok(settings) => (settings, None),
        Err(e) => (OrganizerSettings::default(), Some(e)),
    };
    logging::init(&settings.logging.level);
    if let Some(e) = settings_error {
        warn!("ignoring settings at {}: {}", engine.get_config_path(), e);
    }

    let app = match App::new(settings) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to initialize bookmark storage: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(e) = app.store.load_error() {
        warn!("previous bookmarks could not be loaded: {}", e);
    }
    info!("serving {} bookmarks", app.store.len());
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    if respond(&mut out, &ready).is_err() {
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(req) => {
                let id = req.get("id").cloned().unwrap_or(Value::Null);
                let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
                let params = req.get("params").cloned().unwrap_or_else(|| json!({}));
                debug!("rpc {} (id {})", method, id);

                match handle_method(&app, method, &params) {
                    Ok(val) => json!({"id": id, "result": val}),
                    Err(err) => json!({"id": id, "error": err}),
                }
            }
            Err(e) => json!({
                "id": null,
                "error": {"code": "parse_error", "message": format!("parse error: {}", e)},
            }),
        };

        if respond(&mut out, &response).is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
