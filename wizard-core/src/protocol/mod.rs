use serde_json::{json, Value};
use tracing::debug;

use crate::services::api::ApiClient;
use crate::services::store::TranslationStore;

mod command;
pub use command::Command;

/// What a protocol line can touch: the translation store and the backend.
#[derive(Debug, Clone)]
pub struct Session {
    pub store: TranslationStore,
    pub client: ApiClient,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            store: TranslationStore::new(),
            client,
        }
    }
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn state_payload(store: &TranslationStore) -> Value {
    store.with(|state| json!({ "state": state }))
}

fn required_text(payload: &Value) -> Result<&str, String> {
    payload
        .get("text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "payload.text is required".to_string())
}

pub fn handle(session: &Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    debug!(cmd = cmd_str, "protocol request");

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "wizard-core alive" })),

        Command::Config => {
            let cfg = session.client.config();
            ok(
                id,
                json!({
                    "base_url": cfg.base_url(),
                    "environment": cfg.environment(),
                    "proxy": {
                        "prefix": cfg.proxy().prefix,
                        "target": cfg.proxy().target,
                    }
                }),
            )
        }

        Command::Translate => {
            let text = match required_text(payload) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };

            match session.client.translate(text) {
                Ok(resp) => {
                    // Older backends echo nothing back; fall back to the input.
                    let original = if resp.original_text.is_empty() {
                        text.to_string()
                    } else {
                        resp.original_text
                    };
                    session.store.set_translations(original, resp.wizard_texts);
                    ok(id, state_payload(&session.store))
                }
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Judge => {
            let text = match required_text(payload) {
                Ok(t) => t,
                Err(e) => return err(id, e),
            };

            match session.client.judge(text) {
                Ok(judgement) => ok(id, json!({ "judgement": judgement })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Select => {
            let index = match payload.get("index").and_then(|v| v.as_u64()) {
                Some(i) => i,
                None => return err(id, "payload.index must be a non-negative integer"),
            };
            // Indices past usize::MAX are out of range all the same.
            session
                .store
                .select_translation(usize::try_from(index).unwrap_or(usize::MAX));
            ok(id, state_payload(&session.store))
        }

        Command::Reset => {
            session.store.reset();
            ok(id, state_payload(&session.store))
        }

        Command::State => ok(id, state_payload(&session.store)),

        Command::ProxyResolve => {
            let path = payload.get("path").and_then(|v| v.as_str()).unwrap_or("");
            if path.is_empty() {
                return err(id, "payload.path is required");
            }
            let proxy = session.client.config().proxy();
            match proxy.forward_url(path) {
                Some(url) => ok(id, json!({ "url": url, "host": proxy.host_header() })),
                None => ok(id, json!({ "url": Value::Null })),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
