use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use wizard_core::protocol::{self, Session};
use wizard_core::{ApiClient, ApiConfig};

fn main() {
    // stdout carries protocol responses, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let client = match ApiConfig::from_env().and_then(ApiClient::new) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to configure API client");
            std::process::exit(1);
        }
    };

    info!(base_url = client.config().base_url(), "wizard-core ready");

    let session = Session::new(client);
    let _state_log = session.store.subscribe(|state| {
        debug!(
            original = %state.original,
            candidates = state.translations.len(),
            selected = ?state.selected_translation,
            "translation state changed"
        );
    });

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result =
            std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&session, &line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string(),
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }
}
