use sgpad::{config, ipc, logging};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let cfg = config::DaemonConfig::from_env()?;
    logging::init(&cfg)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sgpad ready");

    let mut state = ipc::AppState::default();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin closed with error");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => {
                // No id to echo back without a parsed request.
                tracing::warn!(error = %e, "unparseable request line");
                ipc::bad_json(e.to_string())
            }
        };

        writeln!(stdout, "{resp}")?;
        stdout.flush()?;
    }

    tracing::info!("stdin closed, exiting");
    Ok(())
}
