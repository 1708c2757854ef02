//! # ledger-replay
//!
//! Applies a JSON script of ledger commands and prints the committed event
//! log as JSON lines.
//!
//! ```text
//! PL_OWNER=0x01.. PL_OPERATOR=0x02.. PL_REGULATOR=0x03.. \
//!     ledger-replay script.json > events.jsonl
//! ```
//!
//! A rejected command is logged and skipped. The process fails only on I/O,
//! parse or configuration errors.

use anyhow::{Context, Result};
use ledger_runtime::telemetry::init_tracing;
use ledger_runtime::{Ledger, LedgerCommand, LedgerConfig};
use shared_bus::EventFilter;
use shared_types::short_hex;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let path = std::env::args()
        .nth(1)
        .context("usage: ledger-replay <script.json>")?;

    let config = LedgerConfig::from_env().context("loading configuration")?;
    let script = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("reading {path}"))?;
    let commands: Vec<LedgerCommand> =
        serde_json::from_str(&script).with_context(|| format!("parsing {path}"))?;

    let ledger = Ledger::new(config).context("starting ledger")?;

    // Mirror committed records to the log as they happen
    let mut subscription = ledger.events().subscribe(EventFilter::all());
    let watcher = tokio::spawn(async move {
        let mut seen = 0usize;
        while let Some(record) = subscription.recv().await {
            debug!(sequence = record.sequence, topic = ?record.event.topic(), "Committed");
            seen += 1;
        }
        seen
    });

    let total = commands.len();
    let mut rejected = 0usize;
    for (index, command) in commands.into_iter().enumerate() {
        let name = command.name();
        let caller = short_hex(&command.caller());
        match ledger.execute(command) {
            Ok(outcome) => info!(index, op = name, caller = %caller, ?outcome, "Applied"),
            Err(e) => {
                rejected += 1;
                warn!(index, op = name, caller = %caller, kind = ?e.kind(), error = %e, "Rejected");
            }
        }
    }

    let exported = ledger
        .events()
        .export_json_lines()
        .context("exporting event log")?;
    print!("{exported}");

    drop(ledger);
    let seen = watcher.await.context("event watcher")?;
    info!(total, rejected, events = seen, "Replay finished");

    Ok(())
}
