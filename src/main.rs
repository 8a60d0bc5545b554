//! slirc-presence daemon: JSON events on stdin, replies on stdout.

use slirc_presence::config::{self, Config};
use slirc_presence::{Driver, Tracker, telemetry};
use tokio::io::BufReader;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            eprintln!("failed to load config {path}: {e}");
            e
        })?,
        None => Config::default(),
    };

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            eprintln!("invalid config: {e}");
        }
        anyhow::bail!("configuration rejected ({} errors)", errors.len());
    }

    telemetry::init(&config.log);

    if config.tracker.expire_delay < 0 {
        warn!(
            expire_delay = config.tracker.expire_delay,
            "negative expire_delay, users are forgotten as soon as they leave"
        );
    }
    info!(
        expire_delay = config.tracker.expire_delay,
        casemapping = %config.tracker.casemapping,
        prefix = %config.tracker.prefix,
        "Starting slirc-presence"
    );

    let driver = Driver::new(Tracker::new(&config.tracker));
    let stdin = BufReader::new(tokio::io::stdin());
    let tracker = driver
        .run(stdin, tokio::io::stdout())
        .await
        .inspect_err(|e| error!(error = %e, "I/O failure"))?;

    info!(tracked = tracker.len(), "Shutdown complete");
    Ok(())
}
