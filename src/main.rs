use anyhow::Result;
use tracing::info;

use kibitz_uci::UciEngine;

fn main() -> Result<()> {
    // stdout carries the UCI protocol, so logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!(version = env!("CARGO_PKG_VERSION"), "kibitz starting");
    UciEngine::new().run()?;
    Ok(())
}
