//! Sync command implementation.

use mublog_client::{AttoClient, ClientConfig, SyncEngine};
use mublog_store::Database;

/// Runs a full sync walk and prints the outcome. With `reset`, the cache
/// is wiped in the same transaction as the walk.
pub fn run(
    config: &ClientConfig,
    db: &mut Database,
    reset: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = AttoClient::new(config.timeout);
    let engine = SyncEngine::new(config, &client);
    let outcome = if reset {
        engine.sync_with_reset(db)?
    } else {
        engine.sync(db)?
    };

    println!(
        "synced {} posts across {} pages",
        outcome.records_written, outcome.pages_fetched
    );
    Ok(())
}
