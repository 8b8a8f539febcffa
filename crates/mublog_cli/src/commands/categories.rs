//! Categories command implementation.

use mublog_store::Database;

/// Runs the categories command: every distinct tag in the cache, sorted.
pub fn run(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let tags = db.known_categories()?;

    if tags.is_empty() {
        println!("no categories known");
        return Ok(());
    }
    for tag in tags {
        println!("{tag}");
    }
    Ok(())
}
