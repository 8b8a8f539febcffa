//! List command implementation.

use mublog_store::Database;

/// Runs the list command.
pub fn run(db: &Database, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let posts = db.list_posts()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        _ => {
            if posts.is_empty() {
                println!("cache is empty; run `mublog sync` first");
                return Ok(());
            }
            for post in &posts {
                super::print_post(post);
            }
        }
    }
    Ok(())
}
