//! Search command implementation.

use mublog_store::Database;

/// Runs the search command.
pub fn run(db: &Database, term: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let posts = db.search_posts(term)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        _ => {
            if posts.is_empty() {
                println!("no cached post matches {term:?}");
                return Ok(());
            }
            for post in &posts {
                super::print_post(post);
            }
            println!("{} match(es)", posts.len());
        }
    }
    Ok(())
}
