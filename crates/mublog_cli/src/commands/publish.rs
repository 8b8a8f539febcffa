//! Publish command implementation.

use std::path::Path;

use mublog_client::{
    AttoClient, ClientConfig, EditDocument, PostAction, PublishEngine, PublishOutcome,
};
use mublog_store::Database;

/// Runs the publish command.
///
/// Without the update flags the document is published as a new post;
/// with both, the named post is replaced.
pub fn run(
    config: &ClientConfig,
    db: &mut Database,
    file: &Path,
    update_id: Option<String>,
    update_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let action = match (update_id, update_url) {
        (None, None) => PostAction::Create,
        (Some(post_id), Some(post_url)) => PostAction::Update { post_id, post_url },
        _ => return Err("--update-id and --update-url must be given together".into()),
    };

    let text = std::fs::read_to_string(file)?;
    let session = EditDocument::parse(&text)?.into_session(action);

    let client = AttoClient::new(config.timeout);
    match PublishEngine::new(config, &client).submit(session, db)? {
        PublishOutcome::Created { sync } => {
            println!(
                "post created; cache refreshed ({} posts)",
                sync.records_written
            );
        }
        PublishOutcome::Updated { post_id } => {
            println!("post {post_id} updated");
        }
    }
    Ok(())
}
