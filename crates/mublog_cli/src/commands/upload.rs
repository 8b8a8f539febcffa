//! Upload command implementation.

use std::path::Path;

use mublog_client::{image_markup, AttoClient, ClientConfig, MediaEngine};

/// Runs the upload command. Prints the created resource's URL, or
/// ready-to-paste image markup when alt text is given.
pub fn run(
    config: &ClientConfig,
    file: &Path,
    alt: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = AttoClient::new(config.timeout);
    let url = MediaEngine::new(config, &client).upload(file)?;

    match alt {
        Some(alt) => println!("{}", image_markup(&url, alt)),
        None => println!("{url}"),
    }
    Ok(())
}
