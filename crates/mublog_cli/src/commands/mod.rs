//! CLI command implementations.

pub mod categories;
pub mod list;
pub mod publish;
pub mod search;
pub mod sync;
pub mod upload;

use mublog_store::PostRecord;

/// Prints one cached post in the text layout shared by `list` and
/// `search`. The date is truncated to the day.
pub(crate) fn print_post(post: &PostRecord) {
    let date = post.date_published.split('T').next().unwrap_or_default();
    let title = if post.title.is_empty() {
        "(untitled)"
    } else {
        &post.title
    };

    println!("{date}  {title}");
    println!("    id:   {}", post.id);
    if !post.url.is_empty() {
        println!("    url:  {}", post.url);
    }
    if !post.categories.is_empty() {
        println!("    tags: {}", post.categories);
    }
}
