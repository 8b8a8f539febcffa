//! v001 -- Initial schema creation.
//!
//! Creates the single `posts` table and its ordering index.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id             TEXT PRIMARY KEY NOT NULL,  -- server uid, or canonical URL
    date_published TEXT NOT NULL,              -- ISO-8601, server-supplied
    content_html   TEXT NOT NULL DEFAULT '',
    url            TEXT NOT NULL DEFAULT '',   -- canonical permalink
    title          TEXT NOT NULL DEFAULT '',
    categories     TEXT NOT NULL DEFAULT ''    -- comma-and-space-joined tags
);

CREATE INDEX IF NOT EXISTS idx_posts_published
    ON posts(date_published DESC);
"#;

/// Apply the migration.
pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
