//! Post cache operations.
//!
//! Each operation exists as a free function over [`rusqlite::Connection`]
//! so a multi-page sync can run many of them inside one transaction, plus
//! a [`Database`] method wrapper for one-shot callers.

use std::collections::BTreeSet;

use rusqlite::{params, Connection, OptionalExtension};

use crate::database::Database;
use crate::error::StoreResult;
use crate::models::PostRecord;

/// Insert-or-replace a post by id. Full-row replace; re-ingesting the same
/// id never duplicates a row.
pub fn upsert_post(conn: &Connection, post: &PostRecord) -> StoreResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO posts
             (id, date_published, content_html, url, title, categories)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            post.id,
            post.date_published,
            post.content_html,
            post.url,
            post.title,
            post.categories,
        ],
    )?;
    Ok(())
}

/// Partial update of the locally-editable fields, used by the optimistic
/// reconciliation path after a successful remote edit.
///
/// `url` and `date_published` are deliberately left untouched. Affects zero
/// rows when `id` is absent; no row is created.
pub fn update_post_fields(
    conn: &Connection,
    id: &str,
    title: &str,
    content_html: &str,
    categories: &str,
) -> StoreResult<()> {
    let affected = conn.execute(
        "UPDATE posts SET title = ?2, content_html = ?3, categories = ?4 WHERE id = ?1",
        params![id, title, content_html, categories],
    )?;
    if affected == 0 {
        tracing::debug!(id, "update_post_fields matched no row");
    }
    Ok(())
}

/// Every cached post, newest first.
pub fn list_posts(conn: &Connection) -> StoreResult<Vec<PostRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date_published, content_html, url, title, categories
         FROM posts
         ORDER BY date_published DESC",
    )?;

    let rows = stmt.query_map([], row_to_post)?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row?);
    }
    Ok(posts)
}

/// Posts whose title, content, or categories contain `term` as a substring,
/// newest first.
///
/// Matching uses SQLite `LIKE`: case-insensitive for ASCII letters,
/// case-sensitive beyond that.
pub fn search_posts(conn: &Connection, term: &str) -> StoreResult<Vec<PostRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date_published, content_html, url, title, categories
         FROM posts
         WHERE title        LIKE '%' || ?1 || '%'
            OR content_html LIKE '%' || ?1 || '%'
            OR categories   LIKE '%' || ?1 || '%'
         ORDER BY date_published DESC",
    )?;

    let rows = stmt.query_map(params![term], row_to_post)?;

    let mut posts = Vec::new();
    for row in rows {
        posts.push(row?);
    }
    Ok(posts)
}

/// Single-record lookup by primary key.
pub fn get_post(conn: &Connection, id: &str) -> StoreResult<Option<PostRecord>> {
    let post = conn
        .query_row(
            "SELECT id, date_published, content_html, url, title, categories
             FROM posts WHERE id = ?1",
            params![id],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

/// Destructive wipe of the whole cache, used for a full re-sync reset.
pub fn clear_posts(conn: &Connection) -> StoreResult<()> {
    conn.execute("DELETE FROM posts", [])?;
    Ok(())
}

/// Every distinct tag name appearing in any cached post, sorted.
///
/// Derived from the current snapshot on every call; staleness would defeat
/// the auto-completion this feeds, so there is no caching layer.
pub fn known_categories(conn: &Connection) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT categories FROM posts WHERE categories != ''")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut tags = BTreeSet::new();
    for row in rows {
        let cell = row?;
        for tag in cell.split(',') {
            let tag = tag.trim();
            if !tag.is_empty() {
                tags.insert(tag.to_string());
            }
        }
    }
    Ok(tags.into_iter().collect())
}

fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRecord> {
    Ok(PostRecord {
        id: row.get(0)?,
        date_published: row.get(1)?,
        content_html: row.get(2)?,
        url: row.get(3)?,
        title: row.get(4)?,
        categories: row.get(5)?,
    })
}

impl Database {
    /// See [`upsert_post`].
    pub fn upsert_post(&self, post: &PostRecord) -> StoreResult<()> {
        upsert_post(self.conn(), post)
    }

    /// See [`update_post_fields`].
    pub fn update_post_fields(
        &self,
        id: &str,
        title: &str,
        content_html: &str,
        categories: &str,
    ) -> StoreResult<()> {
        update_post_fields(self.conn(), id, title, content_html, categories)
    }

    /// See [`list_posts`].
    pub fn list_posts(&self) -> StoreResult<Vec<PostRecord>> {
        list_posts(self.conn())
    }

    /// See [`search_posts`].
    pub fn search_posts(&self, term: &str) -> StoreResult<Vec<PostRecord>> {
        search_posts(self.conn(), term)
    }

    /// See [`get_post`].
    pub fn get_post(&self, id: &str) -> StoreResult<Option<PostRecord>> {
        get_post(self.conn(), id)
    }

    /// See [`clear_posts`].
    pub fn clear_posts(&self) -> StoreResult<()> {
        clear_posts(self.conn())
    }

    /// See [`known_categories`].
    pub fn known_categories(&self) -> StoreResult<Vec<String>> {
        known_categories(self.conn())
    }
}
