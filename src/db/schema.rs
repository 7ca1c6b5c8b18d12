//! SQL DDL for the board tables.
//!
//! Defines `ideas`, `comments` and `likes`. All DDL uses `IF NOT EXISTS` so a
//! store file created by an earlier deployment opens unchanged.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS ideas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT,
    category TEXT,
    likes INTEGER DEFAULT 0
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    idea_id INTEGER,
    text TEXT,
    FOREIGN KEY(idea_id) REFERENCES ideas(id)
);

CREATE INDEX IF NOT EXISTS idx_comments_idea ON comments(idea_id);

-- One like per (idea, user)
CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    idea_id INTEGER,
    user_id TEXT,
    FOREIGN KEY(idea_id) REFERENCES ideas(id),
    UNIQUE(idea_id, user_id)
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
