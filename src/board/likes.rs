//! Per-user like toggling.
//!
//! A like row and the idea's `likes` counter always move together: the
//! presence check, the row insert/delete and the counter update run in one
//! `IMMEDIATE` transaction, so two toggles for the same (idea, user) cannot
//! interleave.

use rusqlite::{params, Connection, TransactionBehavior};

use super::ideas::idea_exists;
use super::types::LikeToggle;
use crate::error::{BoardError, BoardResult};

/// Add `user_id`'s like to an idea, or remove it if already present.
pub fn toggle_like(conn: &mut Connection, idea_id: i64, user_id: &str) -> BoardResult<LikeToggle> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if !idea_exists(&tx, idea_id)? {
        return Err(BoardError::IdeaNotFound(idea_id));
    }

    let removed = tx.execute(
        "DELETE FROM likes WHERE idea_id = ?1 AND user_id = ?2",
        params![idea_id, user_id],
    )?;

    let liked = if removed > 0 {
        tx.execute(
            "UPDATE ideas SET likes = COALESCE(likes, 0) - 1 WHERE id = ?1",
            params![idea_id],
        )?;
        false
    } else {
        tx.execute(
            "INSERT INTO likes (idea_id, user_id) VALUES (?1, ?2)",
            params![idea_id, user_id],
        )?;
        tx.execute(
            "UPDATE ideas SET likes = COALESCE(likes, 0) + 1 WHERE id = ?1",
            params![idea_id],
        )?;
        true
    };

    tx.commit()?;
    Ok(LikeToggle { liked })
}

/// Whether `user_id` currently likes the idea.
#[cfg(test)]
pub fn has_liked(conn: &Connection, idea_id: i64, user_id: &str) -> BoardResult<bool> {
    let liked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE idea_id = ?1 AND user_id = ?2)",
        params![idea_id, user_id],
        |row| row.get(0),
    )?;
    Ok(liked)
}
