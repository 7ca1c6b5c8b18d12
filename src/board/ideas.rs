//! Idea CRUD: list with comment counts, create, overwrite, delete.
//!
//! Deleting an idea also removes its comments and likes in the same
//! transaction, so no dependent row outlives its idea.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{Idea, IdeaSummary, IdeaUpdate, NewIdea};
use crate::error::{BoardError, BoardResult};

fn idea_from_row(row: &Row) -> rusqlite::Result<Idea> {
    Ok(Idea {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        likes: row.get(4)?,
    })
}

/// Every idea in storage order, each with the number of comments referencing it.
pub fn list_ideas(conn: &Connection) -> BoardResult<Vec<IdeaSummary>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.title, i.description, i.category, COALESCE(i.likes, 0), \
                (SELECT COUNT(*) FROM comments c WHERE c.idea_id = i.id) \
         FROM ideas i ORDER BY i.id",
    )?;

    let ideas = stmt
        .query_map([], |row| {
            Ok(IdeaSummary {
                idea: idea_from_row(row)?,
                comments_count: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ideas)
}

/// Fetch a single idea.
#[cfg(test)]
pub fn get_idea(conn: &Connection, idea_id: i64) -> BoardResult<Idea> {
    conn.query_row(
        "SELECT id, title, description, category, COALESCE(likes, 0) FROM ideas WHERE id = ?1",
        params![idea_id],
        idea_from_row,
    )
    .optional()?
    .ok_or(BoardError::IdeaNotFound(idea_id))
}

pub fn idea_exists(conn: &Connection, idea_id: i64) -> BoardResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM ideas WHERE id = ?1", params![idea_id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Insert a new idea and return its id. An absent `likes` seeds the counter with 0.
pub fn create_idea(conn: &Connection, idea: &NewIdea) -> BoardResult<i64> {
    conn.execute(
        "INSERT INTO ideas (title, description, category, likes) VALUES (?1, ?2, ?3, ?4)",
        params![
            idea.title,
            idea.description,
            idea.category,
            idea.likes.unwrap_or(0)
        ],
    )?;
    let id = conn.last_insert_rowid();

    tracing::debug!(id, category = %idea.category, "idea inserted");
    Ok(id)
}

/// Overwrite all mutable fields of an idea.
pub fn update_idea(conn: &Connection, idea_id: i64, idea: &IdeaUpdate) -> BoardResult<()> {
    let changed = conn.execute(
        "UPDATE ideas SET title = ?1, description = ?2, category = ?3, likes = ?4 WHERE id = ?5",
        params![idea.title, idea.description, idea.category, idea.likes, idea_id],
    )?;

    if changed == 0 {
        return Err(BoardError::IdeaNotFound(idea_id));
    }
    Ok(())
}

/// Delete an idea together with its comments and likes.
pub fn delete_idea(conn: &mut Connection, idea_id: i64) -> BoardResult<()> {
    let tx = conn.transaction()?;

    // Dependents first: the foreign keys are enforced and do not cascade.
    let comments = tx.execute("DELETE FROM comments WHERE idea_id = ?1", params![idea_id])?;
    let likes = tx.execute("DELETE FROM likes WHERE idea_id = ?1", params![idea_id])?;

    let deleted = tx.execute("DELETE FROM ideas WHERE id = ?1", params![idea_id])?;
    if deleted == 0 {
        // Dropping the transaction rolls back the dependent deletes.
        return Err(BoardError::IdeaNotFound(idea_id));
    }

    tx.commit()?;

    tracing::debug!(id = idea_id, comments, likes, "idea deleted with dependents");
    Ok(())
}
