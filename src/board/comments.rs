use rusqlite::{params, Connection};

use super::ideas::idea_exists;
use super::types::{Comment, NewComment};
use crate::error::{BoardError, BoardResult};

/// Comments on an idea in storage order. An unknown idea yields an empty list.
pub fn list_comments(conn: &Connection, idea_id: i64) -> BoardResult<Vec<Comment>> {
    let mut stmt =
        conn.prepare("SELECT idea_id, text FROM comments WHERE idea_id = ?1 ORDER BY id")?;

    let comments = stmt
        .query_map(params![idea_id], |row| {
            Ok(Comment {
                idea_id: row.get(0)?,
                text: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(comments)
}

/// Attach a comment to an existing idea. Returns the new comment's id.
pub fn create_comment(conn: &mut Connection, comment: &NewComment) -> BoardResult<i64> {
    let tx = conn.transaction()?;

    if !idea_exists(&tx, comment.idea_id)? {
        return Err(BoardError::IdeaNotFound(comment.idea_id));
    }

    tx.execute(
        "INSERT INTO comments (idea_id, text) VALUES (?1, ?2)",
        params![comment.idea_id, comment.text],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ideas::{create_idea, list_ideas};
    use crate::board::types::NewIdea;
    use crate::db::open_memory_database;

    fn seed_idea(conn: &Connection) -> i64 {
        create_idea(
            conn,
            &NewIdea {
                title: "T".into(),
                description: "D".into(),
                category: "C".into(),
                likes: None,
            },
        )
        .unwrap()
    }

    fn comment(idea_id: i64, text: &str) -> NewComment {
        NewComment {
            idea_id,
            text: text.into(),
        }
    }

    #[test]
    fn comment_on_missing_idea_inserts_nothing() {
        let mut conn = open_memory_database().unwrap();
        let err = create_comment(&mut conn, &comment(5, "hello")).unwrap_err();
        assert!(matches!(err, BoardError::IdeaNotFound(5)));

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM comments", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn comment_increments_comments_count() {
        let mut conn = open_memory_database().unwrap();
        let id = seed_idea(&conn);

        create_comment(&mut conn, &comment(id, "first")).unwrap();
        create_comment(&mut conn, &comment(id, "second")).unwrap();

        assert_eq!(list_ideas(&conn).unwrap()[0].comments_count, 2);
    }

    #[test]
    fn list_returns_only_that_ideas_comments_in_order() {
        let mut conn = open_memory_database().unwrap();
        let a = seed_idea(&conn);
        let b = seed_idea(&conn);

        create_comment(&mut conn, &comment(a, "a1")).unwrap();
        create_comment(&mut conn, &comment(b, "b1")).unwrap();
        create_comment(&mut conn, &comment(a, "a2")).unwrap();

        let comments = list_comments(&conn, a).unwrap();
        assert_eq!(comments, vec![comment(a, "a1"), comment(a, "a2")]);
    }

    #[test]
    fn list_for_unknown_idea_is_empty() {
        let conn = open_memory_database().unwrap();
        assert!(list_comments(&conn, 123).unwrap().is_empty());
    }
}
