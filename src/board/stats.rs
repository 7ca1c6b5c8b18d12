use rusqlite::Connection;
use serde::Serialize;

use crate::error::BoardResult;

/// Response from board_stats.
#[derive(Debug, Serialize)]
pub struct BoardStats {
    pub ideas: u64,
    pub comments: u64,
    pub likes: u64,
    /// Comments whose idea no longer exists.
    pub orphaned_comments: u64,
    /// Like rows whose idea no longer exists.
    pub orphaned_likes: u64,
    pub counter_mismatches: Vec<CounterMismatch>,
}

/// An idea whose `likes` counter disagrees with its like rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterMismatch {
    pub id: i64,
    pub counter: i64,
    pub actual: i64,
}

/// Compute board statistics. Read-only: mismatched counters are reported, not repaired.
pub fn board_stats(conn: &Connection) -> BoardResult<BoardStats> {
    Ok(BoardStats {
        ideas: count(conn, "SELECT COUNT(*) FROM ideas")?,
        comments: count(conn, "SELECT COUNT(*) FROM comments")?,
        likes: count(conn, "SELECT COUNT(*) FROM likes")?,
        orphaned_comments: count(
            conn,
            "SELECT COUNT(*) FROM comments c \
             WHERE NOT EXISTS (SELECT 1 FROM ideas i WHERE i.id = c.idea_id)",
        )?,
        orphaned_likes: count(
            conn,
            "SELECT COUNT(*) FROM likes l \
             WHERE NOT EXISTS (SELECT 1 FROM ideas i WHERE i.id = l.idea_id)",
        )?,
        counter_mismatches: counter_mismatches(conn)?,
    })
}

fn count(conn: &Connection, sql: &str) -> BoardResult<u64> {
    let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
    Ok(n as u64)
}

fn counter_mismatches(conn: &Connection) -> BoardResult<Vec<CounterMismatch>> {
    let mut stmt = conn.prepare(
        "SELECT id, counter, actual FROM ( \
             SELECT i.id AS id, COALESCE(i.likes, 0) AS counter, \
                    (SELECT COUNT(*) FROM likes l WHERE l.idea_id = i.id) AS actual \
             FROM ideas i \
         ) WHERE counter != actual ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CounterMismatch {
                id: row.get(0)?,
                counter: row.get(1)?,
                actual: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ideas::create_idea;
    use crate::board::likes::toggle_like;
    use crate::board::types::NewIdea;
    use crate::db::open_memory_database;

    fn seed_idea(conn: &Connection, likes: Option<i64>) -> i64 {
        create_idea(
            conn,
            &NewIdea {
                title: "T".into(),
                description: "D".into(),
                category: "C".into(),
                likes,
            },
        )
        .unwrap()
    }

    #[test]
    fn empty_board() {
        let conn = open_memory_database().unwrap();
        let stats = board_stats(&conn).unwrap();
        assert_eq!(stats.ideas, 0);
        assert_eq!(stats.comments, 0);
        assert_eq!(stats.likes, 0);
        assert!(stats.counter_mismatches.is_empty());
    }

    #[test]
    fn toggled_likes_stay_consistent() {
        let mut conn = open_memory_database().unwrap();
        let id = seed_idea(&conn, None);
        toggle_like(&mut conn, id, "alice").unwrap();
        toggle_like(&mut conn, id, "bob").unwrap();

        let stats = board_stats(&conn).unwrap();
        assert_eq!(stats.likes, 2);
        assert!(stats.counter_mismatches.is_empty());
    }

    #[test]
    fn seeded_likes_are_reported() {
        let conn = open_memory_database().unwrap();
        let id = seed_idea(&conn, Some(4));

        let stats = board_stats(&conn).unwrap();
        assert_eq!(
            stats.counter_mismatches,
            vec![CounterMismatch {
                id,
                counter: 4,
                actual: 0
            }]
        );
    }

    #[test]
    fn orphans_are_counted() {
        let conn = open_memory_database().unwrap();
        // Rows left behind by deployments that deleted ideas without their dependents
        conn.pragma_update(None, "foreign_keys", "OFF").unwrap();
        conn.execute("INSERT INTO comments (idea_id, text) VALUES (99, 'lost')", [])
            .unwrap();
        conn.execute("INSERT INTO likes (idea_id, user_id) VALUES (99, 'u')", [])
            .unwrap();

        let stats = board_stats(&conn).unwrap();
        assert_eq!(stats.orphaned_comments, 1);
        assert_eq!(stats.orphaned_likes, 1);
    }
}
