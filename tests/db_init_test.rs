use ideaboard::board::ideas::{create_idea, delete_idea, list_ideas};
use ideaboard::board::types::NewIdea;
use ideaboard::db;
use rusqlite::Connection;
use tempfile::TempDir;

fn idea(title: &str) -> NewIdea {
    NewIdea {
        title: title.into(),
        description: "D".into(),
        category: "C".into(),
        likes: None,
    }
}

#[test]
fn open_creates_new_db_at_nonexistent_path() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("subdir").join("ideas.db");

    // Should not exist yet
    assert!(!db_path.exists());

    let conn = db::open_database(&db_path).unwrap();

    // Should have been created
    assert!(db_path.exists());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM ideas", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn data_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("ideas.db");

    {
        let conn = db::open_database(&db_path).unwrap();
        create_idea(&conn, &idea("persisted")).unwrap();
    }

    let conn = db::open_database(&db_path).unwrap();
    let ideas = list_ideas(&conn).unwrap();
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].idea.title, "persisted");
}

#[test]
fn busy_timeout_is_set() {
    let tmp = TempDir::new().unwrap();
    let conn = db::open_database(tmp.path().join("test.db")).unwrap();

    let timeout: i64 = conn
        .pragma_query_value(None, "busy_timeout", |row| row.get(0))
        .unwrap();
    assert_eq!(timeout, 5000);
}

#[test]
fn opens_file_created_without_comment_index() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("legacy.db");

    // Tables as created by earlier deployments, with a leftover orphan comment
    {
        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE ideas (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, \
                 description TEXT, category TEXT, likes INTEGER DEFAULT 0);
             CREATE TABLE comments (id INTEGER PRIMARY KEY AUTOINCREMENT, idea_id INTEGER, \
                 text TEXT, FOREIGN KEY(idea_id) REFERENCES ideas(id));
             CREATE TABLE likes (id INTEGER PRIMARY KEY AUTOINCREMENT, idea_id INTEGER, \
                 user_id TEXT, FOREIGN KEY(idea_id) REFERENCES ideas(id), UNIQUE(idea_id, user_id));
             INSERT INTO ideas (title, description, category) VALUES ('old', 'd', 'c');
             INSERT INTO comments (idea_id, text) VALUES (77, 'orphan');",
        )
        .unwrap();
    }

    let mut conn = db::open_database(&db_path).unwrap();
    let ideas = list_ideas(&conn).unwrap();
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].comments_count, 0);

    let stats = ideaboard::board::stats::board_stats(&conn).unwrap();
    assert_eq!(stats.orphaned_comments, 1);

    delete_idea(&mut conn, ideas[0].idea.id).unwrap();
    assert!(list_ideas(&conn).unwrap().is_empty());

    let report = db::check_database_health(&conn).unwrap();
    assert!(report.integrity_ok);
}
