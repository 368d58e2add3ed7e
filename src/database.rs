// src/database.rs

use crate::constants::{CATEGORY_TABLE, QUIZ_TABLE};
use crate::content;
use crate::errors::QuizResult;
use crate::repository;
use log::{debug, error, info};
use rusqlite::{Connection, Transaction};

pub fn init_db(conn: &mut Connection, bundle: &str) -> QuizResult<()> {
    debug!("init_db: Checking database schema...");

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {category} (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            theme TEXT NOT NULL,
            solved TEXT NOT NULL,
            scores TEXT
        );
        CREATE TABLE IF NOT EXISTS {quiz} (
            id INTEGER PRIMARY KEY,
            fk_category TEXT REFERENCES {category}(id),
            type TEXT NOT NULL,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            options TEXT,
            min TEXT,
            max TEXT,
            step TEXT,
            start TEXT,
            "end" TEXT,
            solved TEXT
        );
        "#,
        category = CATEGORY_TABLE,
        quiz = QUIZ_TABLE
    ))?;

    if repository::count_categories(conn)? == 0 {
        info!("init_db: Category table empty. Pre-filling from bundled content...");
        // A broken bundle leaves the store empty rather than failing start-up.
        if let Err(e) = prefill(conn, bundle) {
            error!("init_db: Pre-fill aborted and rolled back: {}", e);
        }
    }

    Ok(())
}

/// Inserts every bundled category and quiz in one transaction.
pub fn prefill(conn: &mut Connection, bundle: &str) -> QuizResult<()> {
    let tx = conn.transaction()?;
    fill_categories_and_quizzes(&tx, bundle)?;
    tx.commit()?;
    Ok(())
}

/// Drops all progress and re-seeds from the bundle. The delete and the
/// re-seed commit together or not at all.
pub fn reset(conn: &mut Connection, bundle: &str) -> QuizResult<()> {
    let tx = conn.transaction()?;
    let quizzes = tx.execute(&format!("DELETE FROM {}", QUIZ_TABLE), [])?;
    let categories = tx.execute(&format!("DELETE FROM {}", CATEGORY_TABLE), [])?;
    debug!(
        "reset: Deleted {} categories and {} quizzes",
        categories, quizzes
    );
    fill_categories_and_quizzes(&tx, bundle)?;
    tx.commit()?;
    info!("reset: Store re-seeded from bundled content");
    Ok(())
}

fn fill_categories_and_quizzes(tx: &Transaction<'_>, bundle: &str) -> QuizResult<()> {
    let categories = content::parse_bundle(bundle)?;

    // Validate everything before the first insert.
    let rows = categories
        .iter()
        .map(content::bundle_to_rows)
        .collect::<QuizResult<Vec<_>>>()?;

    let mut quiz_count = 0;
    for (category_row, quiz_rows) in &rows {
        repository::insert_category(tx, category_row)?;
        for quiz_row in quiz_rows {
            repository::insert_quiz(tx, quiz_row)?;
        }
        quiz_count += quiz_rows.len();
    }

    info!(
        "Seeded {} categories with {} quizzes",
        rows.len(),
        quiz_count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"[
      {"id": "music", "name": "Music", "theme": "red", "scores": [0, 0], "solved": "false",
       "quizzes": [
         {"type": "alpha-picker", "question": "Note after F", "answer": "G"},
         {"type": "true-false", "question": "A piano has 88 keys", "answer": "true"}
       ]}
    ]"#;

    // Passes validation; the second category collides on the primary key.
    const DUPLICATE_ID_BUNDLE: &str = r#"[
      {"id": "art", "name": "Art", "theme": "purple", "solved": "false",
       "quizzes": [{"type": "true-false", "question": "Monet painted water lilies", "answer": "true"}]},
      {"id": "art", "name": "More Art", "theme": "blue", "solved": "false",
       "quizzes": [{"type": "alpha-picker", "question": "Initial of Picasso", "answer": "P"}]}
    ]"#;

    fn open() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn seeds_empty_database_once() {
        let mut conn = open();
        init_db(&mut conn, BUNDLE).unwrap();
        init_db(&mut conn, BUNDLE).unwrap();

        assert_eq!(repository::count_categories(&conn).unwrap(), 1);
        let quizzes: i64 = conn
            .query_row(&format!("SELECT count(*) FROM {}", QUIZ_TABLE), [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(quizzes, 2);
    }

    #[test]
    fn broken_bundle_leaves_store_empty() {
        let mut conn = open();
        let broken = BUNDLE.replace("alpha-picker", "word-search");
        init_db(&mut conn, &broken).unwrap();
        assert_eq!(repository::count_categories(&conn).unwrap(), 0);
    }

    #[test]
    fn failed_reset_keeps_previous_rows() {
        let mut conn = open();
        init_db(&mut conn, BUNDLE).unwrap();

        let err = reset(&mut conn, "[{").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert_eq!(repository::count_categories(&conn).unwrap(), 1);
    }

    fn quiz_count(conn: &Connection) -> i64 {
        conn.query_row(&format!("SELECT count(*) FROM {}", QUIZ_TABLE), [], |r| {
            r.get(0)
        })
        .unwrap()
    }

    #[test]
    fn insert_failure_rolls_back_partial_prefill() {
        let mut conn = open();
        init_db(&mut conn, DUPLICATE_ID_BUNDLE).unwrap();
        assert_eq!(repository::count_categories(&conn).unwrap(), 0);
        assert_eq!(quiz_count(&conn), 0);
    }

    #[test]
    fn insert_failure_rolls_back_partial_reset() {
        let mut conn = open();
        init_db(&mut conn, BUNDLE).unwrap();

        let err = reset(&mut conn, DUPLICATE_ID_BUNDLE).unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");

        let rows = repository::get_category_rows(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "music");
        assert_eq!(quiz_count(&conn), 2);
    }
}
