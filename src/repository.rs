// src/repository.rs

use crate::constants::{CATEGORY_TABLE, QUIZ_TABLE};
use crate::models::{CategoryRow, QuizRow};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const CATEGORY_COLUMNS: &str = "id, name, theme, solved, scores";
const QUIZ_COLUMNS: &str =
    "id, fk_category, type, question, answer, options, min, max, step, start, \"end\", solved";

fn category_from_row(row: &Row<'_>) -> Result<CategoryRow> {
    Ok(CategoryRow {
        id: row.get(0)?,
        name: row.get(1)?,
        theme: row.get(2)?,
        solved: row.get(3)?,
        scores: row.get(4)?,
    })
}

fn quiz_from_row(row: &Row<'_>) -> Result<QuizRow> {
    Ok(QuizRow {
        id: row.get(0)?,
        category_id: row.get(1)?,
        quiz_type: row.get(2)?,
        question: row.get(3)?,
        answer: row.get(4)?,
        options: row.get(5)?,
        min: row.get(6)?,
        max: row.get(7)?,
        step: row.get(8)?,
        start: row.get(9)?,
        end: row.get(10)?,
        solved: row.get(11)?,
    })
}

pub fn count_categories(conn: &Connection) -> Result<i64> {
    conn.query_row(&format!("SELECT count(*) FROM {}", CATEGORY_TABLE), [], |r| {
        r.get(0)
    })
}

/// All category rows in insertion order.
pub fn get_category_rows(conn: &Connection) -> Result<Vec<CategoryRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} ORDER BY rowid",
        CATEGORY_COLUMNS, CATEGORY_TABLE
    ))?;
    let rows = stmt
        .query_map([], category_from_row)?
        .collect::<Result<Vec<CategoryRow>, _>>()?;
    Ok(rows)
}

pub fn find_category_row(conn: &Connection, category_id: &str) -> Result<Option<CategoryRow>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM {} WHERE id = ?",
            CATEGORY_COLUMNS, CATEGORY_TABLE
        ),
        [category_id],
        category_from_row,
    )
    .optional()
}

/// Quiz rows of a category, in the order they were seeded.
pub fn get_quiz_rows(conn: &Connection, category_id: &str) -> Result<Vec<QuizRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} WHERE fk_category = ? ORDER BY id",
        QUIZ_COLUMNS, QUIZ_TABLE
    ))?;
    let rows = stmt
        .query_map([category_id], quiz_from_row)?
        .collect::<Result<Vec<QuizRow>, _>>()?;
    Ok(rows)
}

pub fn insert_category(conn: &Connection, row: &CategoryRow) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?, ?, ?)",
            CATEGORY_TABLE, CATEGORY_COLUMNS
        ),
        params![row.id, row.name, row.theme, row.solved, row.scores],
    )?;
    Ok(())
}

pub fn insert_quiz(conn: &Connection, row: &QuizRow) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} (fk_category, type, question, answer, options, min, max, step, start, \"end\", solved)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            QUIZ_TABLE
        ),
        params![
            row.category_id,
            row.quiz_type,
            row.question,
            row.answer,
            row.options,
            row.min,
            row.max,
            row.step,
            row.start,
            row.end,
            row.solved
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Writes the mutable part of a category: its solved flag and scores.
pub fn update_category_progress(conn: &Connection, row: &CategoryRow) -> Result<usize> {
    conn.execute(
        &format!(
            "UPDATE {} SET solved = ?, scores = ? WHERE id = ?",
            CATEGORY_TABLE
        ),
        params![row.solved, row.scores, row.id],
    )
}

/// Writes a quiz's solved flag. Quizzes are matched by question text.
pub fn update_quiz_solved(conn: &Connection, question: &str, solved: &str) -> Result<usize> {
    let updated = conn.execute(
        &format!("UPDATE {} SET solved = ? WHERE question = ?", QUIZ_TABLE),
        params![solved, question],
    )?;
    if updated == 0 {
        debug!("[DB] No quiz row matches question {:?}", question);
    }
    Ok(updated)
}
