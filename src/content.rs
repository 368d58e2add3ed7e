// src/content.rs
//
// Bundled content parsing and the mapping between entities and durable rows.

use crate::category::Category;
use crate::constants::{DB_FALSE, DB_TRUE, NO_SCORE};
use crate::errors::{QuizError, QuizResult};
use crate::models::{CategoryRow, JsonCategory, JsonQuiz, QuizRow, QuizType, Theme};
use crate::quiz::{Quiz, QuizKind};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;

// --- Coercions ---

/// Bundled content stores booleans as the literal text "true"/"false".
pub fn bool_from_text(value: &str) -> QuizResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(QuizError::Validation(format!(
            "Expected 'true' or 'false', got '{}'",
            other
        ))),
    }
}

/// The durable store keeps flags as a single character, "1" for set.
/// Anything else, including NULL, reads as unset.
pub fn bool_from_db_flag(value: Option<&str>) -> bool {
    value == Some(DB_TRUE)
}

pub fn db_flag(value: bool) -> &'static str {
    if value {
        DB_TRUE
    } else {
        DB_FALSE
    }
}

/// Textual form of a bundled value: strings verbatim, everything else as JSON.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Empty strings are never stored; the column stays NULL instead.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_json<T: DeserializeOwned>(field: &str, question: &str, text: &str) -> QuizResult<T> {
    serde_json::from_str(text).map_err(|e| {
        QuizError::Parse(format!(
            "Field '{}' of quiz \"{}\" is malformed: {}",
            field, question, e
        ))
    })
}

fn parse_number<T: FromStr>(field: &str, question: &str, text: &str) -> QuizResult<T> {
    text.trim().parse().map_err(|_| {
        QuizError::Parse(format!(
            "Field '{}' of quiz \"{}\" is not a number: '{}'",
            field, question, text
        ))
    })
}

fn required<'a>(field: &str, row: &'a QuizRow) -> QuizResult<&'a str> {
    let value = match field {
        "options" => row.options.as_deref(),
        "min" => row.min.as_deref(),
        "max" => row.max.as_deref(),
        "step" => row.step.as_deref(),
        _ => None,
    };
    value.ok_or_else(|| {
        QuizError::Validation(format!(
            "{} quiz \"{}\" is missing '{}'",
            row.quiz_type, row.question, field
        ))
    })
}

// --- Bundled Content ---

pub fn parse_bundle(json: &str) -> QuizResult<Vec<JsonCategory>> {
    let categories: Vec<JsonCategory> = serde_json::from_str(json)?;
    debug!("Parsed {} bundled categories", categories.len());
    Ok(categories)
}

fn bundled_quiz_to_row(quiz: &JsonQuiz, category_id: &str) -> QuizRow {
    QuizRow {
        id: None,
        category_id: category_id.to_string(),
        quiz_type: quiz.quiz_type.clone(),
        question: quiz.question.clone(),
        answer: value_to_text(&quiz.answer),
        options: non_empty(quiz.options.as_ref().map(value_to_text)),
        min: non_empty(quiz.min.as_ref().map(value_to_text)),
        max: non_empty(quiz.max.as_ref().map(value_to_text)),
        step: non_empty(quiz.step.as_ref().map(value_to_text)),
        start: non_empty(quiz.start.clone()),
        end: non_empty(quiz.end.clone()),
        solved: None,
    }
}

/// Converts one bundled category into the rows that get inserted on pre-fill.
/// The rows are validated by building the entity from them first.
pub fn bundle_to_rows(category: &JsonCategory) -> QuizResult<(CategoryRow, Vec<QuizRow>)> {
    let solved = bool_from_text(&category.solved)?;
    let scores = category
        .scores
        .clone()
        .unwrap_or_else(|| vec![NO_SCORE; category.quizzes.len()]);

    let category_row = CategoryRow {
        id: category.id.clone(),
        name: category.name.clone(),
        theme: category.theme.clone(),
        solved: db_flag(solved).to_string(),
        scores: Some(serde_json::to_string(&scores)?),
    };
    let quiz_rows: Vec<QuizRow> = category
        .quizzes
        .iter()
        .map(|q| bundled_quiz_to_row(q, &category.id))
        .collect();

    category_from_rows(&category_row, &quiz_rows)?;
    Ok((category_row, quiz_rows))
}

/// Parses bundled content straight into entities.
pub fn load_bundle(json: &str) -> QuizResult<Vec<Category>> {
    parse_bundle(json)?
        .iter()
        .map(|c| {
            let (category_row, quiz_rows) = bundle_to_rows(c)?;
            category_from_rows(&category_row, &quiz_rows)
        })
        .collect()
}

// --- Rows -> Entities ---

pub fn quiz_from_row(row: &QuizRow) -> QuizResult<Quiz> {
    let quiz_type: QuizType = row.quiz_type.parse()?;
    let question = row.question.as_str();
    let answer = row.answer.as_str();

    let kind = match quiz_type {
        QuizType::AlphaPicker => QuizKind::AlphaPicker {
            answer: answer.to_string(),
        },
        QuizType::FillBlank => QuizKind::FillBlank {
            answer: answer.to_string(),
            start: row.start.clone(),
            end: row.end.clone(),
        },
        QuizType::FillTwoBlanks => QuizKind::FillTwoBlanks {
            answer: parse_json("answer", question, answer)?,
        },
        QuizType::FourQuarter => QuizKind::FourQuarter {
            answer: parse_json("answer", question, answer)?,
            options: parse_json("options", question, required("options", row)?)?,
        },
        QuizType::MultiSelect => QuizKind::MultiSelect {
            answer: parse_json("answer", question, answer)?,
            options: parse_json("options", question, required("options", row)?)?,
        },
        QuizType::Picker => QuizKind::Picker {
            answer: parse_number("answer", question, answer)?,
            min: parse_number("min", question, required("min", row)?)?,
            max: parse_number("max", question, required("max", row)?)?,
            step: parse_number("step", question, required("step", row)?)?,
        },
        QuizType::SingleSelect => QuizKind::SingleSelect {
            answer: parse_json("answer", question, answer)?,
            options: parse_json("options", question, required("options", row)?)?,
        },
        QuizType::SingleSelectItem => QuizKind::SingleSelectItem {
            answer: parse_json("answer", question, answer)?,
            options: parse_json("options", question, required("options", row)?)?,
        },
        QuizType::ToggleTranslate => QuizKind::ToggleTranslate {
            answer: parse_json("answer", question, answer)?,
            options: parse_json("options", question, required("options", row)?)?,
        },
        QuizType::TrueFalse => QuizKind::TrueFalse {
            answer: bool_from_text(answer)?,
        },
    };

    Quiz::new(question, kind, bool_from_db_flag(row.solved.as_deref()))
}

pub fn category_from_rows(row: &CategoryRow, quiz_rows: &[QuizRow]) -> QuizResult<Category> {
    let theme: Theme = row.theme.parse()?;
    let quizzes = quiz_rows
        .iter()
        .map(quiz_from_row)
        .collect::<QuizResult<Vec<Quiz>>>()?;
    let scores: Vec<i32> = match row.scores.as_deref() {
        Some(text) => serde_json::from_str(text).map_err(|e| {
            QuizError::Parse(format!("Scores of category '{}' are malformed: {}", row.id, e))
        })?,
        None => vec![NO_SCORE; quizzes.len()],
    };

    Category::with_scores(
        row.name.clone(),
        row.id.clone(),
        theme,
        quizzes,
        scores,
        bool_from_db_flag(Some(row.solved.as_str())),
    )
}

// --- Entities -> Rows ---

pub fn quiz_to_row(quiz: &Quiz, category_id: &str) -> QuizResult<QuizRow> {
    let mut row = QuizRow {
        id: None,
        category_id: category_id.to_string(),
        quiz_type: quiz.quiz_type().json_name().to_string(),
        question: quiz.question().to_string(),
        solved: Some(db_flag(quiz.is_solved()).to_string()),
        ..QuizRow::default()
    };

    match quiz.kind() {
        QuizKind::AlphaPicker { answer } => row.answer = answer.clone(),
        QuizKind::FillBlank { answer, start, end } => {
            row.answer = answer.clone();
            row.start = non_empty(start.clone());
            row.end = non_empty(end.clone());
        }
        QuizKind::FillTwoBlanks { answer } => row.answer = serde_json::to_string(answer)?,
        QuizKind::FourQuarter { answer, options }
        | QuizKind::MultiSelect { answer, options }
        | QuizKind::SingleSelect { answer, options }
        | QuizKind::SingleSelectItem { answer, options } => {
            row.answer = serde_json::to_string(answer)?;
            row.options = Some(serde_json::to_string(options)?);
        }
        QuizKind::ToggleTranslate { answer, options } => {
            row.answer = serde_json::to_string(answer)?;
            row.options = Some(serde_json::to_string(options)?);
        }
        QuizKind::Picker {
            answer,
            min,
            max,
            step,
        } => {
            row.answer = answer.to_string();
            row.min = Some(min.to_string());
            row.max = Some(max.to_string());
            row.step = Some(step.to_string());
        }
        QuizKind::TrueFalse { answer } => row.answer = answer.to_string(),
    }
    Ok(row)
}

pub fn category_to_rows(category: &Category) -> QuizResult<(CategoryRow, Vec<QuizRow>)> {
    let category_row = CategoryRow {
        id: category.id().to_string(),
        name: category.name().to_string(),
        theme: category.theme().as_str().to_string(),
        solved: db_flag(category.is_solved()).to_string(),
        scores: Some(serde_json::to_string(category.scores())?),
    };
    let quiz_rows = category
        .quizzes()
        .iter()
        .map(|q| quiz_to_row(q, category.id()))
        .collect::<QuizResult<Vec<QuizRow>>>()?;
    Ok((category_row, quiz_rows))
}
