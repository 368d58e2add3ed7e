// src/answer.rs

use crate::constants::{LINE_SEPARATOR, PAIR_SEPARATOR};
use crate::errors::{QuizError, QuizResult};
use crate::models::AnswerShape;
use std::collections::BTreeSet;

/// A candidate answer submitted by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    TextList(Vec<String>),
    Index(usize),
    Selection(BTreeSet<usize>),
    Number(i32),
    Boolean(bool),
}

impl Answer {
    pub fn selection<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Answer::Selection(indices.into_iter().collect())
    }

    /// Parses raw player input for a quiz of the given answer shape.
    ///
    /// Text is taken as-is, lists and index sets are JSON arrays, booleans
    /// are the literal `true`/`false`.
    pub fn parse(shape: AnswerShape, raw: &str) -> QuizResult<Answer> {
        let raw = raw.trim();
        let answer = match shape {
            AnswerShape::Text => Answer::Text(raw.to_string()),
            AnswerShape::TextList => Answer::TextList(serde_json::from_str(raw)?),
            AnswerShape::Index => Answer::Index(raw.parse().map_err(|_| {
                QuizError::Parse(format!("'{}' is not an option index", raw))
            })?),
            AnswerShape::IndexSet => Answer::Selection(serde_json::from_str(raw)?),
            AnswerShape::Number => Answer::Number(
                raw.parse()
                    .map_err(|_| QuizError::Parse(format!("'{}' is not a number", raw)))?,
            ),
            AnswerShape::Boolean => Answer::Boolean(match raw {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(QuizError::Parse(format!(
                        "'{}' is neither 'true' nor 'false'",
                        raw
                    )))
                }
            }),
        };
        Ok(answer)
    }
}

// --- Formatting ---

/// Joins answers with the platform line separator, no trailing separator.
pub fn format_answers<S: AsRef<str>>(answers: &[S]) -> String {
    answers
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Maps each index to its option and joins the result.
/// An index outside of `options` is rejected, never clamped.
pub fn format_indexed<S: AsRef<str>>(indices: &[usize], options: &[S]) -> QuizResult<String> {
    let readable = indices
        .iter()
        .map(|&i| {
            options.get(i).map(|o| o.as_ref()).ok_or_else(|| {
                QuizError::Validation(format!(
                    "Answer index {} is out of range for {} options",
                    i,
                    options.len()
                ))
            })
        })
        .collect::<QuizResult<Vec<&str>>>()?;
    Ok(format_answers(&readable))
}

/// Renders a two-part option as "part one <> part two".
pub fn readable_pair(pair: &[String; 2]) -> String {
    format!("{}{}{}", pair[0], PAIR_SEPARATOR, pair[1])
}

pub fn format_translated(indices: &[usize], options: &[[String; 2]]) -> QuizResult<String> {
    let readable: Vec<String> = options.iter().map(readable_pair).collect();
    format_indexed(indices, &readable)
}

// --- Comparison ---

pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Exact set equality between the checked items and the correct indices:
/// every correct index must be checked and nothing else may be.
pub fn is_selection_correct(checked: &BTreeSet<usize>, answer: &[usize]) -> bool {
    if !answer.iter().all(|a| checked.contains(a)) {
        return false;
    }
    checked.len() == answer.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_trailing_separator() {
        let joined = format_answers(&["one", "two", "three"]);
        assert_eq!(
            joined,
            format!("one{sep}two{sep}three", sep = LINE_SEPARATOR)
        );
        assert_eq!(format_answers::<&str>(&[]), "");
        assert_eq!(format_answers(&["solo"]), "solo");
    }

    #[test]
    fn maps_indices_to_options() {
        let options = ["red", "green", "blue"];
        let formatted = format_indexed(&[2, 0], &options).unwrap();
        assert_eq!(formatted, format!("blue{}red", LINE_SEPARATOR));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = format_indexed(&[3], &["a", "b", "c"]).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn renders_translate_pairs() {
        let options = [
            ["hello".to_string(), "hallo".to_string()],
            ["cat".to_string(), "Katze".to_string()],
        ];
        assert_eq!(format_translated(&[1], &options).unwrap(), "cat <> Katze");
    }

    #[test]
    fn selection_requires_exact_set() {
        let answer = [0, 2];
        assert!(is_selection_correct(&BTreeSet::from([0, 2]), &answer));
        assert!(!is_selection_correct(&BTreeSet::from([0]), &answer));
        assert!(!is_selection_correct(&BTreeSet::from([0, 1, 2]), &answer));
        assert!(!is_selection_correct(&BTreeSet::from([1, 3]), &answer));
    }

    #[test]
    fn parses_raw_input_by_shape() {
        assert_eq!(
            Answer::parse(AnswerShape::IndexSet, "[2, 0]").unwrap(),
            Answer::selection([0, 2])
        );
        assert_eq!(
            Answer::parse(AnswerShape::TextList, r#"["a","b"]"#).unwrap(),
            Answer::TextList(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            Answer::parse(AnswerShape::Number, " 42 ").unwrap(),
            Answer::Number(42)
        );
        assert_eq!(
            Answer::parse(AnswerShape::Boolean, "false").unwrap(),
            Answer::Boolean(false)
        );
        assert!(Answer::parse(AnswerShape::Boolean, "yes").is_err());
        assert!(Answer::parse(AnswerShape::Index, "-1").is_err());
    }
}
