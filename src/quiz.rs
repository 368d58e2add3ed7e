// src/quiz.rs

use crate::answer::{
    equals_ignore_case, format_answers, format_indexed, format_translated, is_selection_correct,
    Answer,
};
use crate::constants::{FILL_TWO_BLANKS_PARTS, FOUR_QUARTER_OPTIONS};
use crate::errors::{QuizError, QuizResult};
use crate::models::QuizType;
use log::debug;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

/// Variant payloads. Option based variants store their correct answer as
/// indices into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizKind {
    AlphaPicker {
        answer: String,
    },
    FillBlank {
        answer: String,
        start: Option<String>,
        end: Option<String>,
    },
    FillTwoBlanks {
        answer: Vec<String>,
    },
    FourQuarter {
        answer: Vec<usize>,
        options: Vec<String>,
    },
    MultiSelect {
        answer: Vec<usize>,
        options: Vec<String>,
    },
    Picker {
        answer: i32,
        min: i32,
        max: i32,
        step: i32,
    },
    SingleSelect {
        answer: Vec<usize>,
        options: Vec<String>,
    },
    SingleSelectItem {
        answer: Vec<usize>,
        options: Vec<String>,
    },
    ToggleTranslate {
        answer: Vec<usize>,
        options: Vec<[String; 2]>,
    },
    TrueFalse {
        answer: bool,
    },
}

impl QuizKind {
    pub fn quiz_type(&self) -> QuizType {
        match self {
            QuizKind::AlphaPicker { .. } => QuizType::AlphaPicker,
            QuizKind::FillBlank { .. } => QuizType::FillBlank,
            QuizKind::FillTwoBlanks { .. } => QuizType::FillTwoBlanks,
            QuizKind::FourQuarter { .. } => QuizType::FourQuarter,
            QuizKind::MultiSelect { .. } => QuizType::MultiSelect,
            QuizKind::Picker { .. } => QuizType::Picker,
            QuizKind::SingleSelect { .. } => QuizType::SingleSelect,
            QuizKind::SingleSelectItem { .. } => QuizType::SingleSelectItem,
            QuizKind::ToggleTranslate { .. } => QuizType::ToggleTranslate,
            QuizKind::TrueFalse { .. } => QuizType::TrueFalse,
        }
    }

    fn validate(&self) -> QuizResult<()> {
        match self {
            QuizKind::AlphaPicker { answer } => {
                if answer.chars().count() != 1 {
                    return Err(invalid(format!(
                        "alpha-picker answer must be a single letter, got '{}'",
                        answer
                    )));
                }
            }
            QuizKind::FillBlank { answer, .. } => {
                if answer.trim().is_empty() {
                    return Err(invalid("fill-blank answer must not be empty".into()));
                }
            }
            QuizKind::FillTwoBlanks { answer } => {
                if answer.len() != FILL_TWO_BLANKS_PARTS || answer.iter().any(|a| a.is_empty()) {
                    return Err(invalid(format!(
                        "fill-two-blanks needs {} non-empty parts, got {:?}",
                        FILL_TWO_BLANKS_PARTS, answer
                    )));
                }
            }
            QuizKind::FourQuarter { answer, options } => {
                if options.len() != FOUR_QUARTER_OPTIONS {
                    return Err(invalid(format!(
                        "four-quarter needs {} options, got {}",
                        FOUR_QUARTER_OPTIONS,
                        options.len()
                    )));
                }
                validate_single(answer)?;
                validate_indices(answer, options.len())?;
            }
            QuizKind::SingleSelect { answer, options }
            | QuizKind::SingleSelectItem { answer, options } => {
                validate_single(answer)?;
                validate_indices(answer, options.len())?;
            }
            QuizKind::MultiSelect { answer, options } => {
                validate_indices(answer, options.len())?;
            }
            QuizKind::ToggleTranslate { answer, options } => {
                validate_indices(answer, options.len())?;
            }
            QuizKind::Picker {
                answer,
                min,
                max,
                step,
            } => {
                if min > max || *step <= 0 {
                    return Err(invalid(format!(
                        "picker range is malformed (min {}, max {}, step {})",
                        min, max, step
                    )));
                }
                if answer < min || answer > max {
                    return Err(invalid(format!(
                        "picker answer {} lies outside [{}, {}]",
                        answer, min, max
                    )));
                }
                if (i64::from(*answer) - i64::from(*min)) % i64::from(*step) != 0 {
                    return Err(invalid(format!(
                        "picker answer {} is not reachable from {} in steps of {}",
                        answer, min, step
                    )));
                }
            }
            QuizKind::TrueFalse { .. } => {}
        }
        Ok(())
    }
}

fn invalid(msg: String) -> QuizError {
    QuizError::Validation(msg)
}

fn validate_single(answer: &[usize]) -> QuizResult<()> {
    if answer.len() != 1 {
        return Err(invalid(format!(
            "expected exactly one answer index, got {:?}",
            answer
        )));
    }
    Ok(())
}

fn validate_indices(answer: &[usize], option_count: usize) -> QuizResult<()> {
    if answer.is_empty() {
        return Err(invalid("answer must name at least one option".into()));
    }
    let unique: BTreeSet<&usize> = answer.iter().collect();
    if unique.len() != answer.len() {
        return Err(invalid(format!("answer {:?} repeats an index", answer)));
    }
    if let Some(bad) = answer.iter().find(|&&i| i >= option_count) {
        return Err(invalid(format!(
            "answer index {} is out of range for {} options",
            bad, option_count
        )));
    }
    Ok(())
}

/// A single question of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    question: String,
    solved: bool,
    kind: QuizKind,
}

impl Quiz {
    pub fn new(question: impl Into<String>, kind: QuizKind, solved: bool) -> QuizResult<Self> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(invalid(format!(
                "{} quiz has an empty question",
                kind.quiz_type()
            )));
        }
        kind.validate()?;
        Ok(Quiz {
            question,
            solved,
            kind,
        })
    }

    /// Stable id derived from the question text.
    pub fn id(&self) -> u64 {
        question_id(&self.question)
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn kind(&self) -> &QuizKind {
        &self.kind
    }

    pub fn quiz_type(&self) -> QuizType {
        self.kind.quiz_type()
    }

    /// Whether an answer was submitted. Says nothing about correctness.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn set_solved(&mut self, solved: bool) {
        self.solved = solved;
    }

    /// Human readable version of the stored answer.
    pub fn string_answer(&self) -> QuizResult<String> {
        match &self.kind {
            QuizKind::AlphaPicker { answer } | QuizKind::FillBlank { answer, .. } => {
                Ok(answer.clone())
            }
            QuizKind::FillTwoBlanks { answer } => Ok(format_answers(answer)),
            QuizKind::FourQuarter { answer, options }
            | QuizKind::MultiSelect { answer, options }
            | QuizKind::SingleSelect { answer, options }
            | QuizKind::SingleSelectItem { answer, options } => {
                format_indexed(answer, options)
            }
            QuizKind::ToggleTranslate { answer, options } => {
                format_translated(answer, options)
            }
            QuizKind::Picker { answer, .. } => Ok(answer.to_string()),
            QuizKind::TrueFalse { answer } => Ok(answer.to_string()),
        }
    }

    /// Checks a candidate against the stored answer. Never mutates the quiz;
    /// a candidate of the wrong shape is simply incorrect.
    pub fn is_answer_correct(&self, candidate: &Answer) -> bool {
        match (&self.kind, candidate) {
            (QuizKind::AlphaPicker { answer }, Answer::Text(given))
            | (QuizKind::FillBlank { answer, .. }, Answer::Text(given)) => {
                equals_ignore_case(given, answer)
            }
            (QuizKind::FillTwoBlanks { answer }, Answer::TextList(given)) => {
                given.len() == answer.len()
                    && given
                        .iter()
                        .zip(answer)
                        .all(|(g, a)| equals_ignore_case(g, a))
            }
            (QuizKind::FourQuarter { answer, .. }, Answer::Index(given))
            | (QuizKind::SingleSelect { answer, .. }, Answer::Index(given))
            | (QuizKind::SingleSelectItem { answer, .. }, Answer::Index(given)) => {
                is_selection_correct(&BTreeSet::from([*given]), answer)
            }
            (QuizKind::FourQuarter { answer, .. }, Answer::Selection(checked))
            | (QuizKind::SingleSelect { answer, .. }, Answer::Selection(checked))
            | (QuizKind::SingleSelectItem { answer, .. }, Answer::Selection(checked))
            | (QuizKind::MultiSelect { answer, .. }, Answer::Selection(checked))
            | (QuizKind::ToggleTranslate { answer, .. }, Answer::Selection(checked)) => {
                is_selection_correct(checked, answer)
            }
            (QuizKind::Picker { answer, .. }, Answer::Number(given)) => answer == given,
            (QuizKind::TrueFalse { answer }, Answer::Boolean(given)) => answer == given,
            (kind, candidate) => {
                debug!(
                    "Answer {:?} does not fit a {} quiz, counting as incorrect",
                    candidate,
                    kind.quiz_type()
                );
                false
            }
        }
    }
}

impl fmt::Display for Quiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\"", self.quiz_type(), self.question)
    }
}

/// First eight bytes of SHA-256 over the question, big endian.
pub fn question_id(question: &str) -> u64 {
    let digest = Sha256::digest(question.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
