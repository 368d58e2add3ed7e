// src/models.rs

use crate::errors::QuizError;
use crate::progress::ProgressStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

// --- App State ---

pub struct AppState {
    pub store: Mutex<ProgressStore>,
}

impl AppState {
    pub fn new(store: ProgressStore) -> Self {
        AppState {
            store: Mutex::new(store),
        }
    }
}

// --- Category Theme ---

/// Display theme of a category. Only the name matters to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Topeka,
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Topeka,
        Theme::Blue,
        Theme::Green,
        Theme::Purple,
        Theme::Red,
        Theme::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Topeka => "topeka",
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Purple => "purple",
            Theme::Red => "red",
            Theme::Yellow => "yellow",
        }
    }
}

impl FromStr for Theme {
    type Err = QuizError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| QuizError::Validation(format!("Theme '{}' is not supported", s)))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Quiz Type Registry ---

/// Shape of the answer a quiz variant stores and accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    Text,
    TextList,
    Index,
    IndexSet,
    Number,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizType {
    AlphaPicker,
    FillBlank,
    FillTwoBlanks,
    FourQuarter,
    MultiSelect,
    Picker,
    SingleSelect,
    SingleSelectItem,
    ToggleTranslate,
    TrueFalse,
}

impl QuizType {
    pub const ALL: [QuizType; 10] = [
        QuizType::AlphaPicker,
        QuizType::FillBlank,
        QuizType::FillTwoBlanks,
        QuizType::FourQuarter,
        QuizType::MultiSelect,
        QuizType::Picker,
        QuizType::SingleSelect,
        QuizType::SingleSelectItem,
        QuizType::ToggleTranslate,
        QuizType::TrueFalse,
    ];

    /// Discriminator used in bundled content and in the `type` column.
    pub fn json_name(&self) -> &'static str {
        match self {
            QuizType::AlphaPicker => "alpha-picker",
            QuizType::FillBlank => "fill-blank",
            QuizType::FillTwoBlanks => "fill-two-blanks",
            QuizType::FourQuarter => "four-quarter",
            QuizType::MultiSelect => "multi-select",
            QuizType::Picker => "picker",
            QuizType::SingleSelect => "single-select",
            QuizType::SingleSelectItem => "single-select-item",
            QuizType::ToggleTranslate => "toggle-translate",
            QuizType::TrueFalse => "true-false",
        }
    }

    pub fn answer_shape(&self) -> AnswerShape {
        match self {
            QuizType::AlphaPicker | QuizType::FillBlank => AnswerShape::Text,
            QuizType::FillTwoBlanks => AnswerShape::TextList,
            QuizType::FourQuarter | QuizType::SingleSelect | QuizType::SingleSelectItem => {
                AnswerShape::Index
            }
            QuizType::MultiSelect | QuizType::ToggleTranslate => AnswerShape::IndexSet,
            QuizType::Picker => AnswerShape::Number,
            QuizType::TrueFalse => AnswerShape::Boolean,
        }
    }
}

impl FromStr for QuizType {
    type Err = QuizError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizType::ALL
            .into_iter()
            .find(|t| t.json_name() == s)
            .ok_or_else(|| QuizError::Validation(format!("Quiz type '{}' is not supported", s)))
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

// --- Bundled Content Records ---

// Used for seeding
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonCategory {
    pub id: String,
    pub name: String,
    pub theme: String,
    #[serde(default)]
    pub scores: Option<Vec<i32>>,
    /// Literal "true"/"false" text.
    pub solved: String,
    pub quizzes: Vec<JsonQuiz>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonQuiz {
    #[serde(rename = "type")]
    pub quiz_type: String,
    pub question: String,
    pub answer: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

// --- Durable Row Records ---

/// One row of the `category` table. `solved` uses the "1"/"0" flag encoding,
/// `scores` is a JSON array of ints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub theme: String,
    pub solved: String,
    pub scores: Option<String>,
}

/// One row of the `quiz` table. Every column is text; empty optionals are NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizRow {
    pub id: Option<i64>,
    pub category_id: String,
    pub quiz_type: String,
    pub question: String,
    pub answer: String,
    pub options: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub step: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub solved: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_type_round_trips_through_json_name() {
        for quiz_type in QuizType::ALL {
            let parsed: QuizType = quiz_type.json_name().parse().expect("known tag");
            assert_eq!(parsed, quiz_type);
        }
    }

    #[test]
    fn quiz_type_rejects_unknown_tag() {
        let err = "essay".parse::<QuizType>().unwrap_err();
        assert_eq!(
            err,
            QuizError::Validation("Quiz type 'essay' is not supported".into())
        );
    }

    #[test]
    fn select_variants_share_index_shape() {
        assert_eq!(QuizType::SingleSelect.answer_shape(), AnswerShape::Index);
        assert_eq!(QuizType::SingleSelectItem.answer_shape(), AnswerShape::Index);
        assert_eq!(QuizType::MultiSelect.answer_shape(), AnswerShape::IndexSet);
    }

    #[test]
    fn theme_parses_lowercase_names_only() {
        assert_eq!("purple".parse::<Theme>().unwrap(), Theme::Purple);
        assert!("Purple".parse::<Theme>().is_err());
    }

    #[test]
    fn json_quiz_reads_type_field() {
        let quiz: JsonQuiz = serde_json::from_str(
            r#"{"type":"picker","question":"q","answer":3,"min":0,"max":5,"step":1}"#,
        )
        .unwrap();
        assert_eq!(quiz.quiz_type, "picker");
        assert_eq!(quiz.answer, serde_json::json!(3));
        assert!(quiz.start.is_none());
    }
}
