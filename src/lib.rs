// src/lib.rs

pub mod answer;
pub mod category;
pub mod config;
pub mod constants;
pub mod content;
pub mod database;
pub mod errors;
pub mod models;
pub mod player;
pub mod progress;
pub mod quiz;
pub mod repository;

pub use answer::Answer;
pub use category::Category;
pub use errors::{QuizError, QuizResult};
pub use models::{AnswerShape, QuizType, Theme};
pub use progress::{ProgressStore, SubmissionOutcome};
pub use quiz::{Quiz, QuizKind};
