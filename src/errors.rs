// src/errors.rs

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl QuizError {
    pub fn error_code(&self) -> &'static str {
        match self {
            QuizError::Validation(_) => "VALIDATION_ERROR",
            QuizError::NotFound(_) => "NOT_FOUND",
            QuizError::Parse(_) => "PARSE_ERROR",
            QuizError::Database(_) => "DATABASE_ERROR",
            QuizError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<rusqlite::Error> for QuizError {
    fn from(err: rusqlite::Error) -> Self {
        QuizError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Parse(format!("JSON processing failed: {}", err))
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::Io(err.to_string())
    }
}

pub type QuizResult<T> = Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QuizError::Validation("x".into()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(QuizError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(QuizError::Parse("x".into()).error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_error_messages() {
        let err = QuizError::NotFound("category history".into());
        assert_eq!(err.to_string(), "Not found: category history");
    }

    #[test]
    fn test_json_error_becomes_parse_error() {
        let err: QuizError = serde_json::from_str::<Vec<i32>>("[1,")
            .unwrap_err()
            .into();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }
}
