// src/config.rs

use crate::constants::DB_FILE_NAME;
use crate::errors::QuizResult;
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Categories shipped with the binary.
pub const BUNDLED_CATEGORIES: &str = include_str!("data/categories.json");

#[derive(Clone, Debug)]
pub struct Config {
    pub db_path: PathBuf,
    /// Replaces the bundled categories when set.
    pub content_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("QUIZ_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DB_FILE_NAME)),
            content_path: env::var("QUIZ_CONTENT_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            log_level: env::var("QUIZ_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// The category definitions used for pre-fill and reset.
    pub fn load_content(&self) -> QuizResult<String> {
        match &self.content_path {
            Some(path) => {
                info!("Loading categories from {:?}", path);
                Ok(fs::read_to_string(path)?)
            }
            None => Ok(BUNDLED_CATEGORIES.to_string()),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            db_path: PathBuf::from(":memory:"),
            content_path: None,
            log_level: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();
        assert!(!config.db_path.as_os_str().is_empty());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn test_bundled_content_is_default() {
        let config = Config::test_config();
        assert_eq!(config.load_content().unwrap(), BUNDLED_CATEGORIES);
    }

    #[test]
    fn test_missing_content_file_is_io_error() {
        let config = Config {
            content_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Config::test_config()
        };
        assert_eq!(config.load_content().unwrap_err().error_code(), "IO_ERROR");
    }
}
