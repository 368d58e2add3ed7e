// src/progress.rs

use crate::answer::Answer;
use crate::category::Category;
use crate::content;
use crate::database;
use crate::errors::{QuizError, QuizResult};
use crate::repository;
use log::{debug, info, warn};
use rusqlite::Connection;

/// What the player learns after submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub correct: bool,
    pub category_solved: bool,
    pub next_position: usize,
    pub category_score: i32,
}

/// Owns the durable store and the in-memory category snapshot.
///
/// The snapshot is filled lazily and only dropped by an explicit refresh or
/// a reset.
pub struct ProgressStore {
    conn: Connection,
    bundle: String,
    categories: Option<Vec<Category>>,
}

impl ProgressStore {
    /// Creates the schema and pre-fills it from `bundle` on first run.
    pub fn open(mut conn: Connection, bundle: impl Into<String>) -> QuizResult<Self> {
        let bundle = bundle.into();
        database::init_db(&mut conn, &bundle)?;
        Ok(ProgressStore {
            conn,
            bundle,
            categories: None,
        })
    }

    // --- Public Interface ---

    pub fn get_categories(&mut self, refresh: bool) -> QuizResult<&[Category]> {
        if refresh || self.categories.is_none() {
            let loaded = self.load_categories()?;
            debug!("Loaded {} categories from the store", loaded.len());
            self.categories = Some(loaded);
        }
        Ok(self.categories.as_deref().unwrap_or_default())
    }

    /// Reads one category and its quizzes straight from the store.
    pub fn get_category(&self, category_id: &str) -> QuizResult<Category> {
        let row = repository::find_category_row(&self.conn, category_id)?
            .ok_or_else(|| QuizError::NotFound(format!("Category '{}'", category_id)))?;
        let quiz_rows = repository::get_quiz_rows(&self.conn, &row.id)?;
        content::category_from_rows(&row, &quiz_rows)
    }

    /// Persists the category's solved flag and scores plus each quiz's solved
    /// flag, then swaps the cached copy in place.
    pub fn update_category(&mut self, category: &Category) -> QuizResult<()> {
        let (category_row, quiz_rows) = content::category_to_rows(category)?;

        let tx = self.conn.transaction()?;
        let updated = repository::update_category_progress(&tx, &category_row)?;
        if updated == 0 {
            warn!("No stored category with id '{}' to update", category.id());
        }
        for quiz_row in &quiz_rows {
            let solved = quiz_row.solved.as_deref().unwrap_or_default();
            repository::update_quiz_solved(&tx, &quiz_row.question, solved)?;
        }
        tx.commit()?;

        if let Some(cached) = self
            .categories
            .as_mut()
            .and_then(|list| list.iter_mut().find(|c| c.id() == category.id()))
        {
            *cached = category.clone();
        }

        info!(
            "Updated category {} (score {}, solved {})",
            category.id(),
            category.score(),
            category.is_solved()
        );
        Ok(())
    }

    /// Restores the bundled content and drops the snapshot.
    pub fn reset(&mut self) -> QuizResult<()> {
        database::reset(&mut self.conn, &self.bundle)?;
        self.categories = None;
        Ok(())
    }

    /// Total score over all categories.
    pub fn get_score(&mut self) -> QuizResult<i32> {
        Ok(self.get_categories(false)?.iter().map(Category::score).sum())
    }

    /// Answers the quiz at `position` of a category and persists the result.
    pub fn submit_answer(
        &mut self,
        category_id: &str,
        position: usize,
        candidate: Option<Answer>,
    ) -> QuizResult<SubmissionOutcome> {
        let mut category = self.cached_or_stored(category_id)?;
        let correct = category.submit_answer(position, candidate.as_ref())?;
        self.update_category(&category)?;

        let outcome = SubmissionOutcome {
            correct,
            category_solved: category.is_solved(),
            next_position: category.first_unsolved_quiz_position(),
            category_score: category.score(),
        };
        info!(
            "Category {} quiz #{}: correct {}, solved {}",
            category_id, position, outcome.correct, outcome.category_solved
        );
        Ok(outcome)
    }

    // --- Internal ---

    fn cached_or_stored(&self, category_id: &str) -> QuizResult<Category> {
        let cached = self
            .categories
            .as_ref()
            .and_then(|list| list.iter().find(|c| c.id() == category_id));
        match cached {
            Some(category) => Ok(category.clone()),
            None => self.get_category(category_id),
        }
    }

    fn load_categories(&self) -> QuizResult<Vec<Category>> {
        repository::get_category_rows(&self.conn)?
            .iter()
            .map(|row| {
                let quiz_rows = repository::get_quiz_rows(&self.conn, &row.id)?;
                content::category_from_rows(row, &quiz_rows)
            })
            .collect()
    }
}
