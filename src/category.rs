// src/category.rs

use crate::answer::Answer;
use crate::constants::{NO_SCORE, SCORE};
use crate::errors::{QuizError, QuizResult};
use crate::models::Theme;
use crate::quiz::Quiz;
use log::{debug, warn};

/// A themed bundle of quizzes with per-quiz scores.
///
/// `scores` is index-aligned with `quizzes`. The stored `solved` flag is
/// re-derived from the quizzes on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: String,
    name: String,
    theme: Theme,
    quizzes: Vec<Quiz>,
    scores: Vec<i32>,
    solved: bool,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        theme: Theme,
        quizzes: Vec<Quiz>,
        solved: bool,
    ) -> Self {
        let scores = vec![NO_SCORE; quizzes.len()];
        Category {
            id: id.into(),
            name: name.into(),
            theme,
            quizzes,
            scores,
            solved,
        }
    }

    pub fn with_scores(
        name: impl Into<String>,
        id: impl Into<String>,
        theme: Theme,
        quizzes: Vec<Quiz>,
        scores: Vec<i32>,
        solved: bool,
    ) -> QuizResult<Self> {
        let id = id.into();
        if quizzes.len() != scores.len() {
            return Err(QuizError::Validation(format!(
                "Category '{}' has {} quizzes but {} scores",
                id,
                quizzes.len(),
                scores.len()
            )));
        }
        if let Some(bad) = scores.iter().find(|&&s| s != SCORE && s != NO_SCORE) {
            return Err(QuizError::Validation(format!(
                "Category '{}' has score {}, only {} or {} are allowed",
                id, bad, SCORE, NO_SCORE
            )));
        }
        Ok(Category {
            id,
            name: name.into(),
            theme,
            quizzes,
            scores,
            solved,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn quiz(&self, position: usize) -> Option<&Quiz> {
        self.quizzes.get(position)
    }

    pub fn scores(&self) -> &[i32] {
        &self.scores
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Sum of all quiz scores within this category.
    pub fn score(&self) -> i32 {
        self.scores.iter().sum()
    }

    /// Position of the first quiz not yet answered, or `quizzes().len()` once
    /// every quiz is solved.
    pub fn first_unsolved_quiz_position(&self) -> usize {
        self.quizzes
            .iter()
            .position(|q| !q.is_solved())
            .unwrap_or(self.quizzes.len())
    }

    fn position_of(&self, which: &Quiz) -> Option<usize> {
        self.quizzes
            .iter()
            .position(|q| q.question() == which.question())
    }

    /// Records the score for `which`. A quiz that is not part of this
    /// category is ignored.
    pub fn set_score(&mut self, which: &Quiz, correctly_solved: bool) {
        let Some(index) = self.position_of(which) else {
            debug!(
                "Category {}: no quiz matches {}, score left untouched",
                self.id, which
            );
            return;
        };
        debug!("Setting score for {} with index {}", which, index);
        self.scores[index] = if correctly_solved { SCORE } else { NO_SCORE };
        self.refresh_solved();
    }

    /// Score of a single quiz, 0 if it cannot be found.
    pub fn score_of(&self, which: &Quiz) -> i32 {
        self.position_of(which)
            .and_then(|i| self.scores.get(i).copied())
            .unwrap_or(NO_SCORE)
    }

    pub fn is_solved_correctly(&self, which: &Quiz) -> bool {
        self.score_of(which) == SCORE
    }

    /// Marks the quiz at `position` solved and scores the candidate.
    /// A missing candidate counts as an incorrect answer. Each quiz takes a
    /// single submission until the category is reset.
    pub fn submit_answer(&mut self, position: usize, candidate: Option<&Answer>) -> QuizResult<bool> {
        let quiz = self.quizzes.get_mut(position).ok_or_else(|| {
            QuizError::NotFound(format!(
                "Quiz #{} in category '{}' ({} quizzes)",
                position,
                self.id,
                self.scores.len()
            ))
        })?;
        if quiz.is_solved() {
            return Err(QuizError::Validation(format!(
                "Quiz #{} in category '{}' was already answered",
                position, self.id
            )));
        }

        let correct = match candidate {
            Some(answer) => quiz.is_answer_correct(answer),
            None => {
                warn!("Empty answer submitted for {}, counting as incorrect", quiz);
                false
            }
        };
        quiz.set_solved(true);

        self.scores[position] = if correct { SCORE } else { NO_SCORE };
        self.refresh_solved();
        Ok(correct)
    }

    /// Re-derives the solved flag from the contained quizzes.
    pub fn refresh_solved(&mut self) {
        let derived = self.quizzes.iter().all(|q| q.is_solved());
        if derived != self.solved {
            debug!(
                "Category {}: solved {} -> {}",
                self.id, self.solved, derived
            );
            self.solved = derived;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizKind;

    fn true_false(question: &str, solved: bool) -> Quiz {
        Quiz::new(question, QuizKind::TrueFalse { answer: true }, solved).unwrap()
    }

    fn sample() -> Category {
        Category::with_scores(
            "Science",
            "science",
            Theme::Green,
            vec![
                true_false("Water boils at 100C at sea level", true),
                true_false("Light is faster than sound", true),
                true_false("The sun orbits the earth", false),
            ],
            vec![8, 0, 8],
            false,
        )
        .unwrap()
    }

    #[test]
    fn aggregates_score_and_progress() {
        let category = sample();
        assert_eq!(category.score(), 16);
        assert_eq!(category.first_unsolved_quiz_position(), 2);
        assert!(!category.is_solved());
    }

    #[test]
    fn rejects_mismatched_scores() {
        let err = Category::with_scores(
            "Science",
            "science",
            Theme::Green,
            vec![true_false("q", false)],
            vec![0, 0],
            false,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn rejects_partial_credit_scores() {
        for scores in [vec![5], vec![-8], vec![16]] {
            let err = Category::with_scores(
                "Science",
                "science",
                Theme::Green,
                vec![true_false("q", true)],
                scores,
                true,
            )
            .unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_ERROR");
        }
    }

    #[test]
    fn new_category_starts_with_zero_scores() {
        let category = Category::new(
            "Science",
            "science",
            Theme::Green,
            vec![true_false("a", false), true_false("b", false)],
            false,
        );
        assert_eq!(category.scores(), &[0, 0]);
        assert_eq!(category.score(), 0);
    }

    #[test]
    fn first_unsolved_is_len_when_all_solved() {
        let category = Category::new(
            "Science",
            "science",
            Theme::Green,
            vec![true_false("a", true), true_false("b", true)],
            true,
        );
        assert_eq!(category.first_unsolved_quiz_position(), 2);
    }

    #[test]
    fn set_score_ignores_unknown_quiz() {
        let mut category = sample();
        category.set_score(&true_false("Not in here", false), true);
        assert_eq!(category.scores(), &[8, 0, 8]);
    }

    #[test]
    fn set_score_finds_quiz_by_question() {
        let mut category = sample();
        let stale = true_false("Light is faster than sound", false);
        category.set_score(&stale, true);
        assert_eq!(category.scores(), &[8, 8, 8]);
        assert!(category.is_solved_correctly(&stale));

        category.set_score(&stale, false);
        assert_eq!(category.score_of(&stale), 0);
        assert!(!category.is_solved_correctly(&stale));
        assert_eq!(category.scores().len(), category.quizzes().len());
    }

    #[test]
    fn lookup_failure_is_not_solved_correctly() {
        let category = sample();
        assert!(!category.is_solved_correctly(&true_false("missing", true)));
        assert_eq!(category.score_of(&true_false("missing", true)), 0);
    }

    #[test]
    fn submission_marks_solved_even_when_wrong() {
        let mut category = sample();
        let correct = category
            .submit_answer(2, Some(&Answer::Boolean(false)))
            .unwrap();
        assert!(!correct);
        assert!(category.quizzes()[2].is_solved());
        assert_eq!(category.scores(), &[8, 0, 0]);
        assert!(category.is_solved());
        assert_eq!(category.first_unsolved_quiz_position(), 3);
    }

    #[test]
    fn missing_candidate_counts_as_incorrect() {
        let mut category = sample();
        assert!(!category.submit_answer(2, None).unwrap());
        assert_eq!(category.scores()[2], 0);
    }

    #[test]
    fn correct_submission_scores() {
        let mut category = Category::new(
            "Science",
            "science",
            Theme::Green,
            vec![true_false("a", false), true_false("b", false)],
            false,
        );
        assert!(category
            .submit_answer(1, Some(&Answer::Boolean(true)))
            .unwrap());
        assert_eq!(category.scores(), &[0, 8]);
        assert_eq!(category.score(), 8);
    }

    #[test]
    fn answered_quiz_cannot_be_resubmitted() {
        let mut category = sample();
        let err = category
            .submit_answer(1, Some(&Answer::Boolean(true)))
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(category.scores(), &[8, 0, 8]);

        assert!(!category
            .submit_answer(2, Some(&Answer::Boolean(false)))
            .unwrap());
        assert!(category
            .submit_answer(2, Some(&Answer::Boolean(true)))
            .is_err());
        assert_eq!(category.scores(), &[8, 0, 0]);
    }

    #[test]
    fn submission_out_of_range_is_not_found() {
        let mut category = sample();
        let err = category.submit_answer(7, None).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(category.scores().len(), category.quizzes().len());
    }
}
