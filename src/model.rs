//! Core data types: questions, quiz configuration and the persisted attempt.

use serde::{Deserialize, Serialize};

use crate::clock::elapsed_whole_seconds;
use crate::scoring::BonusPolicy;

/// Option id recorded for questions that were never answered before the quiz ran out of time.
pub const UNANSWERED_OPTION_ID: &str = "<unanswered>";

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// A multiple-choice question as supplied by a [`QuestionProvider`](crate::QuestionProvider).
///
/// Questions are immutable for the duration of an attempt. The first option is
/// the designated default that gets submitted when the question timer runs out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<QuizOption>,
    pub explanation: String,
    pub category: String,
}

impl Question {
    /// The option submitted on the player's behalf when the countdown expires.
    pub fn default_option(&self) -> Option<&QuizOption> {
        self.options.first()
    }

    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Timing and bonus settings for one quiz kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizKindConfig {
    pub total_duration_seconds: u32,
    pub per_question_time_limit_seconds: u32,
    pub bonus_policy: BonusPolicy,
}

impl Default for QuizKindConfig {
    fn default() -> Self {
        Self {
            total_duration_seconds: 180,
            per_question_time_limit_seconds: 15,
            bonus_policy: BonusPolicy::default(),
        }
    }
}

/// Everything the engine needs to run one quiz kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    pub quiz_type_key: String,
    pub title: String,
    pub questions: Vec<Question>,
    pub config: QuizKindConfig,
}

impl QuizDefinition {
    /// Number of questions in the quiz.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

/// The persisted unit of work for one quiz attempt.
///
/// The three answer sequences run in parallel and always have exactly
/// `current_question_index` entries while the session is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttemptSession {
    pub quiz_type_key: String,
    pub started_at_epoch_millis: i64,
    pub total_duration_seconds: u32,
    pub answered_option_ids: Vec<String>,
    pub correctness_flags: Vec<bool>,
    pub per_question_time_remaining: Vec<u32>,
    pub current_question_index: usize,
}

impl QuizAttemptSession {
    pub fn new(
        quiz_type_key: impl Into<String>,
        total_duration_seconds: u32,
        started_at_epoch_millis: i64,
    ) -> Self {
        Self {
            quiz_type_key: quiz_type_key.into(),
            started_at_epoch_millis,
            total_duration_seconds,
            answered_option_ids: Vec::new(),
            correctness_flags: Vec::new(),
            per_question_time_remaining: Vec::new(),
            current_question_index: 0,
        }
    }

    /// Checks the structural invariants against the quiz's question count.
    pub fn is_consistent(&self, total_questions: usize) -> bool {
        let cursor = self.current_question_index;
        self.answered_option_ids.len() == cursor
            && self.correctness_flags.len() == cursor
            && self.per_question_time_remaining.len() == cursor
            && cursor <= total_questions
    }

    /// Seconds left on the whole-quiz budget at `now_millis`.
    ///
    /// A start timestamp in the future counts as zero elapsed time.
    pub fn remaining_seconds(&self, now_millis: i64) -> u32 {
        let elapsed = elapsed_whole_seconds(self.started_at_epoch_millis, now_millis);
        u64::from(self.total_duration_seconds).saturating_sub(elapsed) as u32
    }

    /// Appends one answer and advances the cursor.
    pub fn record_answer(&mut self, option_id: impl Into<String>, is_correct: bool, time_remaining: u32) {
        self.answered_option_ids.push(option_id.into());
        self.correctness_flags.push(is_correct);
        self.per_question_time_remaining.push(time_remaining);
        self.current_question_index += 1;
    }

    /// Marks every question from the cursor onwards as unanswered, incorrect, zero time.
    ///
    /// Returns how many entries were added.
    pub fn backfill_unanswered(&mut self, total_questions: usize) -> usize {
        let missing = total_questions.saturating_sub(self.current_question_index);
        for _ in 0..missing {
            self.record_answer(UNANSWERED_OPTION_ID, false, 0);
        }
        missing
    }

    pub fn correct_count(&self) -> usize {
        self.correctness_flags.iter().filter(|c| **c).count()
    }
}

/// Outcome of a finished attempt. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total_questions: usize,
    pub points_awarded: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_answer_keeps_sequences_parallel() {
        let mut session = QuizAttemptSession::new("daily", 180, 0);
        session.record_answer("1b", true, 12);
        session.record_answer("2a", false, 3);

        assert_eq!(session.current_question_index, 2);
        assert!(session.is_consistent(5));
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn inconsistent_when_cursor_past_end() {
        let mut session = QuizAttemptSession::new("daily", 180, 0);
        session.record_answer("1b", true, 12);
        assert!(!session.is_consistent(0));

        session.correctness_flags.pop();
        assert!(!session.is_consistent(5));
    }

    #[test]
    fn backfill_fills_to_total() {
        let mut session = QuizAttemptSession::new("daily", 180, 0);
        session.record_answer("1b", true, 12);

        assert_eq!(session.backfill_unanswered(4), 3);
        assert_eq!(session.current_question_index, 4);
        assert!(session.answered_option_ids[1..]
            .iter()
            .all(|id| id == UNANSWERED_OPTION_ID));
        assert_eq!(session.per_question_time_remaining, vec![12, 0, 0, 0]);
        assert_eq!(session.backfill_unanswered(4), 0);
    }

    #[test]
    fn remaining_seconds_floors_elapsed_and_clamps() {
        let session = QuizAttemptSession::new("daily", 180, 10_000);
        assert_eq!(session.remaining_seconds(10_999), 180);
        assert_eq!(session.remaining_seconds(11_000), 179);
        assert_eq!(session.remaining_seconds(5_000), 180);
        assert_eq!(session.remaining_seconds(10_000 + 500_000), 0);
    }
}
