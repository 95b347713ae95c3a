//! Point calculation for finished attempts.
//!
//! Scoring is a pure function of the recorded answers: 20 points per correct
//! answer, one point per second left on each question's clock, a flat bonus
//! for a perfect run and a flat bonus per quiz kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{QuizAttemptSession, ScoreResult};

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT_ANSWER: u32 = 20;

/// Flat bonuses applied on top of the base and speed points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusPolicy {
    pub perfect_score_bonus: u32,
    pub kind_bonuses: BTreeMap<String, u32>,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        let kind_bonuses = [
            ("daily", 0),
            ("morning-meeting", 5),
            ("structured-products", 50),
            ("estate-planning", 40),
        ]
        .into_iter()
        .map(|(kind, bonus)| (kind.to_string(), bonus))
        .collect();

        Self {
            perfect_score_bonus: 25,
            kind_bonuses,
        }
    }
}

impl BonusPolicy {
    pub fn with_perfect_score_bonus(mut self, bonus: u32) -> Self {
        self.perfect_score_bonus = bonus;
        self
    }

    pub fn with_kind_bonus(mut self, quiz_type_key: impl Into<String>, bonus: u32) -> Self {
        self.kind_bonuses.insert(quiz_type_key.into(), bonus);
        self
    }

    /// Unknown kinds earn no flat bonus.
    pub fn kind_bonus(&self, quiz_type_key: &str) -> u32 {
        self.kind_bonuses.get(quiz_type_key).copied().unwrap_or(0)
    }
}

/// Points for a finished attempt.
///
/// Every time-remaining entry counts, correct or not; backfilled questions
/// contribute zero.
pub fn points(
    correctness_flags: &[bool],
    per_question_time_remaining: &[u32],
    total_questions: usize,
    quiz_type_key: &str,
    policy: &BonusPolicy,
) -> u32 {
    let correct = correctness_flags.iter().filter(|c| **c).count();

    let base = POINTS_PER_CORRECT_ANSWER * correct as u32;
    let speed: u32 = per_question_time_remaining.iter().sum();
    let perfect = if correct == total_questions {
        policy.perfect_score_bonus
    } else {
        0
    };

    base + speed + perfect + policy.kind_bonus(quiz_type_key)
}

/// Scores a session whose sequences cover every question.
pub fn score(session: &QuizAttemptSession, total_questions: usize, policy: &BonusPolicy) -> ScoreResult {
    ScoreResult {
        correct_count: session.correct_count(),
        total_questions,
        points_awarded: points(
            &session.correctness_flags,
            &session.per_question_time_remaining,
            total_questions,
            &session.quiz_type_key,
            policy,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_perfect_run() {
        let policy = BonusPolicy::default();
        assert_eq!(points(&[true, true], &[5, 3], 2, "daily", &policy), 73);
    }

    #[test]
    fn same_inputs_same_points() {
        let policy = BonusPolicy::default();
        let first = points(&[true, false, true], &[9, 0, 4], 3, "morning-meeting", &policy);
        let second = points(&[true, false, true], &[9, 0, 4], 3, "morning-meeting", &policy);
        assert_eq!(first, second);
        assert_eq!(first, 40 + 13 + 5);
    }

    #[test]
    fn one_miss_loses_perfect_bonus() {
        let policy = BonusPolicy::default();
        let points = points(&[true, true, true, false], &[1, 1, 1, 1], 4, "daily", &policy);
        assert_eq!(points, 60 + 4);
    }

    #[test]
    fn structured_products_kind_bonus() {
        let policy = BonusPolicy::default();
        assert_eq!(
            points(&[true, true, true], &[10, 8, 12], 3, "structured-products", &policy),
            165
        );
    }

    #[test]
    fn unknown_kind_gets_no_bonus() {
        let policy = BonusPolicy::default().with_kind_bonus("finance-1", 15);
        assert_eq!(policy.kind_bonus("planning-9"), 0);
        assert_eq!(points(&[false], &[0], 1, "finance-1", &policy), 15);
    }

    #[test]
    fn score_counts_backfilled_entries_as_incorrect() {
        let mut session = QuizAttemptSession::new("daily", 180, 0);
        session.record_answer("1b", true, 7);
        session.backfill_unanswered(3);

        let result = score(&session, 3, &BonusPolicy::default());
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.points_awarded, 27);
    }
}
