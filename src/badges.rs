//! Badge candidates and the default award rules.
//!
//! The engine only reports a [`BadgeCandidate`] when an attempt finishes.
//! Deciding which badges that earns is up to the caller; [`evaluate`] applies
//! the rules the quiz app ships with.

use serde::{Deserialize, Serialize};

use crate::model::QuizAttemptSession;

/// Answering-time ceiling for the Speed Demon badge.
pub const SPEED_DEMON_MAX_SECONDS: u32 = 30;

/// Share of correct answers (in percent) needed for Quiz Master.
pub const QUIZ_MASTER_MIN_PERCENT: usize = 80;

/// The data badge rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeCandidate {
    pub quiz_type_key: String,
    pub correct_count: usize,
    pub total_questions: usize,
    pub all_correct: bool,
    /// The quiz-level timer ran out before every question was answered.
    pub expired: bool,
    pub time_remaining: Vec<u32>,
    pub per_question_time_limit_seconds: u32,
}

impl BadgeCandidate {
    pub fn from_session(
        session: &QuizAttemptSession,
        total_questions: usize,
        per_question_time_limit_seconds: u32,
        expired: bool,
    ) -> Self {
        let correct_count = session.correct_count();
        Self {
            quiz_type_key: session.quiz_type_key.clone(),
            correct_count,
            total_questions,
            all_correct: total_questions > 0 && correct_count == total_questions,
            expired,
            time_remaining: session.per_question_time_remaining.clone(),
            per_question_time_limit_seconds,
        }
    }

    /// Seconds actually spent answering, summed over all questions.
    pub fn answering_seconds(&self) -> u32 {
        self.time_remaining
            .iter()
            .map(|left| self.per_question_time_limit_seconds.saturating_sub(*left))
            .sum()
    }
}

/// Awards a finished attempt can earn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    QuizMaster,
    PerfectScore,
    SpeedDemon,
}

impl Badge {
    pub fn name(&self) -> &'static str {
        match self {
            Badge::QuizMaster => "Quiz Master",
            Badge::PerfectScore => "Perfect Score",
            Badge::SpeedDemon => "Speed Demon",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::QuizMaster => "Score 80% or higher on a quiz",
            Badge::PerfectScore => "Answer every question correctly",
            Badge::SpeedDemon => "Answer all questions correctly in under 30 seconds",
        }
    }
}

/// Applies the badge rules. Badges come back in display order.
pub fn evaluate(candidate: &BadgeCandidate) -> Vec<Badge> {
    let mut badges = Vec::new();
    if candidate.total_questions == 0 {
        return badges;
    }

    if candidate.correct_count * 100 >= candidate.total_questions * QUIZ_MASTER_MIN_PERCENT {
        badges.push(Badge::QuizMaster);
    }
    if candidate.all_correct {
        badges.push(Badge::PerfectScore);
        if candidate.answering_seconds() < SPEED_DEMON_MAX_SECONDS {
            badges.push(Badge::SpeedDemon);
        }
    }
    badges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(flags: &[bool], times: &[u32]) -> BadgeCandidate {
        let mut session = QuizAttemptSession::new("daily", 180, 0);
        for (correct, left) in flags.iter().zip(times) {
            session.record_answer("x", *correct, *left);
        }
        BadgeCandidate::from_session(&session, flags.len(), 15, false)
    }

    #[test]
    fn four_of_five_is_quiz_master_only() {
        let c = candidate(&[true, true, true, true, false], &[10; 5]);
        assert_eq!(evaluate(&c), vec![Badge::QuizMaster]);
    }

    #[test]
    fn fast_perfect_run_earns_everything() {
        let c = candidate(&[true, true, true], &[10, 8, 12]);
        assert_eq!(c.answering_seconds(), 15);
        assert_eq!(
            evaluate(&c),
            vec![Badge::QuizMaster, Badge::PerfectScore, Badge::SpeedDemon]
        );
    }

    #[test]
    fn slow_perfect_run_is_not_speed_demon() {
        let c = candidate(&[true, true, true], &[1, 1, 1]);
        assert!(!evaluate(&c).contains(&Badge::SpeedDemon));
    }

    #[test]
    fn nothing_for_poor_run() {
        let c = candidate(&[false, true, false], &[0, 3, 0]);
        assert!(evaluate(&c).is_empty());
        assert!(!c.all_correct);
    }
}
