//! Countdown timers driven by explicit timestamps.
//!
//! Neither timer owns a thread or a task. The engine polls them with the
//! current time from its [`Clock`](crate::Clock) and reacts to the signals they
//! return, which keeps every transition on the engine's single entry point.

pub mod question;
pub mod quiz;

pub use question::{QuestionSignal, QuestionTimer};
pub use quiz::{QuizSignal, QuizTimer};
