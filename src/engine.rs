//! The timed session engine.
//!
//! [`TimedSessionEngine`] owns one quiz kind's attempt from start to result.
//! It composes the two countdowns with a [`SessionStore`] so an attempt can be
//! resumed after a reload and is auto-submitted when time runs out.
//!
//! The engine never waits on its own. All mutations go through `&mut self`
//! methods: [`start_quiz`](TimedSessionEngine::start_quiz),
//! [`resume`](TimedSessionEngine::resume),
//! [`submit_answer`](TimedSessionEngine::submit_answer),
//! [`tick`](TimedSessionEngine::tick), [`abandon`](TimedSessionEngine::abandon)
//! and [`dispose`](TimedSessionEngine::dispose). Whichever of an answer and a
//! same-instant expiry reaches the engine first wins; the other is rejected or
//! finds nothing left to do. Output is collected as [`EngineEvent`]s and
//! handed out by [`drain_events`](TimedSessionEngine::drain_events).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quiz_session_engine::{
//!     MemoryStore, QuestionBank, SessionRegistry, StartOutcome, TimedSessionEngine,
//! };
//!
//! # async fn example() -> quiz_session_engine::Result<()> {
//! let mut engine = TimedSessionEngine::new(
//!     "daily",
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(QuestionBank::sample()),
//!     SessionRegistry::new(),
//! );
//!
//! if let StartOutcome::Finalized(result) = engine.start_quiz().await? {
//!     println!("time ran out while you were away: {} points", result.points_awarded);
//! }
//! engine.submit_answer(0, "1b").await?;
//! for event in engine.drain_events() {
//!     println!("{event:?}");
//! }
//! engine.dispose();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::badges::BadgeCandidate;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::model::{Question, QuizAttemptSession, QuizDefinition, ScoreResult};
use crate::provider::QuestionProvider;
use crate::registry::{AttemptToken, SessionRegistry};
use crate::scoring;
use crate::store::SessionStore;
use crate::timer::quiz::checkpoint_bucket;
use crate::timer::{QuestionSignal, QuestionTimer, QuizSignal, QuizTimer};

/// Tunables that are not part of a quiz kind's own configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Pause between a recorded answer and arming the next question.
    pub explanation_delay: Duration,
    /// The attempt is re-saved whenever the quiz countdown crosses a multiple of this.
    pub checkpoint_every_seconds: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            explanation_delay: Duration::from_secs(3),
            checkpoint_every_seconds: 15,
        }
    }
}

impl EngineOptions {
    /// Sets the pause after each answer. Zero arms the next question immediately.
    pub fn with_explanation_delay(mut self, delay: Duration) -> Self {
        self.explanation_delay = delay;
        self
    }

    /// Sets the checkpoint window. Zero saves on every change of the quiz countdown.
    pub fn with_checkpoint_every(mut self, seconds: u32) -> Self {
        self.checkpoint_every_seconds = seconds;
        self
    }
}

/// Lifecycle of the engine's current attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No attempt loaded. Also the state after `abandon`, `dispose` or losing ownership.
    NotStarted,
    /// An attempt is running and accepting answers.
    InProgress,
    /// Scoring and clearing the stored session. Only observable if clearing failed;
    /// the next [`tick`](TimedSessionEngine::tick) retries.
    Finalizing,
    /// The attempt was scored and removed from the store.
    Completed(ScoreResult),
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    QuestionArmed {
        index: usize,
        question: Question,
        seconds_remaining: u32,
    },
    QuestionTick {
        index: usize,
        seconds_remaining: u32,
    },
    QuizTick {
        seconds_remaining: u32,
    },
    AnswerRecorded {
        index: usize,
        option_id: String,
        is_correct: bool,
        time_remaining: u32,
        /// Submitted by the question timer rather than the player.
        timed_out: bool,
    },
    QuizResumed {
        restored_index: usize,
    },
    QuizFinalized {
        result: ScoreResult,
        badge: BadgeCandidate,
    },
}

/// What [`TimedSessionEngine::start_quiz`] found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Fresh,
    Resumed { restored_index: usize },
    /// A stored attempt had already run out of time and was scored instead.
    Finalized(ScoreResult),
}

/// What [`TimedSessionEngine::resume`] found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    NothingStored,
    Resumed { restored_index: usize },
    Finalized(ScoreResult),
}

/// The result of an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_index: usize,
    pub is_correct: bool,
    pub time_remaining: u32,
    /// Set when this answer completed the quiz.
    pub finished: Option<ScoreResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Answering,
    ShowingExplanation { advance_at_millis: i64 },
}

struct Attempt {
    definition: QuizDefinition,
    session: QuizAttemptSession,
    quiz_timer: QuizTimer,
    phase: Phase,
    token: AttemptToken,
    checkpoint_bucket: u32,
    ran_out_of_time: bool,
}

/// Runs one quiz kind's attempt against a store, a question provider and a clock.
///
/// See the [module docs](self) for the operation contract.
pub struct TimedSessionEngine {
    quiz_type_key: String,
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn QuestionProvider>,
    registry: SessionRegistry,
    clock: Arc<dyn Clock>,
    options: EngineOptions,
    state: EngineState,
    attempt: Option<Attempt>,
    question_timer: QuestionTimer,
    events: Vec<EngineEvent>,
}

impl TimedSessionEngine {
    /// Creates an idle engine for `quiz_type_key` on the system clock.
    ///
    /// Engines that share a store must share `registry` so a newer instance
    /// can displace an older one.
    pub fn new(
        quiz_type_key: impl Into<String>,
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn QuestionProvider>,
        registry: SessionRegistry,
    ) -> Self {
        Self {
            quiz_type_key: quiz_type_key.into(),
            store,
            provider,
            registry,
            clock: Arc::new(SystemClock),
            options: EngineOptions::default(),
            state: EngineState::NotStarted,
            attempt: None,
            question_timer: QuestionTimer::new(),
            events: Vec::new(),
        }
    }

    /// Replaces the clock, typically with a [`ManualClock`](crate::ManualClock) in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the default [`EngineOptions`].
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// The quiz kind this engine runs.
    pub fn quiz_type_key(&self) -> &str {
        &self.quiz_type_key
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The options in effect.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The in-memory copy of the running attempt.
    pub fn session(&self) -> Option<&QuizAttemptSession> {
        self.attempt.as_ref().map(|a| &a.session)
    }

    /// The question currently counting down, if any.
    pub fn current_question(&self) -> Option<&Question> {
        let index = self.question_timer.question_index()?;
        self.attempt.as_ref()?.definition.questions.get(index)
    }

    /// Seconds left on the current question, `None` when no question is armed.
    pub fn question_seconds_remaining(&self) -> Option<u32> {
        self.question_timer.remaining(self.clock.now_millis())
    }

    /// Seconds left on the whole attempt, `None` when no attempt is loaded.
    pub fn quiz_seconds_remaining(&self) -> Option<u32> {
        let now = self.clock.now_millis();
        self.attempt.as_ref().map(|a| a.quiz_timer.remaining(now))
    }

    /// Whether the engine is in the pause between an answer and the next question.
    pub fn is_showing_explanation(&self) -> bool {
        matches!(
            self.attempt.as_ref().map(|a| a.phase),
            Some(Phase::ShowingExplanation { .. })
        )
    }

    /// Takes every event produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Starts an attempt, picking up a stored one if there is one.
    ///
    /// A stored attempt with time left is resumed; one whose time is up is
    /// scored straight away. Missing or undecodable storage starts fresh.
    pub async fn start_quiz(&mut self) -> Result<StartOutcome> {
        self.ensure_idle()?;
        let definition = self.load_definition()?;

        match self.restore(definition.clone()).await? {
            ResumeOutcome::Resumed { restored_index } => {
                return Ok(StartOutcome::Resumed { restored_index })
            }
            ResumeOutcome::Finalized(result) => return Ok(StartOutcome::Finalized(result)),
            ResumeOutcome::NothingStored => {}
        }

        let now = self.clock.now_millis();
        let session = QuizAttemptSession::new(
            self.quiz_type_key.clone(),
            definition.config.total_duration_seconds,
            now,
        );

        let token = self.registry.claim(&self.quiz_type_key);
        if let Err(e) = self.store.save(&self.quiz_type_key, &session).await {
            self.registry.release(&self.quiz_type_key, token);
            return Err(e);
        }

        tracing::info!(
            quiz_type_key = %self.quiz_type_key,
            questions = definition.total_questions(),
            total_duration_seconds = definition.config.total_duration_seconds,
            "quiz started"
        );

        self.begin(definition, session, token, now);
        self.arm_current_question(now);
        Ok(StartOutcome::Fresh)
    }

    /// The reload path: continue a stored attempt without creating a new one.
    pub async fn resume(&mut self) -> Result<ResumeOutcome> {
        self.ensure_idle()?;
        let definition = self.load_definition()?;
        self.restore(definition).await
    }

    /// Records the player's choice for the question at `question_index`.
    ///
    /// Rejected without touching any state when no quiz is running, the index
    /// is not the current question, the question is not armed yet (the
    /// explanation pause), or the option does not belong to the question.
    ///
    /// Time is checked before the answer is looked at. If the quiz budget is
    /// spent the attempt is finalized; if only the question ran out, its
    /// default option is recorded as a timeout. Either way the late answer is
    /// rejected with [`Error::InvalidOperation`].
    pub async fn submit_answer(
        &mut self,
        question_index: usize,
        option_id: &str,
    ) -> Result<AnswerOutcome> {
        if self.state != EngineState::InProgress {
            return Err(Error::InvalidOperation(format!(
                "no quiz in progress for '{}'",
                self.quiz_type_key
            )));
        }
        self.check_owner()?;

        let now = self.clock.now_millis();
        if self
            .attempt
            .as_ref()
            .is_some_and(|a| a.quiz_timer.remaining(now) == 0)
        {
            tracing::info!(quiz_type_key = %self.quiz_type_key, "late answer, quiz time is up");
            self.finalize(now).await?;
            return Err(Error::InvalidOperation(format!(
                "answer for question {question_index} rejected, quiz time is up"
            )));
        }

        if self.is_showing_explanation() {
            return Err(Error::InvalidOperation(format!(
                "answer for question {question_index} rejected, next question is not armed yet"
            )));
        }

        if let Some(QuestionSignal::Expired {
            question_index: expired_index,
            option_id: default_option,
        }) = self.question_timer.expiry(now)
        {
            self.record(expired_index, &default_option, 0, true, now)
                .await?;
            return Err(Error::InvalidOperation(format!(
                "answer for question {question_index} rejected, question {expired_index} timed out"
            )));
        }

        if self.question_timer.question_index() != Some(question_index) {
            let cursor = self.session().map(|s| s.current_question_index).unwrap_or(0);
            return Err(Error::InvalidOperation(format!(
                "answer for question {question_index} rejected, current question is {cursor}"
            )));
        }

        let time_remaining = self.question_timer.remaining(now).unwrap_or(0);
        self.record(question_index, option_id, time_remaining, false, now)
            .await
    }

    /// Advances both countdowns to the clock's current time.
    ///
    /// Call this about once a second. Missed calls are harmless: remaining
    /// time is always recomputed from timestamps.
    pub async fn tick(&mut self) -> Result<()> {
        match self.state {
            EngineState::InProgress => {}
            EngineState::Finalizing => {
                let now = self.clock.now_millis();
                self.finalize(now).await?;
                return Ok(());
            }
            EngineState::NotStarted | EngineState::Completed(_) => return Ok(()),
        }
        self.check_owner()?;

        let now = self.clock.now_millis();
        let (signal, phase) = match self.attempt.as_mut() {
            Some(attempt) => (attempt.quiz_timer.poll(now), attempt.phase),
            None => return Ok(()),
        };

        match signal {
            Some(QuizSignal::Expired) => {
                tracing::info!(quiz_type_key = %self.quiz_type_key, "quiz time is up");
                self.finalize(now).await?;
                return Ok(());
            }
            Some(QuizSignal::Tick { seconds_remaining }) => {
                self.events.push(EngineEvent::QuizTick { seconds_remaining });
                if let Some((bucket, session)) = self.checkpoint_due(seconds_remaining) {
                    self.store.save(&self.quiz_type_key, &session).await?;
                    if let Some(attempt) = self.attempt.as_mut() {
                        attempt.checkpoint_bucket = bucket;
                    }
                    tracing::debug!(
                        quiz_type_key = %self.quiz_type_key,
                        seconds_remaining,
                        "quiz session checkpointed"
                    );
                }
            }
            None => {}
        }

        match phase {
            Phase::ShowingExplanation { advance_at_millis } => {
                if now >= advance_at_millis {
                    self.arm_current_question(now);
                }
            }
            Phase::Answering => match self.question_timer.poll(now) {
                Some(QuestionSignal::Tick {
                    question_index,
                    seconds_remaining,
                }) => self.events.push(EngineEvent::QuestionTick {
                    index: question_index,
                    seconds_remaining,
                }),
                Some(QuestionSignal::Expired {
                    question_index,
                    option_id,
                }) => {
                    tracing::debug!(
                        quiz_type_key = %self.quiz_type_key,
                        question_index,
                        "question timed out, submitting default option"
                    );
                    self.record(question_index, &option_id, 0, true, now).await?;
                }
                None => {}
            },
        }

        Ok(())
    }

    /// Throws away the stored attempt for this kind and returns to `NotStarted`.
    pub async fn abandon(&mut self) -> Result<()> {
        if self.attempt.is_some() {
            self.check_owner()?;
        }

        self.store.clear(&self.quiz_type_key).await?;
        self.question_timer.stop();
        if let Some(attempt) = self.attempt.take() {
            self.registry.release(&self.quiz_type_key, attempt.token);
        }
        self.state = EngineState::NotStarted;

        tracing::info!(quiz_type_key = %self.quiz_type_key, "quiz abandoned");
        Ok(())
    }

    /// Stops the in-memory timers and lets go of the attempt.
    ///
    /// The stored session is left alone, so quiz time keeps running against
    /// its start timestamp and a later [`resume`](Self::resume) picks it up.
    /// Callers must invoke this when the quiz leaves the screen.
    pub fn dispose(&mut self) {
        self.question_timer.stop();
        if let Some(attempt) = self.attempt.take() {
            self.registry.release(&self.quiz_type_key, attempt.token);
            tracing::debug!(
                quiz_type_key = %self.quiz_type_key,
                question_index = attempt.session.current_question_index,
                "engine disposed, attempt left in store"
            );
        }
        if matches!(self.state, EngineState::InProgress | EngineState::Finalizing) {
            self.state = EngineState::NotStarted;
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.state {
            EngineState::InProgress | EngineState::Finalizing => Err(Error::InvalidOperation(
                format!("quiz '{}' is already in progress", self.quiz_type_key),
            )),
            EngineState::NotStarted | EngineState::Completed(_) => Ok(()),
        }
    }

    fn load_definition(&self) -> Result<QuizDefinition> {
        let definition = self.provider.quiz(&self.quiz_type_key).ok_or_else(|| {
            Error::Configuration(format!("no quiz defined for kind '{}'", self.quiz_type_key))
        })?;

        if definition.questions.is_empty() {
            return Err(Error::Configuration(format!(
                "quiz '{}' has no questions",
                self.quiz_type_key
            )));
        }
        if let Some(question) = definition.questions.iter().find(|q| q.options.is_empty()) {
            return Err(Error::Configuration(format!(
                "question '{}' in quiz '{}' has no options",
                question.id, self.quiz_type_key
            )));
        }

        Ok(definition)
    }

    async fn restore(&mut self, definition: QuizDefinition) -> Result<ResumeOutcome> {
        let Some(session) = self.store.load(&self.quiz_type_key).await? else {
            return Ok(ResumeOutcome::NothingStored);
        };

        let total = definition.total_questions();
        if session.quiz_type_key != self.quiz_type_key || !session.is_consistent(total) {
            tracing::warn!(
                quiz_type_key = %self.quiz_type_key,
                stored_index = session.current_question_index,
                total,
                "stored quiz session does not fit the quiz, discarding"
            );
            self.store.clear(&self.quiz_type_key).await?;
            return Ok(ResumeOutcome::NothingStored);
        }

        let now = self.clock.now_millis();
        let token = self.registry.claim(&self.quiz_type_key);
        let restored_index = session.current_question_index;
        let remaining = session.remaining_seconds(now);
        self.begin(definition, session, token, now);

        if remaining == 0 || restored_index == total {
            tracing::info!(
                quiz_type_key = %self.quiz_type_key,
                restored_index,
                "stored quiz is over, finalizing"
            );
            let result = self.finalize(now).await?;
            return Ok(ResumeOutcome::Finalized(result));
        }

        tracing::info!(
            quiz_type_key = %self.quiz_type_key,
            restored_index,
            seconds_remaining = remaining,
            "quiz resumed"
        );
        self.events.push(EngineEvent::QuizResumed { restored_index });
        self.arm_current_question(now);
        Ok(ResumeOutcome::Resumed { restored_index })
    }

    fn begin(
        &mut self,
        definition: QuizDefinition,
        session: QuizAttemptSession,
        token: AttemptToken,
        now: i64,
    ) {
        let bucket = checkpoint_bucket(
            session.remaining_seconds(now),
            self.options.checkpoint_every_seconds,
        );
        self.attempt = Some(Attempt {
            quiz_timer: QuizTimer::arm(&session),
            definition,
            session,
            phase: Phase::Answering,
            token,
            checkpoint_bucket: bucket,
            ran_out_of_time: false,
        });
        self.state = EngineState::InProgress;
    }

    /// Arms the question at the cursor at its full time limit.
    fn arm_current_question(&mut self, now: i64) {
        let Some(attempt) = self.attempt.as_mut() else {
            return;
        };
        let index = attempt.session.current_question_index;
        let Some(question) = attempt.definition.questions.get(index).cloned() else {
            return;
        };
        let limit = attempt.definition.config.per_question_time_limit_seconds;

        self.question_timer.start(index, &question, limit, now);
        attempt.phase = Phase::Answering;
        self.events.push(EngineEvent::QuestionArmed {
            index,
            question,
            seconds_remaining: limit,
        });
    }

    /// Returns the new window and a copy of the session to save if the
    /// countdown left the last checkpointed window.
    fn checkpoint_due(&self, seconds_remaining: u32) -> Option<(u32, QuizAttemptSession)> {
        let attempt = self.attempt.as_ref()?;
        let bucket = checkpoint_bucket(seconds_remaining, self.options.checkpoint_every_seconds);
        if bucket == attempt.checkpoint_bucket {
            return None;
        }
        Some((bucket, attempt.session.clone()))
    }

    /// Appends an answer, persists it, then either finishes or opens the explanation pause.
    async fn record(
        &mut self,
        question_index: usize,
        option_id: &str,
        time_remaining: u32,
        timed_out: bool,
        now: i64,
    ) -> Result<AnswerOutcome> {
        let attempt = self.attempt.as_ref().ok_or_else(|| {
            Error::InvalidOperation(format!("no quiz in progress for '{}'", self.quiz_type_key))
        })?;

        let cursor = attempt.session.current_question_index;
        if question_index != cursor {
            return Err(Error::InvalidOperation(format!(
                "answer for question {question_index} rejected, current question is {cursor}"
            )));
        }

        let question = attempt
            .definition
            .questions
            .get(question_index)
            .ok_or_else(|| {
                Error::InvalidOperation(format!("question {question_index} does not exist"))
            })?;
        let is_correct = question
            .option(option_id)
            .ok_or_else(|| {
                Error::InvalidOperation(format!(
                    "option '{option_id}' does not belong to question {question_index}"
                ))
            })?
            .is_correct;

        let mut updated = attempt.session.clone();
        updated.record_answer(option_id, is_correct, time_remaining);
        let total = attempt.definition.total_questions();

        self.store.save(&self.quiz_type_key, &updated).await?;

        self.question_timer.stop();
        let finished = updated.current_question_index == total;
        if let Some(attempt) = self.attempt.as_mut() {
            attempt.session = updated;
        }
        self.events.push(EngineEvent::AnswerRecorded {
            index: question_index,
            option_id: option_id.to_string(),
            is_correct,
            time_remaining,
            timed_out,
        });
        tracing::debug!(
            quiz_type_key = %self.quiz_type_key,
            question_index,
            is_correct,
            time_remaining,
            timed_out,
            "answer recorded"
        );

        let mut outcome = AnswerOutcome {
            question_index,
            is_correct,
            time_remaining,
            finished: None,
        };

        if finished {
            outcome.finished = Some(self.finalize(now).await?);
        } else if self.options.explanation_delay.is_zero() {
            self.arm_current_question(now);
        } else if let Some(attempt) = self.attempt.as_mut() {
            attempt.phase = Phase::ShowingExplanation {
                advance_at_millis: now + self.options.explanation_delay.as_millis() as i64,
            };
        }

        Ok(outcome)
    }

    /// Backfills unanswered questions, scores, and clears the stored session.
    async fn finalize(&mut self, now: i64) -> Result<ScoreResult> {
        self.state = EngineState::Finalizing;
        self.question_timer.stop();

        let attempt = self.attempt.as_mut().ok_or_else(|| {
            Error::InvalidOperation(format!("nothing to finalize for '{}'", self.quiz_type_key))
        })?;

        let total = attempt.definition.total_questions();
        if attempt.session.current_question_index < total {
            attempt.ran_out_of_time = true;
        }
        let backfilled = attempt.session.backfill_unanswered(total);

        let result = scoring::score(
            &attempt.session,
            total,
            &attempt.definition.config.bonus_policy,
        );
        let badge = BadgeCandidate::from_session(
            &attempt.session,
            total,
            attempt.definition.config.per_question_time_limit_seconds,
            attempt.ran_out_of_time,
        );
        let token = attempt.token;
        let elapsed_millis = now.saturating_sub(attempt.session.started_at_epoch_millis);

        self.store.clear(&self.quiz_type_key).await?;

        self.registry.release(&self.quiz_type_key, token);
        self.attempt = None;
        self.state = EngineState::Completed(result);
        self.events.push(EngineEvent::QuizFinalized { result, badge });

        tracing::info!(
            quiz_type_key = %self.quiz_type_key,
            correct = result.correct_count,
            total = result.total_questions,
            points = result.points_awarded,
            backfilled,
            elapsed_millis,
            "quiz finalized"
        );
        Ok(result)
    }

    /// Drops the attempt if a newer engine instance has claimed this quiz kind.
    fn check_owner(&mut self) -> Result<()> {
        let Some(attempt) = self.attempt.as_ref() else {
            return Ok(());
        };
        if self.registry.owns(&self.quiz_type_key, attempt.token) {
            return Ok(());
        }

        tracing::warn!(
            quiz_type_key = %self.quiz_type_key,
            "attempt was taken over by another engine instance"
        );
        self.question_timer.stop();
        self.attempt = None;
        self.state = EngineState::NotStarted;
        Err(Error::StaleSession(self.quiz_type_key.clone()))
    }
}
