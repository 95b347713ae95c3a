//! Runs an engine on a tokio task.
//!
//! The driver owns the [`TimedSessionEngine`] and feeds it two kinds of input
//! through one `select!` loop: interval ticks and commands from a
//! [`QuizHandle`]. Because both arrive on the same task, an answer and a timer
//! expiry can never be applied at the same time.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::{AnswerOutcome, EngineEvent, ResumeOutcome, StartOutcome, TimedSessionEngine};
use crate::error::{Error, Result};

enum Command {
    Start(oneshot::Sender<Result<StartOutcome>>),
    Resume(oneshot::Sender<Result<ResumeOutcome>>),
    Submit {
        question_index: usize,
        option_id: String,
        reply: oneshot::Sender<Result<AnswerOutcome>>,
    },
    Abandon(oneshot::Sender<Result<()>>),
    Dispose,
}

const MIN_TICK: Duration = Duration::from_millis(1);

/// Spawns driver tasks.
pub struct QuizDriver;

impl QuizDriver {
    /// Moves `engine` onto a new task that ticks it every `tick_every`.
    ///
    /// A zero interval is raised to one millisecond.
    ///
    /// Engine events are forwarded to the returned receiver in the order they
    /// were produced.
    pub fn spawn(
        engine: TimedSessionEngine,
        tick_every: Duration,
    ) -> (QuizHandle, mpsc::UnboundedReceiver<EngineEvent>) {
        let tick_every = tick_every.max(MIN_TICK);
        let (commands_tx, commands_rx) = mpsc::channel(16);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(run(engine, tick_every, commands_rx, events_tx));

        (
            QuizHandle {
                commands: commands_tx,
                task,
            },
            events_rx,
        )
    }
}

/// Sends presentation-layer intent to a running driver.
pub struct QuizHandle {
    commands: mpsc::Sender<Command>,
    task: JoinHandle<TimedSessionEngine>,
}

impl QuizHandle {
    /// See [`TimedSessionEngine::start_quiz`].
    pub async fn start_quiz(&self) -> Result<StartOutcome> {
        self.request(Command::Start).await
    }

    /// See [`TimedSessionEngine::resume`].
    pub async fn resume(&self) -> Result<ResumeOutcome> {
        self.request(Command::Resume).await
    }

    /// See [`TimedSessionEngine::submit_answer`].
    pub async fn submit_answer(
        &self,
        question_index: usize,
        option_id: impl Into<String>,
    ) -> Result<AnswerOutcome> {
        let option_id = option_id.into();
        self.request(|reply| Command::Submit {
            question_index,
            option_id,
            reply,
        })
        .await
    }

    /// See [`TimedSessionEngine::abandon`].
    pub async fn abandon(&self) -> Result<()> {
        self.request(Command::Abandon).await
    }

    /// Stops the loop, disposes the engine and hands it back.
    pub async fn dispose(self) -> Result<TimedSessionEngine> {
        // A closed channel means the loop is already on its way out.
        let _ = self.commands.send(Command::Dispose).await;
        self.task
            .await
            .map_err(|e| Error::Backend(format!("quiz driver task failed: {e}")))
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| Error::InvalidOperation("quiz driver has stopped".to_string()))?;
        reply_rx
            .await
            .map_err(|_| Error::InvalidOperation("quiz driver has stopped".to_string()))?
    }
}

async fn run(
    mut engine: TimedSessionEngine,
    tick_every: Duration,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<EngineEvent>,
) -> TimedSessionEngine {
    let mut interval = tokio::time::interval(tick_every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = engine.tick().await {
                    tracing::warn!(quiz_type_key = engine.quiz_type_key(), error = %e, "quiz tick failed");
                }
                forward(&mut engine, &events);
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                match command {
                    Command::Start(reply) => {
                        let outcome = engine.start_quiz().await;
                        forward(&mut engine, &events);
                        let _ = reply.send(outcome);
                    }
                    Command::Resume(reply) => {
                        let outcome = engine.resume().await;
                        forward(&mut engine, &events);
                        let _ = reply.send(outcome);
                    }
                    Command::Submit { question_index, option_id, reply } => {
                        let outcome = engine.submit_answer(question_index, &option_id).await;
                        forward(&mut engine, &events);
                        let _ = reply.send(outcome);
                    }
                    Command::Abandon(reply) => {
                        let outcome = engine.abandon().await;
                        forward(&mut engine, &events);
                        let _ = reply.send(outcome);
                    }
                    Command::Dispose => break,
                }
            }
        }
    }

    engine.dispose();
    forward(&mut engine, &events);
    engine
}

fn forward(engine: &mut TimedSessionEngine, events: &mpsc::UnboundedSender<EngineEvent>) {
    for event in engine.drain_events() {
        let _ = events.send(event);
    }
}
