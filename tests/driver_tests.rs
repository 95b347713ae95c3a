use std::sync::Arc;
use std::time::Duration;

use quiz_session_engine::{
    EngineEvent, EngineState, Error, ManualClock, MemoryStore, QuestionBank, QuizDriver,
    SessionRegistry, StartOutcome, TimedSessionEngine,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const TICK: Duration = Duration::from_millis(10);

fn engine(store: &MemoryStore, clock: &ManualClock) -> TimedSessionEngine {
    TimedSessionEngine::new(
        "daily",
        Arc::new(store.clone()),
        Arc::new(QuestionBank::sample()),
        SessionRegistry::new(),
    )
    .with_clock(Arc::new(clock.clone()))
}

async fn wait_for(
    events: &mut UnboundedReceiver<EngineEvent>,
    mut matches: impl FnMut(&EngineEvent) -> bool,
) -> EngineEvent {
    timeout(Duration::from_secs(2), async {
        loop {
            let event = events.recv().await.expect("driver hung up");
            if matches(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

#[tokio::test]
async fn driver_forwards_events_for_commands_and_ticks() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let (handle, mut events) = QuizDriver::spawn(engine(&store, &clock), TICK);

    assert_eq!(handle.start_quiz().await.unwrap(), StartOutcome::Fresh);
    wait_for(&mut events, |e| {
        matches!(e, EngineEvent::QuestionArmed { index: 0, .. })
    })
    .await;

    clock.advance(Duration::from_secs(2));
    let outcome = handle.submit_answer(0, "1b").await.unwrap();
    assert!(outcome.is_correct);
    assert_eq!(outcome.time_remaining, 13);

    let err = handle.submit_answer(1, "2c").await.unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));

    clock.advance(Duration::from_secs(3));
    wait_for(&mut events, |e| {
        matches!(e, EngineEvent::QuestionArmed { index: 1, .. })
    })
    .await;

    let engine = handle.dispose().await.unwrap();
    assert_eq!(engine.state(), &EngineState::NotStarted);
    assert!(store.contains("daily"));
}

#[tokio::test]
async fn driver_ticks_expire_unanswered_questions() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let (handle, mut events) = QuizDriver::spawn(engine(&store, &clock), TICK);

    handle.start_quiz().await.unwrap();
    clock.advance(Duration::from_secs(15));

    let event = wait_for(&mut events, |e| {
        matches!(e, EngineEvent::AnswerRecorded { .. })
    })
    .await;
    assert_eq!(
        event,
        EngineEvent::AnswerRecorded {
            index: 0,
            option_id: "1a".to_string(),
            is_correct: false,
            time_remaining: 0,
            timed_out: true,
        }
    );

    handle.dispose().await.unwrap();
}

#[tokio::test]
async fn driver_finalizes_when_quiz_time_runs_out() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let (handle, mut events) = QuizDriver::spawn(engine(&store, &clock), TICK);

    handle.start_quiz().await.unwrap();
    clock.advance(Duration::from_secs(181));

    let event = wait_for(&mut events, |e| {
        matches!(e, EngineEvent::QuizFinalized { .. })
    })
    .await;
    let EngineEvent::QuizFinalized { result, badge } = event else {
        unreachable!();
    };
    assert_eq!(result.correct_count, 0);
    assert_eq!(result.total_questions, 5);
    assert!(badge.expired);
    assert!(!store.contains("daily"));

    let engine = handle.dispose().await.unwrap();
    assert_eq!(engine.state(), &EngineState::Completed(result));
}

#[tokio::test]
async fn abandon_through_handle_clears_storage() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let (handle, _events) = QuizDriver::spawn(engine(&store, &clock), TICK);

    handle.start_quiz().await.unwrap();
    assert!(store.contains("daily"));

    handle.abandon().await.unwrap();
    assert!(!store.contains("daily"));

    assert_eq!(handle.start_quiz().await.unwrap(), StartOutcome::Fresh);
    handle.dispose().await.unwrap();
}

#[tokio::test]
async fn zero_tick_interval_is_accepted() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(1_700_000_000_000);
    let (handle, mut events) = QuizDriver::spawn(engine(&store, &clock), Duration::ZERO);

    assert_eq!(handle.start_quiz().await.unwrap(), StartOutcome::Fresh);
    clock.advance(Duration::from_secs(1));
    wait_for(&mut events, |e| {
        matches!(e, EngineEvent::QuestionTick { seconds_remaining: 14, .. })
    })
    .await;

    handle.dispose().await.unwrap();
}
