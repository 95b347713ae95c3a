use crate::model::QuizAttemptSession;

/// Emitted by [`QuizTimer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizSignal {
    Tick { seconds_remaining: u32 },
    Expired,
}

/// Countdown for the whole attempt.
///
/// Remaining time is recomputed from the session's start timestamp on every
/// poll, so missed or throttled ticks correct themselves on the next one.
#[derive(Debug, Clone)]
pub struct QuizTimer {
    started_at_millis: i64,
    total_seconds: u32,
    last_reported: Option<u32>,
    expired: bool,
}

impl QuizTimer {
    /// Arms the timer from a stored session. The first poll reports expiry
    /// straight away if the budget is already spent.
    pub fn arm(session: &QuizAttemptSession) -> Self {
        Self {
            started_at_millis: session.started_at_epoch_millis,
            total_seconds: session.total_duration_seconds,
            last_reported: None,
            expired: false,
        }
    }

    pub fn remaining(&self, now_millis: i64) -> u32 {
        let elapsed = crate::clock::elapsed_whole_seconds(self.started_at_millis, now_millis);
        u64::from(self.total_seconds).saturating_sub(elapsed) as u32
    }

    pub fn has_expired(&self) -> bool {
        self.expired
    }

    pub fn poll(&mut self, now_millis: i64) -> Option<QuizSignal> {
        if self.expired {
            return None;
        }

        let remaining = self.remaining(now_millis);
        if remaining == 0 {
            self.expired = true;
            return Some(QuizSignal::Expired);
        }

        if self.last_reported != Some(remaining) {
            self.last_reported = Some(remaining);
            return Some(QuizSignal::Tick {
                seconds_remaining: remaining,
            });
        }

        None
    }
}

/// Groups remaining seconds into checkpoint windows of `every` seconds.
///
/// The engine saves whenever the bucket changes, which also catches windows
/// skipped over by a long pause between ticks.
pub fn checkpoint_bucket(seconds_remaining: u32, every: u32) -> u32 {
    if every == 0 {
        return seconds_remaining;
    }
    seconds_remaining / every
}
