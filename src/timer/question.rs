use crate::clock::elapsed_whole_seconds;
use crate::model::Question;

/// Emitted by [`QuestionTimer::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSignal {
    Tick {
        question_index: usize,
        seconds_remaining: u32,
    },
    /// The countdown hit zero; `option_id` is the question's default option.
    Expired {
        question_index: usize,
        option_id: String,
    },
}

#[derive(Debug, Clone)]
struct ArmedQuestion {
    question_index: usize,
    default_option_id: String,
    limit_seconds: u32,
    started_at_millis: i64,
    last_reported: u32,
}

impl ArmedQuestion {
    fn remaining(&self, now_millis: i64) -> u32 {
        let elapsed = elapsed_whole_seconds(self.started_at_millis, now_millis);
        u64::from(self.limit_seconds).saturating_sub(elapsed) as u32
    }
}

/// Countdown for the question currently on screen.
///
/// Holds at most one armed question; arming another replaces it. Nothing here
/// is persisted, so a reload re-arms the current question at its full limit.
#[derive(Debug, Clone, Default)]
pub struct QuestionTimer {
    armed: Option<ArmedQuestion>,
}

impl QuestionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the countdown for `question`, stopping whatever was running.
    ///
    /// Returns `false` without arming when the question has no options to
    /// fall back on.
    pub fn start(
        &mut self,
        question_index: usize,
        question: &Question,
        limit_seconds: u32,
        now_millis: i64,
    ) -> bool {
        self.stop();
        let Some(default_option) = question.default_option() else {
            return false;
        };

        self.armed = Some(ArmedQuestion {
            question_index,
            default_option_id: default_option.id.clone(),
            limit_seconds,
            started_at_millis: now_millis,
            last_reported: limit_seconds,
        });
        true
    }

    /// Cancels the countdown. Returns whether anything was running.
    pub fn stop(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    pub fn question_index(&self) -> Option<usize> {
        self.armed.as_ref().map(|a| a.question_index)
    }

    pub fn remaining(&self, now_millis: i64) -> Option<u32> {
        self.armed.as_ref().map(|a| a.remaining(now_millis))
    }

    /// Returns the expiry signal if the armed question has run out, without
    /// touching the timer.
    pub fn expiry(&self, now_millis: i64) -> Option<QuestionSignal> {
        let armed = self.armed.as_ref()?;
        (armed.remaining(now_millis) == 0).then(|| QuestionSignal::Expired {
            question_index: armed.question_index,
            option_id: armed.default_option_id.clone(),
        })
    }

    /// Reports at most one signal per call.
    ///
    /// An expired question stays armed at zero until [`stop`](Self::stop), so
    /// an expiry whose handling failed is reported again on the next poll.
    pub fn poll(&mut self, now_millis: i64) -> Option<QuestionSignal> {
        if let Some(expired) = self.expiry(now_millis) {
            return Some(expired);
        }

        let armed = self.armed.as_mut()?;
        let remaining = armed.remaining(now_millis);
        if remaining < armed.last_reported {
            armed.last_reported = remaining;
            return Some(QuestionSignal::Tick {
                question_index: armed.question_index,
                seconds_remaining: remaining,
            });
        }

        None
    }
}
