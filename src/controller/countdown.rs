use std::time::Duration;

use crate::models::round::VisualState;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Next urgency tier after a tick. Thresholds use truncating division and
/// the state is sticky: a value matching neither rule keeps `previous`.
pub fn next_visual_state(previous: VisualState, remaining: u32, total: u32) -> VisualState {
    if remaining < total / 2 && remaining > total / 4 {
        VisualState::Warning
    } else if remaining < total / 4 {
        VisualState::Critical
    } else {
        previous
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Tick {
        remaining: u32,
        visual_state: VisualState,
    },
    Expired,
}

/// Per-question countdown. Deadlines are on the owning controller's clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    visual_state: VisualState,
    next_due: Duration,
}

impl Countdown {
    pub fn start(total: u32, now: Duration) -> Self {
        Countdown {
            total,
            remaining: total,
            visual_state: VisualState::Normal,
            next_due: now,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Runs the step due at `next_due`. Once remaining has reached zero the
    /// following step reports expiry.
    pub fn step(&mut self) -> Step {
        if self.remaining == 0 {
            return Step::Expired;
        }

        self.remaining -= 1;
        self.visual_state = next_visual_state(self.visual_state, self.remaining, self.total);
        self.next_due += TICK_INTERVAL;

        Step::Tick {
            remaining: self.remaining,
            visual_state: self.visual_state,
        }
    }
}
