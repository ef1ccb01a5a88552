use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingInput,
    Resolving,
    SessionComplete,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Finish,
}

/// Countdown urgency tier used for timer styling.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Warning,
    Critical,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundState {
    pub current_question: Option<usize>,
    pub finished: BTreeSet<usize>,
    pub picked: BTreeSet<usize>,
    pub score: i32,
    pub startup_high_score: i32,
}

impl RoundState {
    pub fn new(startup_high_score: i32) -> Self {
        RoundState {
            startup_high_score,
            ..Default::default()
        }
    }

    pub fn is_finished(&self, question_count: usize) -> bool {
        self.finished.len() >= question_count
    }

    /// Adds `delta` to the score, never dropping below zero.
    pub fn apply_score(&mut self, delta: i32) -> i32 {
        self.score = self.score.saturating_add(delta).max(0);
        self.score
    }
}
