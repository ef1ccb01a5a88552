use futures_channel::mpsc::UnboundedSender;
use log::debug;

use crate::models::{
    question::Question,
    round::{Outcome, VisualState},
};

/// Observer for everything a round controller reports outward.
/// Every hook is optional; listeners override only what they display.
pub trait RoundListener: Send {
    fn on_question_changed(&mut self, _index: usize, _question: &Question) {}

    fn on_answer_selection_changed(&mut self, _answer_index: usize, _selected: bool) {}

    fn on_timer_tick(&mut self, _remaining: u32, _visual_state: VisualState) {}

    fn on_round_resolved(&mut self, _outcome: Outcome, _score_value: i32) {}

    fn on_score_changed(&mut self, _score: i32) {}

    fn on_session_finished(&mut self, _score: i32, _high_score: i32, _is_new_high_score: bool) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    QuestionChanged {
        index: usize,
        question: Question,
    },
    AnswerSelectionChanged {
        answer_index: usize,
        selected: bool,
    },
    TimerTick {
        remaining: u32,
        visual_state: VisualState,
    },
    RoundResolved {
        outcome: Outcome,
        score_value: i32,
    },
    ScoreChanged {
        score: i32,
    },
    SessionFinished {
        score: i32,
        high_score: i32,
        is_new_high_score: bool,
    },
}

/// Turns every hook into a [`Notification`] pushed onto an unbounded channel.
pub struct ChannelListener {
    tx: UnboundedSender<Notification>,
}

impl ChannelListener {
    pub fn new(tx: UnboundedSender<Notification>) -> Self {
        ChannelListener { tx }
    }

    fn send(&self, notification: Notification) {
        if self.tx.unbounded_send(notification).is_err() {
            debug!("Notification receiver is gone");
        }
    }
}

impl RoundListener for ChannelListener {
    fn on_question_changed(&mut self, index: usize, question: &Question) {
        self.send(Notification::QuestionChanged {
            index,
            question: question.clone(),
        });
    }

    fn on_answer_selection_changed(&mut self, answer_index: usize, selected: bool) {
        self.send(Notification::AnswerSelectionChanged {
            answer_index,
            selected,
        });
    }

    fn on_timer_tick(&mut self, remaining: u32, visual_state: VisualState) {
        self.send(Notification::TimerTick {
            remaining,
            visual_state,
        });
    }

    fn on_round_resolved(&mut self, outcome: Outcome, score_value: i32) {
        self.send(Notification::RoundResolved {
            outcome,
            score_value,
        });
    }

    fn on_score_changed(&mut self, score: i32) {
        self.send(Notification::ScoreChanged { score });
    }

    fn on_session_finished(&mut self, score: i32, high_score: i32, is_new_high_score: bool) {
        self.send(Notification::SessionFinished {
            score,
            high_score,
            is_new_high_score,
        });
    }
}
