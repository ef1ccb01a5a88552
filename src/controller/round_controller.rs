use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    audio::{AudioSink, CORRECT_CUE, COUNTDOWN_CUE, INCORRECT_CUE},
    controller::{
        countdown::{Countdown, Step},
        listener::RoundListener,
        selection::pick_question,
    },
    error::{QuizError, Result},
    models::{
        question::{AnswerMode, Question, QuestionSet},
        round::{Outcome, Phase, RoundState},
    },
    storage::preferences::{Preferences, HIGH_SCORE_KEY},
};

pub const DEFAULT_RESOLUTION_DELAY: Duration = Duration::from_secs(1);

/// Drives one player's session: question selection, picks, scoring and the
/// countdown. Time only moves through [`RoundController::update`].
pub struct RoundController {
    questions: Arc<QuestionSet>,
    state: RoundState,
    phase: Phase,
    rng: StdRng,
    clock: Duration,
    resolution_delay: Duration,
    countdown: Option<Countdown>,
    next_round_due: Option<Duration>,
    listeners: Vec<Box<dyn RoundListener>>,
    audio: Box<dyn AudioSink>,
    preferences: Box<dyn Preferences>,
}

impl RoundController {
    pub fn new(
        preferences: Box<dyn Preferences>,
        audio: Box<dyn AudioSink>,
        resolution_delay: Duration,
    ) -> Self {
        RoundController {
            questions: Arc::new(QuestionSet::default()),
            state: RoundState::default(),
            phase: Phase::Idle,
            rng: StdRng::seed_from_u64(0),
            clock: Duration::ZERO,
            resolution_delay,
            countdown: None,
            next_round_due: None,
            listeners: Vec::new(),
            audio,
            preferences,
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn RoundListener>) {
        self.listeners.push(listener);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn score(&self) -> i32 {
        self.state.score
    }

    pub fn question_set(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state
            .current_question
            .and_then(|index| self.questions.get(index))
    }

    pub fn has_pending_advance(&self) -> bool {
        self.next_round_due.is_some()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(|countdown| countdown.remaining())
    }

    pub fn start_session(&mut self, questions: Arc<QuestionSet>, seed: u64) -> Result<()> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        self.countdown = None;
        self.next_round_due = None;
        self.questions = questions;
        self.rng = StdRng::seed_from_u64(seed);
        self.state = RoundState::new(self.read_high_score());
        info!(
            "Session started with {} questions, high score {}",
            self.questions.len(),
            self.state.startup_high_score
        );

        self.display_next_question();
        Ok(())
    }

    /// Starts over with the question set of the previous session.
    pub fn restart_session(&mut self, seed: u64) -> Result<()> {
        let questions = self.questions.clone();
        self.start_session(questions, seed)
    }

    pub fn submit_pick(&mut self, answer_index: usize) {
        if self.phase != Phase::AwaitingInput {
            warn!("Pick {} ignored in phase {:?}", answer_index, self.phase);
            return;
        }
        let (answer_count, mode) = match self.current_question() {
            Some(question) => (question.answers().len(), question.answer_mode),
            None => return,
        };
        if answer_index >= answer_count {
            warn!(
                "Pick {} ignored, question has {} answers",
                answer_index, answer_count
            );
            return;
        }

        match mode {
            AnswerMode::Single => {
                let displaced: Vec<usize> = self
                    .state
                    .picked
                    .iter()
                    .copied()
                    .filter(|index| *index != answer_index)
                    .collect();
                self.state.picked.clear();
                self.state.picked.insert(answer_index);
                for index in displaced {
                    self.notify(|listener| listener.on_answer_selection_changed(index, false));
                }
                self.notify(|listener| listener.on_answer_selection_changed(answer_index, true));
            }
            AnswerMode::Multi => {
                let selected = if self.state.picked.remove(&answer_index) {
                    false
                } else {
                    self.state.picked.insert(answer_index);
                    true
                };
                self.notify(|listener| listener.on_answer_selection_changed(answer_index, selected));
            }
        }
    }

    pub fn accept(&mut self) {
        if self.phase != Phase::AwaitingInput {
            warn!("Accept ignored in phase {:?}", self.phase);
            return;
        }
        let index = match self.state.current_question {
            Some(index) => index,
            None => return,
        };
        let question = match self.questions.get(index) {
            Some(question) => question,
            None => return,
        };
        let score_value = question.score_value;

        self.countdown = None;
        let is_correct = self.state.picked.iter().copied().eq(question.correct_answers());
        self.state.finished.insert(index);

        let score = self
            .state
            .apply_score(if is_correct { score_value } else { -score_value });
        self.notify(|listener| listener.on_score_changed(score));

        let outcome = if self.state.is_finished(self.questions.len()) {
            Outcome::Finish
        } else if is_correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        info!(
            "Question {} resolved: {:?}, score {}",
            index, outcome, self.state.score
        );

        if outcome == Outcome::Finish {
            self.finish_session();
        }

        self.notify(|listener| listener.on_round_resolved(outcome, score_value));
        self.audio
            .play(if is_correct { CORRECT_CUE } else { INCORRECT_CUE });

        if outcome == Outcome::Finish {
            self.next_round_due = None;
            self.phase = Phase::SessionComplete;
        } else {
            self.next_round_due = Some(self.clock + self.resolution_delay);
            self.phase = Phase::Resolving;
        }
    }

    pub fn advance(&mut self) {
        if self.phase != Phase::Resolving {
            warn!("Advance ignored in phase {:?}", self.phase);
            return;
        }
        self.next_round_due = None;
        self.display_next_question();
    }

    /// Moves the clock forward by `elapsed`, firing every callback that
    /// falls due on the way in deadline order.
    pub fn update(&mut self, elapsed: Duration) {
        let target = self.clock + elapsed;
        while let Some(due) = self.next_deadline().filter(|due| *due <= target) {
            self.clock = due;
            if self.next_round_due == Some(due) {
                self.next_round_due = None;
                self.advance();
            } else {
                self.step_countdown();
            }
        }
        self.clock = target;
    }

    fn next_deadline(&self) -> Option<Duration> {
        let countdown_due = self.countdown.as_ref().map(Countdown::next_due);
        match (self.next_round_due, countdown_due) {
            (Some(round), Some(countdown)) => Some(round.min(countdown)),
            (round, countdown) => round.or(countdown),
        }
    }

    fn step_countdown(&mut self) {
        let step = match self.countdown.as_mut() {
            Some(countdown) => countdown.step(),
            None => return,
        };
        match step {
            Step::Tick {
                remaining,
                visual_state,
            } => {
                debug!("Timer tick: {} ({:?})", remaining, visual_state);
                self.audio.play(COUNTDOWN_CUE);
                self.notify(|listener| listener.on_timer_tick(remaining, visual_state));
            }
            Step::Expired => {
                info!("Timer ran out, accepting current picks");
                self.countdown = None;
                self.accept();
            }
        }
    }

    fn display_next_question(&mut self) {
        let previous = self.state.current_question;
        let index = match pick_question(
            &mut self.rng,
            self.questions.len(),
            &self.state.finished,
            previous,
        ) {
            Some(index) => index,
            None => {
                self.phase = Phase::SessionComplete;
                return;
            }
        };

        self.state.picked.clear();
        self.state.current_question = Some(index);
        self.phase = Phase::AwaitingInput;

        let questions = self.questions.clone();
        let question = &questions.questions[index];
        self.notify(|listener| listener.on_question_changed(index, question));

        if question.uses_timer {
            let mut countdown = Countdown::start(question.timer_seconds, self.clock);
            // The first tick is immediate; a zero-length timer waits for the next update.
            if question.timer_seconds > 0 {
                if let Step::Tick {
                    remaining,
                    visual_state,
                } = countdown.step()
                {
                    self.audio.play(COUNTDOWN_CUE);
                    self.notify(|listener| listener.on_timer_tick(remaining, visual_state));
                }
            }
            self.countdown = Some(countdown);
        } else {
            self.countdown = None;
        }
    }

    fn finish_session(&mut self) {
        let score = self.state.score;
        let mut high_score = self.read_high_score();
        if high_score < score {
            match self.preferences.set_int(HIGH_SCORE_KEY, score) {
                Ok(()) => {
                    info!("New high score: {}", score);
                    high_score = score;
                }
                Err(error) => warn!("Could not store high score: {}", error),
            }
        }
        let is_new = high_score > self.state.startup_high_score;
        self.notify(|listener| listener.on_session_finished(score, high_score, is_new));
    }

    fn read_high_score(&mut self) -> i32 {
        match self.preferences.get_int(HIGH_SCORE_KEY) {
            Ok(value) => value,
            Err(error) => {
                warn!("Could not read high score: {}", error);
                0
            }
        }
    }

    fn notify<F>(&mut self, mut event: F)
    where
        F: FnMut(&mut dyn RoundListener),
    {
        for listener in self.listeners.iter_mut() {
            event(listener.as_mut());
        }
    }
}
