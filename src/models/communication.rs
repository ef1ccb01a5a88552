#![allow(non_camel_case_types, non_snake_case)]

use serde::{Deserialize, Serialize};

use crate::{
    audio::SoundRequest,
    controller::listener::Notification,
    models::{
        question::AnswerMode,
        round::{Outcome, VisualState},
    },
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "response", content = "data")]
pub enum Response {
    questionResponse {
        questionIndex: usize,
        question: String,
        answers: Vec<String>,
        answerMode: AnswerMode,
        timer: Option<u32>,
    },
    answerSelectionResponse {
        answerIndex: usize,
        selected: bool,
    },
    timerResponse {
        timer: u32,
        visualState: VisualState,
    },
    resolutionResponse {
        outcome: Outcome,
        score: i32,
    },
    scoreResponse {
        score: i32,
    },
    finishResponse {
        score: i32,
        highScore: i32,
        newHighScore: bool,
    },
    playSoundResponse {
        name: String,
        clip: String,
        volume: f32,
        pitch: f32,
        looped: bool,
    },
    stopSoundResponse {
        name: String,
    },
    errorResponse {
        errorText: String,
    },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub enum Command {
    pickAnswer { answerIndex: usize },
    accept {},
    restartGame {},
    quitGame {},
    heartbeat {},
}

impl From<Notification> for Response {
    fn from(notification: Notification) -> Self {
        match notification {
            // Correctness flags stay on the server.
            Notification::QuestionChanged { index, question } => Response::questionResponse {
                questionIndex: index,
                answers: question
                    .answers()
                    .iter()
                    .map(|answer| answer.text.clone())
                    .collect(),
                timer: question.uses_timer.then_some(question.timer_seconds),
                answerMode: question.answer_mode,
                question: question.text,
            },
            Notification::AnswerSelectionChanged {
                answer_index,
                selected,
            } => Response::answerSelectionResponse {
                answerIndex: answer_index,
                selected,
            },
            Notification::TimerTick {
                remaining,
                visual_state,
            } => Response::timerResponse {
                timer: remaining,
                visualState: visual_state,
            },
            Notification::RoundResolved {
                outcome,
                score_value,
            } => Response::resolutionResponse {
                outcome,
                score: score_value,
            },
            Notification::ScoreChanged { score } => Response::scoreResponse { score },
            Notification::SessionFinished {
                score,
                high_score,
                is_new_high_score,
            } => Response::finishResponse {
                score,
                highScore: high_score,
                newHighScore: is_new_high_score,
            },
        }
    }
}

impl From<SoundRequest> for Response {
    fn from(request: SoundRequest) -> Self {
        match request {
            SoundRequest::Play(sound) => Response::playSoundResponse {
                name: sound.name,
                clip: sound.clip,
                volume: sound.parameters.volume,
                pitch: sound.parameters.pitch,
                looped: sound.parameters.looped,
            },
            SoundRequest::Stop(name) => Response::stopSoundResponse { name },
        }
    }
}
