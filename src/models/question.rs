use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    #[serde(rename = "info")]
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Answer {
            text: text.into(),
            is_correct,
        }
    }
}

/// Single keeps at most one pick, a new pick replaces the old one.
/// Multi toggles every answer independently.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerMode {
    Single,
    Multi,
}

impl TryFrom<String> for AnswerMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "Single" => Ok(AnswerMode::Single),
            "Multi" => Ok(AnswerMode::Multi),
            other => Err(format!("unknown answer type: {}", other)),
        }
    }
}

impl From<AnswerMode> for String {
    fn from(mode: AnswerMode) -> Self {
        match mode {
            AnswerMode::Single => "Single".to_string(),
            AnswerMode::Multi => "Multi".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    #[serde(rename = "info")]
    pub text: String,
    pub answers: AnswerList,
    #[serde(rename = "useTimer")]
    pub uses_timer: bool,
    #[serde(rename = "answerType")]
    pub answer_mode: AnswerMode,
    #[serde(rename = "timer")]
    pub timer_seconds: u32,
    #[serde(rename = "addScore")]
    pub score_value: i32,
}

/// `<answers>` wrapper around the repeated `<Answer>` elements.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerList {
    #[serde(rename = "Answer", default)]
    pub items: Vec<Answer>,
}

impl Question {
    pub fn answers(&self) -> &[Answer] {
        &self.answers.items
    }

    pub fn correct_answers(&self) -> Vec<usize> {
        self.answers
            .items
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_correct)
            .map(|(index, _)| index)
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        QuestionSet { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

#[cfg(test)]
pub fn test_set() -> QuestionSet {
    QuestionSet::new(vec![
        Question {
            text: "Which planet is known as the red planet?".to_string(),
            answers: AnswerList {
                items: vec![
                    Answer::new("Venus", false),
                    Answer::new("Mars", true),
                    Answer::new("Jupiter", false),
                ],
            },
            uses_timer: false,
            answer_mode: AnswerMode::Single,
            timer_seconds: 0,
            score_value: 10,
        },
        Question {
            text: "Pick the prime numbers".to_string(),
            answers: AnswerList {
                items: vec![
                    Answer::new("2", true),
                    Answer::new("4", false),
                    Answer::new("7", true),
                ],
            },
            uses_timer: true,
            answer_mode: AnswerMode::Multi,
            timer_seconds: 10,
            score_value: 20,
        },
    ])
}
