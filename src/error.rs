use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("question bank xml error: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("could not write question bank xml: {0}")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("preferences error: {0}")]
    Preferences(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logger setup failed: {0}")]
    Logger(String),
    #[error("question set is empty, a session cannot start")]
    EmptyQuestionSet,
    #[error("lock poisoned: {0}")]
    Poisoned(&'static str),
}
