use log::{error, info};
use quiz_mania::{
    config::{Settings, DEFAULT_CONFIG_PATH},
    error::QuizError,
    handlers::connection_handler::{handle_connection, SessionContext},
    loggers::file_logger::init_file_logger,
    storage::{preferences::SqlitePreferences, question_bank},
};
use std::{
    env,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), QuizError> {
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = Settings::load(&config_path)?;

    init_file_logger(&settings.log_dir)?;
    info!("App started!");

    let fetched = question_bank::fetch(&settings.question_bank_path)?;
    if fetched.questions.is_empty() {
        error!(
            "No playable questions in {}, refusing to start",
            &settings.question_bank_path
        );
        return Err(QuizError::EmptyQuestionSet);
    }

    let preferences = SqlitePreferences::open(&settings.preferences_path)?;

    let listener = TcpListener::bind(&settings.listen_address).await?;
    info!("Listening on: {}", &settings.listen_address);

    let context = SessionContext {
        questions: Arc::new(fetched.questions),
        preferences: Arc::new(Mutex::new(preferences)),
        settings: Arc::new(settings),
    };

    while let Ok((stream, addr)) = listener.accept().await {
        tokio::spawn(handle_connection(context.clone(), stream, addr));
    }

    Ok(())
}
