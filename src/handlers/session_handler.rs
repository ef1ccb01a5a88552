use std::time::{Duration, Instant};

use futures_channel::mpsc::UnboundedReceiver;
use futures_timer::Delay;
use futures_util::{future, pin_mut, StreamExt};
use log::{debug, info, warn};

use crate::{
    controller::RoundController, helpers::random_seed, models::communication::Command,
};

/// Runs `command` against the controller. Returns false once the player quits.
pub fn apply_command(controller: &mut RoundController, command: Command) -> bool {
    match command {
        Command::pickAnswer { answerIndex } => controller.submit_pick(answerIndex),
        Command::accept {} => controller.accept(),
        Command::restartGame {} => {
            if let Err(error) = controller.restart_session(random_seed()) {
                warn!("Restart failed: {}", error);
            }
        }
        Command::quitGame {} => return false,
        Command::heartbeat {} => debug!("Heartbeat"),
    }
    true
}

/// Feeds commands and wall-clock time into the controller until the player
/// quits or the command stream closes. Hands the controller back afterwards.
pub async fn run_session(
    mut controller: RoundController,
    mut commands: UnboundedReceiver<Command>,
    frame_interval: Duration,
) -> RoundController {
    let mut last_update = Instant::now();

    loop {
        let frame = Delay::new(frame_interval);
        let next_command = commands.next();
        pin_mut!(frame, next_command);

        let keep_running = match future::select(next_command, frame).await {
            future::Either::Left((Some(command), _)) => apply_command(&mut controller, command),
            future::Either::Left((None, _)) => false,
            future::Either::Right(_) => true,
        };

        let now = Instant::now();
        controller.update(now - last_update);
        last_update = now;

        if !keep_running {
            break;
        }
    }

    info!("Session ended with score {}", controller.score());
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{default_sounds, SoundBoard},
        models::{
            question::{Answer, AnswerList, AnswerMode, Question, QuestionSet},
            round::Phase,
        },
        storage::preferences::MemoryPreferences,
    };
    use futures_channel::mpsc::unbounded;
    use std::sync::Arc;

    fn single_question(uses_timer: bool) -> Arc<QuestionSet> {
        Arc::new(QuestionSet::new(vec![Question {
            text: "2 + 2?".to_string(),
            answers: AnswerList {
                items: vec![Answer::new("4", true), Answer::new("5", false)],
            },
            uses_timer,
            answer_mode: AnswerMode::Single,
            timer_seconds: 0,
            score_value: 15,
        }]))
    }

    fn controller(set: Arc<QuestionSet>) -> RoundController {
        let (sound_tx, _sound_rx) = unbounded();
        let mut controller = RoundController::new(
            Box::new(MemoryPreferences::new()),
            Box::new(SoundBoard::new(default_sounds(), sound_tx)),
            Duration::from_millis(10),
        );
        controller.start_session(set, 5).unwrap();
        controller
    }

    #[tokio::test]
    async fn queued_commands_play_a_session() {
        let (tx, rx) = unbounded();
        tx.unbounded_send(Command::pickAnswer { answerIndex: 0 }).unwrap();
        tx.unbounded_send(Command::accept {}).unwrap();
        tx.unbounded_send(Command::quitGame {}).unwrap();

        let controller = run_session(controller(single_question(false)), rx, Duration::from_millis(5)).await;

        assert_eq!(controller.phase(), Phase::SessionComplete);
        assert_eq!(controller.score(), 15);
    }

    #[tokio::test]
    async fn closed_command_stream_ends_the_session() {
        let (tx, rx) = unbounded::<Command>();
        drop(tx);

        let controller = run_session(controller(single_question(false)), rx, Duration::from_millis(5)).await;

        assert_eq!(controller.phase(), Phase::AwaitingInput);
    }

    #[tokio::test]
    async fn expired_timer_resolves_without_input() {
        let (tx, rx) = unbounded();
        let session = tokio::spawn(run_session(
            controller(single_question(true)),
            rx,
            Duration::from_millis(5),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.unbounded_send(Command::quitGame {}).unwrap();
        let controller = session.await.unwrap();

        assert_eq!(controller.phase(), Phase::SessionComplete);
        assert_eq!(controller.score(), 0);
    }

    #[test]
    fn heartbeat_leaves_the_round_untouched() {
        let mut controller = controller(single_question(false));
        let before = controller.state().clone();

        assert!(apply_command(&mut controller, Command::heartbeat {}));

        assert_eq!(controller.state(), &before);
        assert_eq!(controller.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn restart_begins_a_fresh_session() {
        let mut controller = controller(single_question(false));
        assert!(apply_command(&mut controller, Command::pickAnswer { answerIndex: 0 }));
        assert!(apply_command(&mut controller, Command::accept {}));
        assert_eq!(controller.score(), 15);

        assert!(apply_command(&mut controller, Command::restartGame {}));
        assert_eq!(controller.phase(), Phase::AwaitingInput);
        assert_eq!(controller.score(), 0);
        assert!(controller.state().finished.is_empty());
        assert!(!apply_command(&mut controller, Command::quitGame {}));
    }
}
