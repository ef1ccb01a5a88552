use crate::{
    audio::{SoundBoard, SoundRequest},
    config::Settings,
    controller::{ChannelListener, Notification, RoundController},
    error::Result,
    handlers::session_handler::run_session,
    helpers::{parse_command, random_seed},
    models::{communication::Response, question::QuestionSet},
    server_messages::{encode_response, send_message},
    storage::preferences::SqlitePreferences,
};
use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_util::{future, pin_mut, stream, SinkExt, StreamExt, TryStreamExt};
use log::{info, warn};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tokio::net::TcpStream;
use uuid::Uuid;

pub type SharedPreferences = Arc<Mutex<SqlitePreferences>>;

/// Everything a connection needs to open its own session.
#[derive(Clone)]
pub struct SessionContext {
    pub questions: Arc<QuestionSet>,
    pub preferences: SharedPreferences,
    pub settings: Arc<Settings>,
}

/// Builds a controller wired to the given channels and starts its session.
pub fn open_session(
    context: &SessionContext,
    notification_tx: UnboundedSender<Notification>,
    sound_tx: UnboundedSender<SoundRequest>,
) -> Result<RoundController> {
    let mut sound_board = SoundBoard::new(context.settings.sounds.clone(), sound_tx);
    sound_board.play_startup(context.settings.startup_track.as_deref());

    let mut controller = RoundController::new(
        Box::new(context.preferences.clone()),
        Box::new(sound_board),
        context.settings.resolution_delay(),
    );
    controller.add_listener(Box::new(ChannelListener::new(notification_tx)));
    controller.start_session(context.questions.clone(), random_seed())?;
    Ok(controller)
}

pub async fn handle_connection(context: SessionContext, raw_stream: TcpStream, addr: SocketAddr) {
    info!("Incoming TCP connection from: {}", &addr);

    let ws_stream = match tokio_tungstenite::accept_async(raw_stream).await {
        Ok(stream) => stream,
        Err(error) => {
            warn!("Handshake with {} error: {}", addr, error);
            return;
        }
    };
    info!("WebSocket connection established: {}", &addr);

    let connection_id = Uuid::new_v4().to_string();
    let (tx, rx) = unbounded();
    let (notification_tx, notification_rx) = unbounded();
    let (sound_tx, sound_rx) = unbounded();
    let (command_tx, command_rx) = unbounded();

    let (mut outgoing, incoming) = ws_stream.split();

    let controller = match open_session(&context, notification_tx, sound_tx) {
        Ok(controller) => controller,
        Err(error) => {
            warn!("Session for {} could not start: {}", &connection_id, error);
            let response = Response::errorResponse {
                errorText: error.to_string(),
            };
            if let Some(message) = encode_response(&response) {
                if let Err(error) = outgoing.send(message).await {
                    warn!("Could not notify {}: {}", &addr, error);
                }
            }
            return;
        }
    };
    info!("Session {} opened for: {}", &connection_id, &addr);

    let receive_commands = incoming.try_for_each(|msg| {
        if !msg.is_text() {
            return future::ok(());
        }
        match parse_command(&msg) {
            Ok(command) => {
                if command_tx.unbounded_send(command).is_err() {
                    warn!("Session {} no longer takes commands", &connection_id);
                }
            }
            Err(error) => {
                warn!("Error parsing command!: {}", error);
                let response = Response::errorResponse {
                    errorText: error.to_string(),
                };
                send_message(response, &tx, &connection_id);
            }
        }

        future::ok(())
    });

    let responses = stream::select(
        notification_rx.map(Response::from),
        sound_rx.map(Response::from),
    )
    .filter_map(|response| future::ready(encode_response(&response)));
    let send_to_client = stream::select(responses, rx).map(Ok).forward(outgoing);

    let session = run_session(controller, command_rx, context.settings.frame_interval());

    pin_mut!(receive_commands, send_to_client, session);
    future::select(receive_commands, future::select(send_to_client, session)).await;

    info!("{} disconnected, session {} closed", &addr, &connection_id);
}
