use futures_channel::mpsc::UnboundedSender;
use log::{debug, warn};
use tungstenite::protocol::Message;

use crate::models::communication::Response;

type Tx = UnboundedSender<Message>;

pub fn encode_response(response: &Response) -> Option<Message> {
    match serde_json::to_string(response) {
        Ok(text) => Some(Message::Text(text)),
        Err(error) => {
            warn!("Could not encode response: {}", error);
            None
        }
    }
}

pub fn send_message(response: Response, tx: &Tx, id: &str) {
    let message = match encode_response(&response) {
        Some(message) => message,
        None => return,
    };
    if tx.unbounded_send(message).is_err() {
        debug!("Connection {} is closed, response dropped", id);
    }
}
