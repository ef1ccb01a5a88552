use tungstenite::Message;

use crate::models::communication::Command;

pub fn parse_command(msg: &Message) -> Result<Command, serde_json::Error> {
    serde_json::from_str(&msg.to_string())
}

/// Seed for a new session taken from a fresh v4 uuid.
pub fn random_seed() -> u64 {
    let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
    high ^ low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_messages_parse_into_commands() {
        let msg = Message::Text(r#"{"restartGame":{}}"#.to_string());
        assert_eq!(parse_command(&msg).unwrap(), Command::restartGame {});
    }

    #[test]
    fn garbage_is_an_error() {
        let msg = Message::Text("hello".to_string());
        assert!(parse_command(&msg).is_err());
    }
}
