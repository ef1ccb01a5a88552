use futures_channel::mpsc::UnboundedSender;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const CORRECT_CUE: &str = "CorrectSFX";
pub const INCORRECT_CUE: &str = "IncorrectSFX";
pub const COUNTDOWN_CUE: &str = "CountdownSFX";

/// Fire-and-forget cue requests. Nothing waits for playback to finish.
pub trait AudioSink: Send {
    fn play(&mut self, name: &str);

    fn stop(&mut self, _name: &str) {}
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SoundParameters {
    pub volume: f32,
    pub pitch: f32,
    pub looped: bool,
}

impl Default for SoundParameters {
    fn default() -> Self {
        SoundParameters {
            volume: 1.0,
            pitch: 1.0,
            looped: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sound {
    pub name: String,
    pub clip: String,
    #[serde(default)]
    pub parameters: SoundParameters,
}

impl Sound {
    pub fn new(name: &str, clip: &str) -> Self {
        Sound {
            name: name.to_string(),
            clip: clip.to_string(),
            parameters: SoundParameters::default(),
        }
    }
}

pub fn default_sounds() -> Vec<Sound> {
    vec![
        Sound::new(CORRECT_CUE, "sounds/correct.wav"),
        Sound::new(INCORRECT_CUE, "sounds/incorrect.wav"),
        Sound {
            parameters: SoundParameters {
                volume: 0.6,
                ..SoundParameters::default()
            },
            ..Sound::new(COUNTDOWN_CUE, "sounds/countdown.wav")
        },
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub enum SoundRequest {
    Play(Sound),
    Stop(String),
}

/// Looks cues up by name and forwards the matching sound to whoever plays it.
pub struct SoundBoard {
    sounds: Vec<Sound>,
    tx: UnboundedSender<SoundRequest>,
}

impl SoundBoard {
    pub fn new(sounds: Vec<Sound>, tx: UnboundedSender<SoundRequest>) -> Self {
        SoundBoard { sounds, tx }
    }

    pub fn get_sound(&self, name: &str) -> Option<&Sound> {
        self.sounds.iter().find(|sound| sound.name == name)
    }

    pub fn play_startup(&mut self, track: Option<&str>) {
        match track {
            Some(track) if !track.is_empty() => self.play(track),
            _ => (),
        }
    }

    fn forward(&self, request: SoundRequest) {
        if self.tx.unbounded_send(request).is_err() {
            debug!("Sound receiver is gone, dropping request");
        }
    }
}

impl AudioSink for SoundBoard {
    fn play(&mut self, name: &str) {
        match self.get_sound(name) {
            Some(sound) => self.forward(SoundRequest::Play(sound.clone())),
            None => warn!("Sound by the name {} is not found!", name),
        }
    }

    fn stop(&mut self, name: &str) {
        match self.get_sound(name) {
            Some(sound) => self.forward(SoundRequest::Stop(sound.name.clone())),
            None => warn!("Sound by the name {} is not found!", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::unbounded;

    #[test]
    fn known_sounds_are_forwarded() {
        let (tx, mut rx) = unbounded();
        let mut board = SoundBoard::new(default_sounds(), tx);

        board.play(CORRECT_CUE);
        board.stop(CORRECT_CUE);

        match rx.try_next() {
            Ok(Some(SoundRequest::Play(sound))) => {
                assert_eq!(sound.name, CORRECT_CUE);
                assert_eq!(sound.clip, "sounds/correct.wav");
            }
            other => panic!("unexpected request: {:?}", other),
        }
        assert_eq!(
            rx.try_next().ok().flatten(),
            Some(SoundRequest::Stop(CORRECT_CUE.to_string()))
        );
    }

    #[test]
    fn unknown_sounds_are_skipped() {
        let (tx, mut rx) = unbounded();
        let mut board = SoundBoard::new(default_sounds(), tx);

        board.play("Fanfare");
        board.play_startup(Some(""));
        board.play_startup(None);

        assert!(rx.try_next().is_err());
    }

    #[test]
    fn startup_track_plays_when_configured() {
        let (tx, mut rx) = unbounded();
        let mut board = SoundBoard::new(default_sounds(), tx);

        board.play_startup(Some(COUNTDOWN_CUE));

        match rx.try_next() {
            Ok(Some(SoundRequest::Play(sound))) => assert_eq!(sound.parameters.volume, 0.6),
            other => panic!("unexpected request: {:?}", other),
        }
    }
}
