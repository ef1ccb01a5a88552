use std::{fs, path::Path, time::Duration};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    audio::{default_sounds, Sound},
    controller::round_controller::DEFAULT_RESOLUTION_DELAY,
    error::Result,
    storage::question_bank::QUESTION_BANK_FILE,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub listen_address: String,
    pub question_bank_path: String,
    pub preferences_path: String,
    pub log_dir: String,
    pub resolution_delay_ms: u64,
    /// How often a session wakes up to move its timers without input.
    pub frame_interval_ms: u64,
    pub startup_track: Option<String>,
    pub sounds: Vec<Sound>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_address: "127.0.0.1:9001".to_string(),
            question_bank_path: QUESTION_BANK_FILE.to_string(),
            preferences_path: "preferences.db".to_string(),
            log_dir: "log".to_string(),
            resolution_delay_ms: DEFAULT_RESOLUTION_DELAY.as_millis() as u64,
            frame_interval_ms: 50,
            startup_track: None,
            sounds: default_sounds(),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. Without a file every default applies.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        info!("Config loaded from: {}", path.display());
        Ok(settings)
    }

    pub fn resolution_delay(&self) -> Duration {
        Duration::from_millis(self.resolution_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}
