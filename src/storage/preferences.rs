use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{QuizError, Result};

pub const HIGH_SCORE_KEY: &str = "Game_Highscore_Value";

/// Integer key-value store. A key that was never written reads as 0.
pub trait Preferences: Send {
    fn get_int(&mut self, key: &str) -> Result<i32>;

    fn set_int(&mut self, key: &str, value: i32) -> Result<()>;
}

pub struct SqlitePreferences {
    connection: Connection,
}

impl SqlitePreferences {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path.as_ref())?;
        info!("Preferences opened at: {}", path.as_ref().display());
        Self::with_connection(connection)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key   TEXT PRIMARY KEY,
                value INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(SqlitePreferences { connection })
    }
}

impl Preferences for SqlitePreferences {
    fn get_int(&mut self, key: &str) -> Result<i32> {
        let value: Option<i32> = self
            .connection
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.unwrap_or(0))
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.connection.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Default, Debug, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, i32>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_int(&mut self, key: &str) -> Result<i32> {
        Ok(self.values.get(key).copied().unwrap_or(0))
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// One store shared between every session of the server.
impl<P: Preferences> Preferences for Arc<Mutex<P>> {
    fn get_int(&mut self, key: &str) -> Result<i32> {
        self.lock()
            .map_err(|_| QuizError::Poisoned("preferences"))?
            .get_int(key)
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.lock()
            .map_err(|_| QuizError::Poisoned("preferences"))?
            .set_int(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_missing_key_reads_zero() {
        let mut prefs = SqlitePreferences::open_in_memory().unwrap();
        assert_eq!(prefs.get_int(HIGH_SCORE_KEY).unwrap(), 0);
    }

    #[test]
    fn sqlite_overwrites_existing_value() {
        let mut prefs = SqlitePreferences::open_in_memory().unwrap();
        prefs.set_int(HIGH_SCORE_KEY, 30).unwrap();
        prefs.set_int(HIGH_SCORE_KEY, 45).unwrap();
        assert_eq!(prefs.get_int(HIGH_SCORE_KEY).unwrap(), 45);
    }

    #[test]
    fn sqlite_values_survive_reopening() {
        let path = std::env::temp_dir().join(format!("{}.db", uuid::Uuid::new_v4()));
        {
            let mut prefs = SqlitePreferences::open(&path).unwrap();
            prefs.set_int(HIGH_SCORE_KEY, 12).unwrap();
        }
        let mut prefs = SqlitePreferences::open(&path).unwrap();
        assert_eq!(prefs.get_int(HIGH_SCORE_KEY).unwrap(), 12);
        drop(prefs);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn shared_store_sees_writes_from_clones() {
        let shared = Arc::new(Mutex::new(MemoryPreferences::new()));
        let mut first = shared.clone();
        let mut second = shared.clone();
        first.set_int(HIGH_SCORE_KEY, 7).unwrap();
        assert_eq!(second.get_int(HIGH_SCORE_KEY).unwrap(), 7);
    }
}
