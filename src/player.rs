// src/player.rs

use crate::constants::{
    PREFERENCES_TABLE, PREFERENCE_AVATAR, PREFERENCE_FIRST_NAME, PREFERENCE_LAST_INITIAL,
};
use crate::errors::{QuizError, QuizResult};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Avatar {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Avatar {
    pub const ALL: [Avatar; 16] = [
        Avatar::One,
        Avatar::Two,
        Avatar::Three,
        Avatar::Four,
        Avatar::Five,
        Avatar::Six,
        Avatar::Seven,
        Avatar::Eight,
        Avatar::Nine,
        Avatar::Ten,
        Avatar::Eleven,
        Avatar::Twelve,
        Avatar::Thirteen,
        Avatar::Fourteen,
        Avatar::Fifteen,
        Avatar::Sixteen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Avatar::One => "ONE",
            Avatar::Two => "TWO",
            Avatar::Three => "THREE",
            Avatar::Four => "FOUR",
            Avatar::Five => "FIVE",
            Avatar::Six => "SIX",
            Avatar::Seven => "SEVEN",
            Avatar::Eight => "EIGHT",
            Avatar::Nine => "NINE",
            Avatar::Ten => "TEN",
            Avatar::Eleven => "ELEVEN",
            Avatar::Twelve => "TWELVE",
            Avatar::Thirteen => "THIRTEEN",
            Avatar::Fourteen => "FOURTEEN",
            Avatar::Fifteen => "FIFTEEN",
            Avatar::Sixteen => "SIXTEEN",
        }
    }
}

impl FromStr for Avatar {
    type Err = QuizError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Avatar::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| QuizError::Validation(format!("Avatar '{}' does not exist", s)))
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub first_name: String,
    pub last_initial: String,
    pub avatar: Avatar,
}

impl Player {
    pub fn new(first_name: &str, last_initial: &str, avatar: Avatar) -> QuizResult<Self> {
        if !is_input_data_valid(first_name, last_initial) {
            return Err(QuizError::Validation(
                "First name and last initial must not be empty".into(),
            ));
        }
        Ok(Player {
            first_name: first_name.to_string(),
            last_initial: last_initial.to_string(),
            avatar,
        })
    }
}

// --- Preference Store ---

/// Opaque key-value store holding the signed-in player.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> QuizResult<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> QuizResult<()>;
    fn remove(&mut self, key: &str) -> QuizResult<()>;

    fn contains(&self, key: &str) -> QuizResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> QuizResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> QuizResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> QuizResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Preferences kept in their own table next to the progress data.
pub struct SqlitePreferences {
    conn: Connection,
}

impl SqlitePreferences {
    pub fn open(conn: Connection) -> QuizResult<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
            PREFERENCES_TABLE
        ))?;
        Ok(SqlitePreferences { conn })
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> QuizResult<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT value FROM {} WHERE key = ?", PREFERENCES_TABLE),
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &str) -> QuizResult<()> {
        self.conn.execute(
            &format!(
                "INSERT OR REPLACE INTO {} (key, value) VALUES (?, ?)",
                PREFERENCES_TABLE
            ),
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> QuizResult<()> {
        self.conn.execute(
            &format!("DELETE FROM {} WHERE key = ?", PREFERENCES_TABLE),
            [key],
        )?;
        Ok(())
    }
}

// --- Player Helpers ---

pub fn write_player<P: PreferenceStore + ?Sized>(prefs: &mut P, player: &Player) -> QuizResult<()> {
    prefs.put(PREFERENCE_FIRST_NAME, &player.first_name)?;
    prefs.put(PREFERENCE_LAST_INITIAL, &player.last_initial)?;
    prefs.put(PREFERENCE_AVATAR, player.avatar.as_str())?;
    info!(
        "Signed in {} {}. with avatar {}",
        player.first_name, player.last_initial, player.avatar
    );
    Ok(())
}

/// The stored player, or `None` if any part is missing or unreadable.
pub fn read_player<P: PreferenceStore + ?Sized>(prefs: &P) -> QuizResult<Option<Player>> {
    let first_name = prefs.get(PREFERENCE_FIRST_NAME)?;
    let last_initial = prefs.get(PREFERENCE_LAST_INITIAL)?;
    let avatar = prefs
        .get(PREFERENCE_AVATAR)?
        .and_then(|a| match a.parse::<Avatar>() {
            Ok(avatar) => Some(avatar),
            Err(e) => {
                debug!("Ignoring stored avatar: {}", e);
                None
            }
        });

    Ok(match (first_name, last_initial, avatar) {
        (Some(first_name), Some(last_initial), Some(avatar)) => Some(Player {
            first_name,
            last_initial,
            avatar,
        }),
        _ => None,
    })
}

pub fn sign_out<P: PreferenceStore + ?Sized>(prefs: &mut P) -> QuizResult<()> {
    prefs.remove(PREFERENCE_FIRST_NAME)?;
    prefs.remove(PREFERENCE_LAST_INITIAL)?;
    prefs.remove(PREFERENCE_AVATAR)?;
    info!("Player signed out");
    Ok(())
}

pub fn is_signed_in<P: PreferenceStore + ?Sized>(prefs: &P) -> QuizResult<bool> {
    Ok(prefs.contains(PREFERENCE_FIRST_NAME)?
        && prefs.contains(PREFERENCE_LAST_INITIAL)?
        && prefs.contains(PREFERENCE_AVATAR)?)
}

pub fn is_input_data_valid(first_name: &str, last_initial: &str) -> bool {
    !first_name.is_empty() && !last_initial.is_empty()
}
