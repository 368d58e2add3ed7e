// src/constants.rs

// --- Scoring ---
pub const SCORE: i32 = 8; // Awarded per correctly solved quiz
pub const NO_SCORE: i32 = 0;

// --- Storage ---
pub const DB_FILE_NAME: &str = "quiz_trainer.db";
pub const CATEGORY_TABLE: &str = "category";
pub const QUIZ_TABLE: &str = "quiz";
pub const PREFERENCES_TABLE: &str = "preferences";

// Durable flag encoding (bundled content uses "true"/"false" instead)
pub const DB_TRUE: &str = "1";
pub const DB_FALSE: &str = "0";

// --- Player Preferences ---
pub const PREFERENCE_FIRST_NAME: &str = "playerPreferences.firstName";
pub const PREFERENCE_LAST_INITIAL: &str = "playerPreferences.lastInitial";
pub const PREFERENCE_AVATAR: &str = "playerPreferences.avatar";

// --- Answer Formatting ---
pub const PAIR_SEPARATOR: &str = " <> ";

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

// --- Variant Shape Rules ---
pub const FOUR_QUARTER_OPTIONS: usize = 4;
pub const FILL_TWO_BLANKS_PARTS: usize = 2;
