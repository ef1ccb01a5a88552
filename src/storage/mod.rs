pub mod preferences;
pub mod question_bank;
