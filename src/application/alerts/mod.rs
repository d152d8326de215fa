pub mod matching;
pub mod preferences;
