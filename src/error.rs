use std::fmt;

/// Errors produced by the typed parsers of the theory engine.
///
/// The lenient, string-keyed operations never surface these; they report a
/// warning through [`crate::diagnostics::Diagnostics`] and fall back instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    UnknownScale(String),
    UnknownChord(String),
    UnknownProgression(String),
    InvalidNoteName(String),
    Config(String),
}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TheoryError::UnknownScale(key) => write!(f, "Unknown scale '{key}'"),
            TheoryError::UnknownChord(key) => write!(f, "Unknown chord '{key}'"),
            TheoryError::UnknownProgression(key) => write!(f, "Unknown progression '{key}'"),
            TheoryError::InvalidNoteName(name) => write!(f, "Invalid note name '{name}'"),
            TheoryError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for TheoryError {}

impl From<serde_json::Error> for TheoryError {
    fn from(e: serde_json::Error) -> Self {
        TheoryError::Config(e.to_string())
    }
}
