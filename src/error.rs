use crate::model::Colour;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Game {index}: missing {tag} tag")]
    MissingTag { index: usize, tag: &'static str },

    #[error("Game {index}: no moves recorded")]
    NoMoves { index: usize },

    #[error("Expected {expected} participants, found {found}")]
    ParticipantCount { expected: usize, found: usize },

    #[error("{player} appears {found} times as {colour}, expected {expected}")]
    AppearanceCount {
        player: String,
        colour: Colour,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} games, found {found}")]
    GameCount { expected: usize, found: usize },

    #[error("Game {index}: unknown result '{token}'")]
    UnknownResult { index: usize, token: String },

    #[error("No first move known for opening category '{category}'")]
    UnknownCategory { category: String },

    #[error("No colour assigned to first move '{first_move}'")]
    UnknownFirstMove { first_move: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, TournamentError>;
