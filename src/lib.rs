pub mod error;
pub mod features;
pub mod model;
pub mod openings;
pub mod pgn;
pub mod report;
pub mod xlsx;

pub use error::{Result, TournamentError};
pub use model::*;
