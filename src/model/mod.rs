pub mod game;
pub mod tournament;

pub use game::{Colour, GameRecord, GameResult};
pub use tournament::{TournamentDataset, TournamentShape};
