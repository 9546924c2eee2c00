pub mod reader;
pub mod visitor;

pub use reader::load_tournament;
pub use reader::normalize_player_name;
pub use reader::read_pgn;
pub use reader::read_pgn_file;
pub use visitor::{GameVisitor, RawGame};
