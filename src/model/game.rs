use std::fmt;

/// Side of the board a participant played in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    White,
    Black,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    WhiteWin,
    Draw,
    BlackWin,
}

impl GameResult {
    /// Parse a result token. Only the three decided tokens are recognized;
    /// anything else (including the unfinished marker `*`) is rejected.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "1-0" => Some(GameResult::WhiteWin),
            "1/2-1/2" => Some(GameResult::Draw),
            "0-1" => Some(GameResult::BlackWin),
            _ => None,
        }
    }

    pub fn to_token(&self) -> &'static str {
        match self {
            GameResult::WhiteWin => "1-0",
            GameResult::Draw => "1/2-1/2",
            GameResult::BlackWin => "0-1",
        }
    }

    /// Result from White's perspective: +1 win, 0 draw, -1 loss.
    pub fn signed(&self) -> i8 {
        match self {
            GameResult::WhiteWin => 1,
            GameResult::Draw => 0,
            GameResult::BlackWin => -1,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_token())
    }
}

/// One played game as loaded from the record file.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// Raw result token as it appeared in the record.
    pub result: String,
    /// Mainline moves in standard algebraic notation, in played order.
    pub moves: Vec<String>,
    /// Opening name exactly as annotated in the record.
    pub opening: String,
}

impl GameRecord {
    pub fn first_move(&self) -> Option<&str> {
        self.moves.first().map(|m| m.as_str())
    }
}
