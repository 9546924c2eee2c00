use crate::error::{Result, TournamentError};
use crate::model::{GameRecord, TournamentDataset, TournamentShape};
use crate::pgn::visitor::{GameVisitor, RawGame};
use pgn_reader::Reader;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Rewrite `"Surname, Given"` to `"Given Surname"`. Names without a
/// `", "` separator pass through unchanged, so the rewrite is idempotent
/// for already-normalized names.
pub fn normalize_player_name(name: &str) -> String {
    lazy_static::lazy_static! {
        // Greedy: a name holding several ", " separators splits at the
        // last one. Record files list players surname-first with a single
        // comma, which is all this handles.
        static ref SURNAME_FIRST: Regex = Regex::new(r"(.+), (.+)").unwrap();
    }

    match SURNAME_FIRST.captures(name) {
        Some(caps) => {
            let normalized = format!("{} {}", &caps[2], &caps[1]);
            log::debug!("normalized player name '{}' to '{}'", name, normalized);
            normalized
        }
        None => name.to_string(),
    }
}

/// Read all games from PGN content, in file order. Games are numbered
/// from 1 in error reports.
pub fn read_pgn<R: Read>(input: R) -> Result<Vec<GameRecord>> {
    // Reader buffers internally; wrapping the input in a BufReader
    // would double-buffer.
    let mut reader = Reader::new(input);
    let mut visitor = GameVisitor::new();
    let mut games = Vec::new();

    loop {
        match reader.read_game(&mut visitor) {
            Ok(Some(())) => {
                if let Some(raw) = visitor.current_game.take() {
                    let record = into_record(raw, games.len() + 1)?;
                    games.push(record);
                }
            }
            Ok(None) => break,
            Err(e) => return Err(TournamentError::Parse(e.to_string())),
        }
    }

    Ok(games)
}

/// Read all games from a PGN file.
pub fn read_pgn_file(path: &Path) -> Result<Vec<GameRecord>> {
    let file = File::open(path)?;
    read_pgn(file)
}

/// Load a tournament record file and validate it against the expected
/// shape. No dataset is returned unless every check passes.
pub fn load_tournament(path: &Path, shape: &TournamentShape) -> Result<TournamentDataset> {
    let games = read_pgn_file(path)?;
    log::info!("loaded {} games from {}", games.len(), path.display());
    TournamentDataset::from_games(games, shape)
}

fn into_record(raw: RawGame, index: usize) -> Result<GameRecord> {
    for (value, tag) in [
        (&raw.white, "White"),
        (&raw.black, "Black"),
        (&raw.result, "Result"),
        (&raw.opening, "Opening"),
    ] {
        if value.is_empty() {
            return Err(TournamentError::MissingTag { index, tag });
        }
    }

    if raw.moves.is_empty() {
        return Err(TournamentError::NoMoves { index });
    }

    Ok(GameRecord {
        white: normalize_player_name(&raw.white),
        black: normalize_player_name(&raw.black),
        result: raw.result,
        moves: raw.moves,
        opening: raw.opening,
    })
}
