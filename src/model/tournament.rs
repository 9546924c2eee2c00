use super::game::{Colour, GameRecord};
use crate::error::{Result, TournamentError};
use std::collections::HashMap;

/// Expected shape of the event: how many players take part and how many
/// games each plays with each colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentShape {
    pub players: usize,
    pub games_per_colour: usize,
}

impl Default for TournamentShape {
    /// Eight-player double round robin: everyone meets everyone once with
    /// each colour, 7 whites and 7 blacks per player, 56 games in all.
    fn default() -> Self {
        TournamentShape {
            players: 8,
            games_per_colour: 7,
        }
    }
}

impl TournamentShape {
    pub fn total_games(&self) -> usize {
        self.players * self.games_per_colour
    }
}

/// The full game sequence of one tournament, validated against the
/// expected shape. Game order matches the record file.
#[derive(Debug, Clone)]
pub struct TournamentDataset {
    games: Vec<GameRecord>,
}

impl TournamentDataset {
    /// Validate a loaded game sequence against the expected shape. On any
    /// mismatch the whole load fails; no partial dataset is returned.
    pub fn from_games(games: Vec<GameRecord>, shape: &TournamentShape) -> Result<Self> {
        validate_shape(&games, shape)?;
        Ok(TournamentDataset { games })
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct participant names, sorted.
    pub fn participants(&self) -> Vec<&str> {
        distinct_participants(&self.games)
    }
}

pub(crate) fn distinct_participants(games: &[GameRecord]) -> Vec<&str> {
    let mut names: Vec<&str> = games
        .iter()
        .flat_map(|g| [g.white.as_str(), g.black.as_str()])
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

pub(crate) fn colour_counts<'a>(
    games: &'a [GameRecord],
    colour: Colour,
) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for game in games {
        let name = match colour {
            Colour::White => game.white.as_str(),
            Colour::Black => game.black.as_str(),
        };
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
}

fn validate_shape(games: &[GameRecord], shape: &TournamentShape) -> Result<()> {
    if games.len() != shape.total_games() {
        return Err(TournamentError::GameCount {
            expected: shape.total_games(),
            found: games.len(),
        });
    }

    let participants = distinct_participants(games);
    if participants.len() != shape.players {
        return Err(TournamentError::ParticipantCount {
            expected: shape.players,
            found: participants.len(),
        });
    }

    // Participants are visited in sorted order so the first offender
    // reported is deterministic.
    for colour in [Colour::White, Colour::Black] {
        let counts = colour_counts(games, colour);
        for player in &participants {
            let found = counts.get(player).copied().unwrap_or(0);
            if found != shape.games_per_colour {
                return Err(TournamentError::AppearanceCount {
                    player: player.to_string(),
                    colour,
                    expected: shape.games_per_colour,
                    found,
                });
            }
        }
    }

    Ok(())
}
