use crate::error::{Result, TournamentError};
use crate::model::{GameResult, TournamentDataset};
use serde::Serialize;
use std::path::Path;

/// Derived fields for one game, keyed by position in the load order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    /// Result from White's perspective: +1 win, 0 draw, -1 loss.
    pub result: i8,
    pub white_win: u8,
    pub draw: u8,
    pub black_win: u8,
    pub first_move: String,
    /// Opening label exactly as recorded.
    pub opening: String,
    pub opening_category: String,
}

/// Opening category: the label up to its first colon, with surrounding
/// whitespace trimmed. A label without a colon is its own category.
pub fn opening_category(opening: &str) -> &str {
    match opening.split_once(':') {
        Some((head, _)) => head.trim(),
        None => opening,
    }
}

/// The per-game feature rows of one tournament, in load order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Derive one row per game. Pure and deterministic: the dataset is
    /// borrowed, and building twice yields identical tables.
    pub fn build(dataset: &TournamentDataset) -> Result<FeatureTable> {
        let mut rows = Vec::with_capacity(dataset.len());

        for (i, game) in dataset.games().iter().enumerate() {
            let result = GameResult::from_token(&game.result).ok_or_else(|| {
                TournamentError::UnknownResult {
                    index: i + 1,
                    token: game.result.clone(),
                }
            })?;
            let signed = result.signed();

            let first_move = game
                .first_move()
                .ok_or(TournamentError::NoMoves { index: i + 1 })?;

            rows.push(FeatureRow {
                result: signed,
                white_win: (signed == 1) as u8,
                draw: (signed == 0) as u8,
                black_win: (signed == -1) as u8,
                first_move: first_move.to_string(),
                opening: game.opening.clone(),
                opening_category: opening_category(&game.opening).to_string(),
            });
        }

        Ok(FeatureTable { rows })
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV, one row per game, header from the field
    /// names.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
