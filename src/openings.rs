use crate::error::{Result, TournamentError};
use crate::model::GameResult;
use std::collections::HashMap;

/// Curated opening taxonomy: which first move begins each opening
/// category, grouped by move.
pub const CURATED_OPENINGS: [(&str, &[&str]); 4] = [
    ("c4", &["English Opening"]),
    (
        "d4",
        &[
            "Queen's Gambit Declined",
            "Grünfeld Defense",
            "Catalan Opening",
            "Nimzo-Indian Defense",
            "Semi-Slav Defense",
            "Tarrasch Defense",
        ],
    ),
    (
        "e4",
        &[
            "Sicilian Defense",
            "Ruy Lopez",
            "Italian Game",
            "Russian Game",
            "Four Knights Game",
        ],
    ),
    ("Nf3", &["King's Indian Attack"]),
];

/// Lookup from opening category to the first move that begins it.
/// Constructed once from the curated table and passed to whatever needs
/// it; a missing category is an error, never a default.
#[derive(Debug, Clone)]
pub struct OpeningIndex {
    first_move_by_category: HashMap<&'static str, &'static str>,
}

impl OpeningIndex {
    pub fn curated() -> Self {
        let mut first_move_by_category = HashMap::new();
        for (first_move, categories) in CURATED_OPENINGS {
            for category in categories {
                first_move_by_category.insert(*category, first_move);
            }
        }
        OpeningIndex {
            first_move_by_category,
        }
    }

    pub fn first_move(&self, category: &str) -> Result<&'static str> {
        self.first_move_by_category
            .get(category)
            .copied()
            .ok_or_else(|| TournamentError::UnknownCategory {
                category: category.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.first_move_by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_move_by_category.is_empty()
    }
}

/// Chart colours: one per first move and one per outcome.
#[derive(Debug, Clone)]
pub struct Palette {
    first_move_colours: HashMap<&'static str, u32>,
}

impl Palette {
    pub fn standard() -> Self {
        let first_move_colours = HashMap::from([
            ("c4", 0x114B5F),
            ("d4", 0x317B22),
            ("e4", 0xF3A712),
            ("Nf3", 0xCC001B),
        ]);
        Palette { first_move_colours }
    }

    /// Colour for a first move. Fails when the palette has no entry,
    /// which means the colour table is stale relative to the dataset.
    pub fn first_move_rgb(&self, first_move: &str) -> Result<u32> {
        self.first_move_colours
            .get(first_move)
            .copied()
            .ok_or_else(|| TournamentError::UnknownFirstMove {
                first_move: first_move.to_string(),
            })
    }

    /// Colour for an outcome: white wins white, draws grey, black wins
    /// black.
    pub fn outcome_rgb(&self, result: GameResult) -> u32 {
        match result {
            GameResult::WhiteWin => 0xFFFFFF,
            GameResult::Draw => 0x767676,
            GameResult::BlackWin => 0x000000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_index_lookups() {
        let index = OpeningIndex::curated();
        assert_eq!(index.first_move("English Opening").unwrap(), "c4");
        assert_eq!(index.first_move("Grünfeld Defense").unwrap(), "d4");
        assert_eq!(index.first_move("Sicilian Defense").unwrap(), "e4");
        assert_eq!(index.first_move("King's Indian Attack").unwrap(), "Nf3");
    }

    #[test]
    fn test_index_covers_whole_curated_table() {
        let index = OpeningIndex::curated();
        let mut curated = 0;
        for (first_move, categories) in CURATED_OPENINGS {
            for category in categories {
                assert_eq!(index.first_move(category).unwrap(), first_move);
                curated += 1;
            }
        }
        assert_eq!(index.len(), curated);
        assert_eq!(index.len(), 13);
    }

    #[test]
    fn test_unknown_category_fails() {
        let index = OpeningIndex::curated();
        let err = index.first_move("Bongcloud Attack").unwrap_err();
        match err {
            TournamentError::UnknownCategory { category } => {
                assert_eq!(category, "Bongcloud Attack");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_palette_first_move_colours() {
        let palette = Palette::standard();
        assert_eq!(palette.first_move_rgb("c4").unwrap(), 0x114B5F);
        assert_eq!(palette.first_move_rgb("d4").unwrap(), 0x317B22);
        assert_eq!(palette.first_move_rgb("e4").unwrap(), 0xF3A712);
        assert_eq!(palette.first_move_rgb("Nf3").unwrap(), 0xCC001B);
    }

    #[test]
    fn test_palette_unknown_first_move_fails() {
        let palette = Palette::standard();
        assert!(matches!(
            palette.first_move_rgb("h4"),
            Err(TournamentError::UnknownFirstMove { .. })
        ));
    }

    #[test]
    fn test_palette_outcome_colours() {
        let palette = Palette::standard();
        assert_eq!(palette.outcome_rgb(GameResult::WhiteWin), 0xFFFFFF);
        assert_eq!(palette.outcome_rgb(GameResult::Draw), 0x767676);
        assert_eq!(palette.outcome_rgb(GameResult::BlackWin), 0x000000);
    }
}
