use crate::error::Result;
use crate::features::{FeatureRow, FeatureTable};
use crate::openings::OpeningIndex;
use std::collections::HashMap;
use std::path::Path;

/// How often one first move was played.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstMoveCount {
    pub first_move: String,
    pub games: usize,
}

/// How often one opening category was played, with the first move that
/// begins it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub first_move: &'static str,
    pub games: usize,
}

/// Win/draw/loss percentages for one opening category, or for the whole
/// tournament in the leading "Total" row.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub category: String,
    pub games: usize,
    pub white_win_pct: f64,
    pub draw_pct: f64,
    pub black_win_pct: f64,
}

impl PerformanceRow {
    /// Row label in the report artifacts: the category with its game
    /// count.
    pub fn label(&self) -> String {
        format!("{} ({})", self.category, self.games)
    }
}

/// Count first moves, ordered by move ascending (case-insensitive).
pub fn first_move_frequencies(table: &FeatureTable) -> Vec<FirstMoveCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in table.rows() {
        *counts.entry(row.first_move.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<FirstMoveCount> = counts
        .into_iter()
        .map(|(first_move, games)| FirstMoveCount {
            first_move: first_move.to_string(),
            games,
        })
        .collect();
    counts.sort_by(|a, b| {
        a.first_move
            .to_lowercase()
            .cmp(&b.first_move.to_lowercase())
            .then_with(|| a.first_move.cmp(&b.first_move))
    });
    counts
}

/// Count opening categories, grouped by their first move (ascending,
/// case-insensitive) and most frequent first within each group. Fails
/// when a category is absent from the index.
pub fn category_frequencies(
    table: &FeatureTable,
    index: &OpeningIndex,
) -> Result<Vec<CategoryCount>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in table.rows() {
        *counts.entry(row.opening_category.as_str()).or_insert(0) += 1;
    }

    let mut resolved = Vec::with_capacity(counts.len());
    for (category, games) in counts {
        let first_move = index.first_move(category)?;
        resolved.push(CategoryCount {
            category: category.to_string(),
            first_move,
            games,
        });
    }

    resolved.sort_by(|a, b| {
        a.first_move
            .to_lowercase()
            .cmp(&b.first_move.to_lowercase())
            .then_with(|| b.games.cmp(&a.games))
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(resolved)
}

/// Per-category outcome percentages, least played categories first, with
/// the tournament-wide "Total" row leading.
pub fn performance_breakdown(table: &FeatureTable) -> Vec<PerformanceRow> {
    let mut tallies: HashMap<&str, OutcomeTally> = HashMap::new();
    let mut overall = OutcomeTally::default();

    for row in table.rows() {
        tallies
            .entry(row.opening_category.as_str())
            .or_default()
            .add(row);
        overall.add(row);
    }

    let mut rows: Vec<PerformanceRow> = tallies
        .into_iter()
        .map(|(category, tally)| tally.into_row(category.to_string()))
        .collect();
    rows.sort_by(|a, b| a.games.cmp(&b.games).then_with(|| a.category.cmp(&b.category)));
    rows.insert(0, overall.into_row("Total".to_string()));
    rows
}

#[derive(Debug, Default, Clone, Copy)]
struct OutcomeTally {
    white_wins: usize,
    draws: usize,
    black_wins: usize,
}

impl OutcomeTally {
    fn add(&mut self, row: &FeatureRow) {
        self.white_wins += row.white_win as usize;
        self.draws += row.draw as usize;
        self.black_wins += row.black_win as usize;
    }

    fn total(&self) -> usize {
        self.white_wins + self.draws + self.black_wins
    }

    fn into_row(self, category: String) -> PerformanceRow {
        let total = self.total();
        PerformanceRow {
            category,
            games: total,
            white_win_pct: percent(self.white_wins, total),
            draw_pct: percent(self.draws, total),
            black_win_pct: percent(self.black_wins, total),
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

pub fn print_first_moves(counts: &[FirstMoveCount]) {
    println!("\n{:=^40}", " First moves by frequency ");
    println!("{:<16} {:>8}", "First move", "Games");
    println!("{:-<40}", "");
    for count in counts {
        println!("{:<16} {:>8}", count.first_move, count.games);
    }
    let total: usize = counts.iter().map(|c| c.games).sum();
    println!("{:-<40}", "");
    println!("{:<16} {:>8}", "Total", total);
}

pub fn print_categories(counts: &[CategoryCount]) {
    println!("\n{:=^60}", " Opening categories by frequency ");
    println!("{:<36} {:<12} {:>8}", "Opening category", "First move", "Games");
    println!("{:-<60}", "");
    for count in counts {
        println!(
            "{:<36} {:<12} {:>8}",
            count.category, count.first_move, count.games
        );
    }
}

pub fn print_performance(rows: &[PerformanceRow]) {
    println!("\n{:=^80}", " Opening performance ");
    println!(
        "{:<36} {:>8} {:>10} {:>10} {:>10}",
        "Opening category", "Games", "White win", "Draw", "Black win"
    );
    println!("{:-<80}", "");
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:<36} {:>8} {:>9.1}% {:>9.1}% {:>9.1}%",
            row.category, row.games, row.white_win_pct, row.draw_pct, row.black_win_pct
        );
        // The Total row leads; a rule separates it from the categories.
        if i == 0 {
            println!("{:-<80}", "");
        }
    }
}

pub fn write_first_moves_csv(counts: &[FirstMoveCount], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["first_move", "games"])?;
    for count in counts {
        writer.write_record([count.first_move.as_str(), &count.games.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_categories_csv(counts: &[CategoryCount], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["opening_category", "first_move", "games"])?;
    for count in counts {
        writer.write_record([
            count.category.as_str(),
            count.first_move,
            &count.games.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_performance_csv(rows: &[PerformanceRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "opening_category",
        "games",
        "white_win_percent",
        "draw_percent",
        "black_win_percent",
    ])?;
    for row in rows {
        writer.write_record([
            row.category.as_str(),
            &row.games.to_string(),
            &format!("{:.2}", row.white_win_pct),
            &format!("{:.2}", row.draw_pct),
            &format!("{:.2}", row.black_win_pct),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TournamentError;
    use crate::model::{GameRecord, TournamentDataset, TournamentShape};

    /// Build a table from (result, first move, opening) triples. Colours
    /// alternate between two players so an even number of games passes
    /// shape validation.
    fn table(specs: &[(&str, &str, &str)]) -> FeatureTable {
        assert!(specs.len() % 2 == 0, "need an even number of games");
        let games: Vec<GameRecord> = specs
            .iter()
            .enumerate()
            .map(|(i, (result, first, opening))| {
                let (white, black) = if i % 2 == 0 {
                    ("Anna", "Boris")
                } else {
                    ("Boris", "Anna")
                };
                GameRecord {
                    white: white.to_string(),
                    black: black.to_string(),
                    result: result.to_string(),
                    moves: vec![first.to_string()],
                    opening: opening.to_string(),
                }
            })
            .collect();
        let shape = TournamentShape {
            players: 2,
            games_per_colour: specs.len() / 2,
        };
        let dataset = TournamentDataset::from_games(games, &shape).unwrap();
        FeatureTable::build(&dataset).unwrap()
    }

    fn six_game_table() -> FeatureTable {
        table(&[
            ("1-0", "e4", "Sicilian Defense: Najdorf Variation"),
            ("1-0", "e4", "Sicilian Defense: Dragon Variation"),
            ("0-1", "e4", "Italian Game"),
            ("1/2-1/2", "d4", "Catalan Opening: Open Defense"),
            ("1/2-1/2", "d4", "Catalan Opening: Closed"),
            ("1-0", "c4", "English Opening"),
        ])
    }

    #[test]
    fn test_first_move_frequencies_sorted_by_move() {
        let counts = first_move_frequencies(&six_game_table());
        let moves: Vec<&str> = counts.iter().map(|c| c.first_move.as_str()).collect();
        assert_eq!(moves, vec!["c4", "d4", "e4"]);
        assert_eq!(counts[2].games, 3);
        let total: usize = counts.iter().map(|c| c.games).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_first_move_frequencies_nf3_sorts_after_e4() {
        let counts = first_move_frequencies(&table(&[
            ("1-0", "Nf3", "King's Indian Attack"),
            ("0-1", "e4", "Ruy Lopez"),
        ]));
        let moves: Vec<&str> = counts.iter().map(|c| c.first_move.as_str()).collect();
        assert_eq!(moves, vec!["e4", "Nf3"]);
    }

    #[test]
    fn test_category_frequencies_grouped_and_ranked() {
        let index = OpeningIndex::curated();
        let counts = category_frequencies(&six_game_table(), &index).unwrap();
        let categories: Vec<&str> = counts.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            categories,
            vec![
                "English Opening",
                "Catalan Opening",
                "Sicilian Defense",
                "Italian Game",
            ]
        );
        assert_eq!(counts[1].first_move, "d4");
        assert_eq!(counts[1].games, 2);
        // Within e4, the more frequent Sicilian leads the Italian.
        assert_eq!(counts[2].games, 2);
        assert_eq!(counts[3].games, 1);
    }

    #[test]
    fn test_category_frequencies_unknown_category_fails() {
        let index = OpeningIndex::curated();
        let bad = table(&[
            ("1-0", "b3", "Nimzo-Larsen Attack"),
            ("0-1", "e4", "Ruy Lopez"),
        ]);
        let err = category_frequencies(&bad, &index).unwrap_err();
        assert!(matches!(
            err,
            TournamentError::UnknownCategory { category } if category == "Nimzo-Larsen Attack"
        ));
    }

    #[test]
    fn test_performance_breakdown_total_row_leads() {
        let rows = performance_breakdown(&six_game_table());
        assert_eq!(rows[0].category, "Total");
        assert_eq!(rows[0].games, 6);
        assert!((rows[0].white_win_pct - 50.0).abs() < 1e-9);
        assert!((rows[0].draw_pct - 100.0 / 3.0).abs() < 1e-9);
        assert!((rows[0].black_win_pct - 100.0 / 6.0).abs() < 1e-9);
        assert_eq!(rows[0].label(), "Total (6)");
    }

    #[test]
    fn test_performance_breakdown_sorted_by_ascending_count() {
        let rows = performance_breakdown(&six_game_table());
        let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        // Ties in count break alphabetically.
        assert_eq!(
            categories,
            vec![
                "Total",
                "English Opening",
                "Italian Game",
                "Catalan Opening",
                "Sicilian Defense",
            ]
        );
    }

    #[test]
    fn test_performance_percentages_per_category() {
        let rows = performance_breakdown(&six_game_table());
        let sicilian = rows
            .iter()
            .find(|r| r.category == "Sicilian Defense")
            .unwrap();
        assert_eq!(sicilian.games, 2);
        assert!((sicilian.white_win_pct - 100.0).abs() < 1e-9);
        assert!((sicilian.draw_pct - 0.0).abs() < 1e-9);
        assert_eq!(sicilian.label(), "Sicilian Defense (2)");

        let catalan = rows.iter().find(|r| r.category == "Catalan Opening").unwrap();
        assert!((catalan.draw_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_performance_empty_table_has_zero_total() {
        let empty = TournamentDataset::from_games(
            Vec::new(),
            &TournamentShape {
                players: 0,
                games_per_colour: 0,
            },
        )
        .unwrap();
        let rows = performance_breakdown(&FeatureTable::build(&empty).unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].games, 0);
        assert_eq!(rows[0].white_win_pct, 0.0);
    }
}
