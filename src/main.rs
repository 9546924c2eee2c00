use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tournament_openings::features::{opening_category, FeatureTable};
use tournament_openings::openings::{OpeningIndex, Palette};
use tournament_openings::pgn;
use tournament_openings::report::{
    category_frequencies, first_move_frequencies, performance_breakdown, print_categories,
    print_first_moves, print_performance, write_categories_csv, write_first_moves_csv,
    write_performance_csv,
};
use tournament_openings::xlsx;
use tournament_openings::TournamentShape;

#[derive(Parser)]
#[command(name = "tournament-openings")]
#[command(about = "Load tournament chess records and report opening statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the opening reports, optionally writing an Excel workbook
    Report {
        /// Input PGN file
        input: PathBuf,

        /// Output Excel file with the report charts
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the per-game feature table as CSV
    Export {
        /// Input PGN file
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Directory for the per-view summary CSVs
        #[arg(long)]
        summary_dir: Option<PathBuf>,
    },

    /// Display information about a record file without shape checks
    Info {
        /// Input file to inspect
        input: PathBuf,
    },

    /// Validate a record file against the expected tournament shape
    Validate {
        /// Input file to validate
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { input, output } => {
            report(&input, output.as_ref())?;
        }
        Commands::Export { input, output, summary_dir } => {
            export(&input, &output, summary_dir.as_ref())?;
        }
        Commands::Info { input } => {
            info(&input)?;
        }
        Commands::Validate { input } => {
            validate(&input)?;
        }
    }

    Ok(())
}

fn report(input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    println!("Reading PGN file: {}", input.display());
    let dataset = pgn::load_tournament(input, &TournamentShape::default())
        .context("Failed to load tournament")?;
    println!(
        "Found {} games between {} participants",
        dataset.len(),
        dataset.participants().len()
    );

    let table = FeatureTable::build(&dataset).context("Failed to derive feature table")?;
    let index = OpeningIndex::curated();
    let palette = Palette::standard();

    let first_moves = first_move_frequencies(&table);
    let categories = category_frequencies(&table, &index)
        .context("Opening category missing from the curated index")?;
    let performance = performance_breakdown(&table);

    print_first_moves(&first_moves);
    print_categories(&categories);
    print_performance(&performance);

    if let Some(output) = output {
        println!("\nWriting Excel report: {}", output.display());
        xlsx::write_report_to_xlsx(&first_moves, &categories, &performance, &palette, output)
            .context("Failed to write Excel report")?;
        println!("Done!");
    }

    Ok(())
}

fn export(input: &PathBuf, output: &PathBuf, summary_dir: Option<&PathBuf>) -> Result<()> {
    println!("Reading PGN file: {}", input.display());
    let dataset = pgn::load_tournament(input, &TournamentShape::default())
        .context("Failed to load tournament")?;
    println!("Found {} games", dataset.len());

    let table = FeatureTable::build(&dataset).context("Failed to derive feature table")?;

    // Summary views are resolved before any file is written; a failed
    // lookup leaves no artifacts behind.
    let summaries = match summary_dir {
        Some(dir) => {
            let index = OpeningIndex::curated();
            let first_moves = first_move_frequencies(&table);
            let categories = category_frequencies(&table, &index)
                .context("Opening category missing from the curated index")?;
            let performance = performance_breakdown(&table);
            Some((dir, first_moves, categories, performance))
        }
        None => None,
    };

    println!("Writing feature table: {}", output.display());
    table
        .write_csv(output)
        .context("Failed to write feature CSV")?;

    if let Some((dir, first_moves, categories, performance)) = summaries {
        std::fs::create_dir_all(dir).context("Failed to create summary directory")?;
        write_first_moves_csv(&first_moves, &dir.join("first_moves.csv"))
            .context("Failed to write first move summary")?;
        write_categories_csv(&categories, &dir.join("opening_categories.csv"))
            .context("Failed to write category summary")?;
        write_performance_csv(&performance, &dir.join("opening_performance.csv"))
            .context("Failed to write performance summary")?;
        println!("Wrote summaries to {}", dir.display());
    }

    println!("Done!");
    Ok(())
}

fn info(input: &PathBuf) -> Result<()> {
    println!("Reading PGN file: {}", input.display());
    let games = pgn::read_pgn_file(input).context("Failed to read PGN file")?;
    println!("Found {} games", games.len());
    println!();

    let mut white_counts: HashMap<&str, usize> = HashMap::new();
    let mut black_counts: HashMap<&str, usize> = HashMap::new();
    for game in &games {
        *white_counts.entry(game.white.as_str()).or_insert(0) += 1;
        *black_counts.entry(game.black.as_str()).or_insert(0) += 1;
    }
    let mut participants: Vec<&str> = white_counts
        .keys()
        .chain(black_counts.keys())
        .copied()
        .collect();
    participants.sort_unstable();
    participants.dedup();

    println!("Participants: {}", participants.len());
    for player in &participants {
        println!(
            "  {:<24} {:>2} as White, {:>2} as Black",
            player,
            white_counts.get(player).copied().unwrap_or(0),
            black_counts.get(player).copied().unwrap_or(0),
        );
    }
    println!();

    let openings: HashSet<&str> = games.iter().map(|g| g.opening.as_str()).collect();
    let categories: HashSet<&str> = games.iter().map(|g| opening_category(&g.opening)).collect();
    let mut first_moves: Vec<&str> = games
        .iter()
        .filter_map(|g| g.first_move())
        .collect::<HashSet<&str>>()
        .into_iter()
        .collect();
    first_moves.sort_unstable();

    println!(
        "Openings: {} distinct, {} categories",
        openings.len(),
        categories.len()
    );
    println!("First moves: {:?}", first_moves);

    Ok(())
}

fn validate(input: &PathBuf) -> Result<()> {
    let shape = TournamentShape::default();
    let dataset = pgn::load_tournament(input, &shape).context("Validation failed")?;

    println!("Tournament record is valid");
    println!("  {} games", dataset.len());
    println!(
        "  {} participants, {} games as each colour:",
        dataset.participants().len(),
        shape.games_per_colour
    );
    for player in dataset.participants() {
        println!("    {}", player);
    }

    Ok(())
}
