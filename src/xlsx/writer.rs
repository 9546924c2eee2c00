use crate::error::Result;
use crate::model::GameResult;
use crate::openings::Palette;
use crate::report::{CategoryCount, FirstMoveCount, PerformanceRow};
use rust_xlsxwriter::{
    Chart, ChartFormat, ChartLegendPosition, ChartLine, ChartPoint, ChartSolidFill, ChartType,
    Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::Path;

const FIRST_MOVES_SHEET: &str = "First Moves";
const CATEGORIES_SHEET: &str = "Opening Categories";
const PERFORMANCE_SHEET: &str = "Opening Performance";

/// Write the three report views to an Excel workbook: one worksheet per
/// view, each with its data table and an embedded chart coloured from
/// the palette.
pub fn write_report_to_xlsx(
    first_moves: &[FirstMoveCount],
    categories: &[CategoryCount],
    performance: &[PerformanceRow],
    palette: &Palette,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_first_moves_sheet(sheet, first_moves, palette)?;

    let sheet = workbook.add_worksheet();
    write_categories_sheet(sheet, categories, palette)?;

    let sheet = workbook.add_worksheet();
    write_performance_sheet(sheet, performance, palette)?;

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// One solid-fill chart point per data row, coloured by first move.
fn first_move_points(first_moves: &[&str], palette: &Palette) -> Result<Vec<ChartPoint>> {
    let mut points = Vec::with_capacity(first_moves.len());
    for first_move in first_moves {
        let colour = palette.first_move_rgb(first_move)?;
        points.push(ChartPoint::new().set_format(
            ChartFormat::new().set_solid_fill(ChartSolidFill::new().set_color(Color::RGB(colour))),
        ));
    }
    Ok(points)
}

fn write_first_moves_sheet(
    sheet: &mut Worksheet,
    counts: &[FirstMoveCount],
    palette: &Palette,
) -> Result<()> {
    sheet.set_name(FIRST_MOVES_SHEET)?;

    sheet.set_column_width(0, 12)?; // First move
    sheet.set_column_width(1, 8)?; // Games

    let header_format = header_format();
    let center_format = Format::new().set_align(FormatAlign::Center);

    sheet.write_string_with_format(0, 0, "First move", &header_format)?;
    sheet.write_string_with_format(0, 1, "Games", &header_format)?;

    for (row_idx, count) in counts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string_with_format(row, 0, &count.first_move, &center_format)?;
        sheet.write_number_with_format(row, 1, count.games as f64, &center_format)?;
    }

    if !counts.is_empty() {
        let moves: Vec<&str> = counts.iter().map(|c| c.first_move.as_str()).collect();
        let points = first_move_points(&moves, palette)?;
        let last_row = counts.len() as u32;

        let mut chart = Chart::new(ChartType::Column);
        chart
            .add_series()
            .set_categories((FIRST_MOVES_SHEET, 1, 0, last_row, 0))
            .set_values((FIRST_MOVES_SHEET, 1, 1, last_row, 1))
            .set_points(&points);
        chart.title().set_name("First moves by frequency");
        chart.x_axis().set_name("First move");
        chart.y_axis().set_name("Frequency");
        chart.legend().set_hidden();

        sheet.insert_chart(1, 3, &chart)?;
    }

    Ok(())
}

fn write_categories_sheet(
    sheet: &mut Worksheet,
    counts: &[CategoryCount],
    palette: &Palette,
) -> Result<()> {
    sheet.set_name(CATEGORIES_SHEET)?;

    sheet.set_column_width(0, 28)?; // Opening category
    sheet.set_column_width(1, 10)?; // First move
    sheet.set_column_width(2, 8)?; // Games

    let header_format = header_format();
    let left_format = Format::new().set_align(FormatAlign::Left);
    let center_format = Format::new().set_align(FormatAlign::Center);

    sheet.write_string_with_format(0, 0, "Opening category", &header_format)?;
    sheet.write_string_with_format(0, 1, "First move", &header_format)?;
    sheet.write_string_with_format(0, 2, "Games", &header_format)?;

    for (row_idx, count) in counts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string_with_format(row, 0, &count.category, &left_format)?;
        sheet.write_string_with_format(row, 1, count.first_move, &center_format)?;
        sheet.write_number_with_format(row, 2, count.games as f64, &center_format)?;
    }

    if !counts.is_empty() {
        let moves: Vec<&str> = counts.iter().map(|c| c.first_move).collect();
        let points = first_move_points(&moves, palette)?;
        let last_row = counts.len() as u32;

        let mut chart = Chart::new(ChartType::Column);
        chart
            .add_series()
            .set_categories((CATEGORIES_SHEET, 1, 0, last_row, 0))
            .set_values((CATEGORIES_SHEET, 1, 2, last_row, 2))
            .set_points(&points);
        chart
            .title()
            .set_name("Opening categories by frequency, grouped by first move");
        chart.x_axis().set_name("Opening category");
        chart.y_axis().set_name("Frequency");
        chart.legend().set_hidden();
        chart.set_width(720);
        chart.set_height(400);

        sheet.insert_chart(1, 4, &chart)?;
    }

    Ok(())
}

fn write_performance_sheet(
    sheet: &mut Worksheet,
    rows: &[PerformanceRow],
    palette: &Palette,
) -> Result<()> {
    sheet.set_name(PERFORMANCE_SHEET)?;

    sheet.set_column_width(0, 30)?; // Opening category (games)
    sheet.set_column_width(1, 8)?; // Games
    sheet.set_column_width(2, 12)?; // White win %
    sheet.set_column_width(3, 10)?; // Draw %
    sheet.set_column_width(4, 12)?; // Black win %

    let header_format = header_format();
    let left_format = Format::new().set_align(FormatAlign::Left);
    let center_format = Format::new().set_align(FormatAlign::Center);
    let pct_format = Format::new()
        .set_align(FormatAlign::Right)
        .set_num_format("0.0");

    let headers = [
        "Opening category",
        "Games",
        "White win %",
        "Draw %",
        "Black win %",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, perf) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string_with_format(row, 0, &perf.label(), &left_format)?;
        sheet.write_number_with_format(row, 1, perf.games as f64, &center_format)?;
        sheet.write_number_with_format(row, 2, perf.white_win_pct, &pct_format)?;
        sheet.write_number_with_format(row, 3, perf.draw_pct, &pct_format)?;
        sheet.write_number_with_format(row, 4, perf.black_win_pct, &pct_format)?;
    }

    if !rows.is_empty() {
        let last_row = rows.len() as u32;
        let mut chart = Chart::new(ChartType::BarStacked);

        // Outcome series stack left to right: white win, draw, black win.
        // The white fill needs a border to stay visible.
        let series = [
            ("White win", 2u16, palette.outcome_rgb(GameResult::WhiteWin)),
            ("Draw", 3, palette.outcome_rgb(GameResult::Draw)),
            ("Black win", 4, palette.outcome_rgb(GameResult::BlackWin)),
        ];
        for (name, col, colour) in series {
            chart
                .add_series()
                .set_name(name)
                .set_categories((PERFORMANCE_SHEET, 1, 0, last_row, 0))
                .set_values((PERFORMANCE_SHEET, 1, col, last_row, col))
                .set_format(
                    ChartFormat::new()
                        .set_solid_fill(ChartSolidFill::new().set_color(Color::RGB(colour)))
                        .set_border(ChartLine::new().set_color(Color::Black)),
                );
        }
        chart
            .title()
            .set_name("Opening performance (number of games)");
        chart.legend().set_position(ChartLegendPosition::Top);
        chart.set_width(720);
        chart.set_height(400);

        sheet.insert_chart(1, 6, &chart)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_points_follow_palette() {
        let palette = Palette::standard();
        let points = first_move_points(&["c4", "d4", "e4", "Nf3"], &palette).unwrap();
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn test_first_move_points_unknown_move() {
        let palette = Palette::standard();
        assert!(first_move_points(&["h4"], &palette).is_err());
    }

    #[test]
    fn test_write_report_creates_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let first_moves = vec![
            FirstMoveCount {
                first_move: "d4".to_string(),
                games: 1,
            },
            FirstMoveCount {
                first_move: "e4".to_string(),
                games: 2,
            },
        ];
        let categories = vec![
            CategoryCount {
                category: "Catalan Opening".to_string(),
                first_move: "d4",
                games: 1,
            },
            CategoryCount {
                category: "Sicilian Defense".to_string(),
                first_move: "e4",
                games: 2,
            },
        ];
        let performance = vec![
            PerformanceRow {
                category: "Total".to_string(),
                games: 3,
                white_win_pct: 66.7,
                draw_pct: 33.3,
                black_win_pct: 0.0,
            },
            PerformanceRow {
                category: "Catalan Opening".to_string(),
                games: 1,
                white_win_pct: 0.0,
                draw_pct: 100.0,
                black_win_pct: 0.0,
            },
            PerformanceRow {
                category: "Sicilian Defense".to_string(),
                games: 2,
                white_win_pct: 100.0,
                draw_pct: 0.0,
                black_win_pct: 0.0,
            },
        ];

        write_report_to_xlsx(
            &first_moves,
            &categories,
            &performance,
            &Palette::standard(),
            &path,
        )
        .unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
