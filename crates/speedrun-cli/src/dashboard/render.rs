//! Terminal rendering of the dashboard

use super::view::DatasetView;
use crate::loader::LoadedDataset;
use crate::progress::format_time;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, Table};
use std::fmt::Write;

/// Width of the platform distribution bars, in characters
const BAR_WIDTH: usize = 30;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn heading(text: &str) -> String {
    format!("{}\n{}", text.cyan().bold(), "─".repeat(text.chars().count()).blue())
}

/// One row per loaded (game, category) pair
pub fn render_overview(datasets: &[LoadedDataset]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Dataset",
        "Game",
        "Category",
        "Runs",
        "Players",
        "Best",
        "Median",
        "Difficulty",
    ]);

    for dataset in datasets {
        let m = &dataset.metrics;
        table.add_row(vec![
            Cell::new(dataset.key()),
            Cell::new(&dataset.game_name),
            Cell::new(&dataset.category_name),
            Cell::new(m.total_runs).set_alignment(CellAlignment::Right),
            Cell::new(m.unique_players).set_alignment(CellAlignment::Right),
            Cell::new(format_time(m.best_time)).set_alignment(CellAlignment::Right),
            Cell::new(format_time(m.median_time)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", m.difficulty_score)).set_alignment(CellAlignment::Right),
        ]);
    }

    format!("{}\n{}\n", heading("Overview"), table)
}

/// Full detail section for one dataset
pub fn render_dataset(view: &DatasetView<'_>) -> String {
    let dataset = view.dataset;
    let m = &dataset.metrics;
    let mut out = String::new();

    let title = format!("{} / {}", dataset.game_name, dataset.category_name);
    let _ = writeln!(out, "\n{}", heading(&title));

    let mut cards = new_table();
    cards.set_header(vec!["Best time", "Unique players", "Average time", "Difficulty"]);
    cards.add_row(vec![
        format_time(m.best_time),
        m.unique_players.to_string(),
        format_time(m.avg_time),
        format!("{:.1}/100", m.difficulty_score),
    ]);
    let _ = writeln!(out, "{}", cards);
    let _ = writeln!(
        out,
        "Runs/month: {:.1}  Trend: {:+.2} runs/month  Monthly growth: {:+.1}%  Std dev: {}",
        m.runs_per_month,
        m.trend_coefficient,
        m.monthly_growth,
        format_time(m.std_time)
    );

    let _ = writeln!(out, "\n{}", "Platforms".bold());
    let max_count = view.platforms.first().map(|p| p.count).unwrap_or(0);
    let name_width = view
        .platforms
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    for share in &view.platforms {
        let _ = writeln!(
            out,
            "  {:<width$}  {:<bar$}  {:>5} ({:.1}%)",
            share.name,
            bar(share.count, max_count, BAR_WIDTH),
            share.count,
            share.percentage,
            width = name_width,
            bar = BAR_WIDTH
        );
    }

    let _ = writeln!(
        out,
        "\n{} emulator {} ({:.1}%), original hardware {}",
        "Hardware:".bold(),
        view.emulator.emulator,
        m.emulator_percentage,
        view.emulator.original
    );

    if !view.yearly.is_empty() {
        let mut yearly = new_table();
        yearly.set_header(vec!["Year", "Mean time"]);
        for (year, mean) in &view.yearly {
            yearly.add_row(vec![year.to_string(), format_time(*mean)]);
        }
        let _ = writeln!(out, "\n{}\n{}", "Yearly trend".bold(), yearly);
    }

    if !view.top_players.is_empty() {
        let mut players = new_table();
        players.set_header(vec!["#", "Player", "Runs"]);
        for (rank, (player, runs)) in view.top_players.iter().enumerate() {
            players.add_row(vec![(rank + 1).to_string(), player.clone(), runs.to_string()]);
        }
        let _ = writeln!(out, "\n{}\n{}", "Most active players".bold(), players);
    }

    let mut records = new_table();
    records.set_header(vec!["Date", "Time", "Player", "Platform", "Emulator", "Verified"]);
    for record in view.records {
        records.add_row(vec![
            record.date.to_string(),
            format_time(record.time_seconds),
            record.player.clone(),
            record.platform.clone(),
            yes_no(record.emulator).to_string(),
            yes_no(record.verified).to_string(),
        ]);
    }
    let _ = writeln!(
        out,
        "\n{}\n{}",
        format!("Records (first {} of {})", view.records.len(), dataset.records.len()).bold(),
        records
    );

    out
}

/// Horizontal bar of `count` relative to `max`, at most `width` characters
fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.clamp(usize::from(count > 0), width))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dashboard::view::tests::{dataset, record};

    #[test]
    fn test_bar() {
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(5, 10, 4), "██");
        assert_eq!(bar(1, 1000, 4), "█");
        assert_eq!(bar(0, 10, 4), "");
        assert_eq!(bar(3, 0, 4), "");
    }

    #[test]
    fn test_render_overview() {
        let datasets = vec![dataset(
            "o1y9wo6q",
            "wkpoo02r",
            vec![record(1, 2020, "PC", false), record(2, 2021, "Wii", true)],
        )];
        let out = render_overview(&datasets);
        assert!(out.contains("Overview"));
        assert!(out.contains("o1y9wo6q_wkpoo02r"));
        assert!(out.contains("1:41.000"));
    }

    #[test]
    fn test_render_dataset_sections() {
        let data = dataset(
            "g",
            "c",
            vec![
                record(1, 2020, "PC", false),
                record(2, 2020, "PC", true),
                record(3, 2021, "Wii", false),
            ],
        );
        let view = DatasetView::build(&data, 5);
        let out = render_dataset(&view);

        assert!(out.contains("Platforms"));
        assert!(out.contains("Yearly trend"));
        assert!(out.contains("Most active players"));
        assert!(out.contains("Records (first 3 of 3)"));
        assert!(out.contains("/100"));
        assert!(out.contains("original hardware 2"));
    }
}
