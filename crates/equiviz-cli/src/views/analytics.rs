//! Analytics view
//!
//! Turns a selected dataset's detail and analytics into chart-ready series:
//!
//! - a categorical distribution over equipment types
//! - the three averages, grouped once per type label (same values per group)
//! - a (flowrate, pressure) scatter, only when there are equipment records
//! - summary statistics with per-type shares
//!
//! Derivation is pure; the `display_*` functions print to the terminal.

use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use equiviz_common::types::{AnalyticsAggregate, DatasetDetail, EquipmentRecord, ParameterStats, TypeCount};
use std::str::FromStr;

const BAR_WIDTH: usize = 40;
const SCATTER_WIDTH: usize = 60;
const SCATTER_HEIGHT: usize = 16;

/// Which chart(s) to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    All,
    Distribution,
    Averages,
    Scatter,
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(ChartKind::All),
            "distribution" => Ok(ChartKind::Distribution),
            "averages" => Ok(ChartKind::Averages),
            "scatter" => Ok(ChartKind::Scatter),
            other => Err(format!(
                "unknown chart '{}' (expected all, distribution, averages or scatter)",
                other
            )),
        }
    }
}

/// One bar group of the averages comparison
#[derive(Debug, Clone, PartialEq)]
pub struct AverageGroup {
    pub label: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// One point of the correlation scatter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub flowrate: f64,
    pub pressure: f64,
}

/// Count and share of one equipment type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeShare {
    pub name: String,
    pub count: u64,
    pub percent: f64,
}

/// Headline numbers for the summary panel
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_equipment: u64,
    pub flowrate: ParameterStats,
    pub pressure: ParameterStats,
    pub temperature: ParameterStats,
    pub types: Vec<TypeShare>,
}

/// Everything the analytics panel renders
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub dataset_name: Option<String>,
    pub distribution: Vec<TypeCount>,
    pub averages: Vec<AverageGroup>,
    /// `None` when the detail has no equipment records
    pub scatter: Option<Vec<ScatterPoint>>,
    pub stats: SummaryStats,
}

impl AnalyticsView {
    /// Derive the view. Without analytics there is nothing to chart.
    pub fn derive(detail: Option<&DatasetDetail>, analytics: Option<&AnalyticsAggregate>) -> Option<Self> {
        let analytics = analytics?;

        let averages = analytics
            .equipment_types
            .iter()
            .map(|t| AverageGroup {
                label: t.name.clone(),
                flowrate: analytics.avg_flowrate,
                pressure: analytics.avg_pressure,
                temperature: analytics.avg_temperature,
            })
            .collect();

        let scatter = detail
            .map(|d| scatter_points(&d.equipment_records))
            .filter(|points| !points.is_empty());

        Some(Self {
            dataset_name: detail.map(|d| d.summary.name.clone()),
            distribution: analytics.equipment_types.clone(),
            averages,
            scatter,
            stats: summary_stats(analytics),
        })
    }

    /// Sum over the distribution categories
    pub fn distribution_total(&self) -> u64 {
        self.distribution.iter().map(|t| t.count).sum()
    }
}

fn scatter_points(records: &[EquipmentRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            flowrate: r.flowrate,
            pressure: r.pressure,
        })
        .collect()
}

fn summary_stats(analytics: &AnalyticsAggregate) -> SummaryStats {
    let total = analytics.total_equipment;
    let types = analytics
        .equipment_types
        .iter()
        .map(|t| TypeShare {
            name: t.name.clone(),
            count: t.count,
            percent: percent_of(t.count, total),
        })
        .collect();

    SummaryStats {
        total_equipment: total,
        flowrate: analytics.flowrate(),
        pressure: analytics.pressure(),
        temperature: analytics.temperature(),
        types,
    }
}

fn percent_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Default file name for a downloaded report
pub fn report_file_name(dataset_name: &str) -> String {
    let safe: String = dataset_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("report_{}.pdf", safe)
}

// ============================================================================
// Rendering
// ============================================================================

/// Horizontal bars, one per type, scaled to the largest count
pub fn render_bars(types: &[TypeCount]) -> String {
    let max = types.iter().map(|t| t.count).max().unwrap_or(0);
    let label_width = types.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for t in types {
        let len = if max == 0 {
            0
        } else {
            ((t.count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
        };
        out.push_str(&format!(
            "{:<width$} │{} {}\n",
            t.name,
            "█".repeat(len),
            t.count,
            width = label_width
        ));
    }
    out
}

/// Distribution table: type, count, share of total
pub fn render_distribution(view: &AnalyticsView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Type", "Count", "Share"]);

    for share in &view.stats.types {
        table.add_row(vec![
            share.name.clone(),
            share.count.to_string(),
            format!("{:.1}%", share.percent),
        ]);
    }
    table
}

/// Grouped averages table, one row per type label
pub fn render_averages(view: &AnalyticsView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Type", "Avg Flowrate", "Avg Pressure", "Avg Temperature"]);

    for group in &view.averages {
        table.add_row(vec![
            group.label.clone(),
            format!("{:.2}", group.flowrate),
            format!("{:.2}", group.pressure),
            format!("{:.2}", group.temperature),
        ]);
    }
    table
}

/// Plain-text scatter plot of pressure (y) against flowrate (x)
pub fn render_scatter(points: &[ScatterPoint]) -> String {
    let (x_min, x_max) = bounds(points.iter().map(|p| p.flowrate));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.pressure));

    let mut grid = vec![vec![' '; SCATTER_WIDTH]; SCATTER_HEIGHT];
    for p in points {
        let col = scale(p.flowrate, x_min, x_max, SCATTER_WIDTH);
        let row = SCATTER_HEIGHT - 1 - scale(p.pressure, y_min, y_max, SCATTER_HEIGHT);
        grid[row][col] = '•';
    }

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        let label = match i {
            0 => format!("{:>8.2}", y_max),
            _ if i == SCATTER_HEIGHT - 1 => format!("{:>8.2}", y_min),
            _ => " ".repeat(8),
        };
        out.push_str(&format!("{} │{}\n", label, row.iter().collect::<String>()));
    }
    out.push_str(&format!("{} └{}\n", " ".repeat(8), "─".repeat(SCATTER_WIDTH)));
    out.push_str(&format!(
        "{}  {:<w$.2}{:>w$.2}\n",
        " ".repeat(8),
        x_min,
        x_max,
        w = SCATTER_WIDTH / 2
    ));
    out.push_str(&format!("{}  flowrate → / pressure ↑\n", " ".repeat(8)));
    out
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max - min <= f64::EPSILON {
        return cells / 2;
    }
    let pos = ((value - min) / (max - min) * (cells - 1) as f64).round();
    (pos.max(0.0) as usize).min(cells - 1)
}

/// Summary statistics block
pub fn render_summary(view: &AnalyticsView) -> String {
    let stats = &view.stats;
    let mut out = String::new();

    if let Some(name) = &view.dataset_name {
        out.push_str(&format!("Dataset: {}\n", name));
    }
    out.push_str(&format!("Total Equipment: {}\n\n", stats.total_equipment));

    for (label, p) in [
        ("Flowrate", stats.flowrate),
        ("Pressure", stats.pressure),
        ("Temperature", stats.temperature),
    ] {
        out.push_str(&format!(
            "{:<12} avg {:>10.2}   range {:.2} – {:.2}\n",
            label, p.avg, p.min, p.max
        ));
    }

    if !stats.types.is_empty() {
        out.push_str("\nEquipment Types:\n");
        for share in &stats.types {
            out.push_str(&format!("  {}: {} ({:.1}%)\n", share.name, share.count, share.percent));
        }
    }
    out
}

/// Equipment records as a table
pub fn render_records(records: &[EquipmentRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec!["Equipment", "Type", "Flowrate", "Pressure", "Temperature"]);

    for r in records {
        table.add_row(vec![
            r.equipment_name.clone(),
            r.equipment_type.clone(),
            format!("{:.2}", r.flowrate),
            format!("{:.2}", r.pressure),
            format!("{:.2}", r.temperature),
        ]);
    }
    table
}

fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(60).blue());
}

/// Print the requested charts
pub fn display(view: &AnalyticsView, chart: ChartKind) {
    if chart == ChartKind::All {
        heading("Summary");
        print!("{}", render_summary(view));
    }

    if matches!(chart, ChartKind::All | ChartKind::Distribution) {
        heading("Equipment Type Distribution");
        println!("{}", render_distribution(view));
        print!("{}", render_bars(&view.distribution));
    }

    if matches!(chart, ChartKind::All | ChartKind::Averages) {
        heading("Average Parameters");
        println!("{}", render_averages(view));
    }

    if matches!(chart, ChartKind::All | ChartKind::Scatter) {
        heading("Flowrate vs Pressure");
        match &view.scatter {
            Some(points) => print!("{}", render_scatter(points)),
            None => println!("{}", "No equipment records to plot.".dimmed()),
        }
    }
    println!();
}

/// Print the records table
pub fn display_records(records: &[EquipmentRecord]) {
    if records.is_empty() {
        println!("{}", "No equipment records.".yellow());
        return;
    }
    println!();
    println!("{}", render_records(records));
    println!("{} record(s)", records.len());
}
