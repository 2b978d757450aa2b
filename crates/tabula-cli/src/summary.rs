//! Terminal rendering of analysis results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabula_insights::deterministic::{MODERATE_CORRELATION, STRONG_CORRELATION};
use tabula_model::{
    AnalysisId, AnalysisRecord, CorrelationPair, DatasetProfile, InsightStatus, Statistics,
};

/// Everything shown for one analysis, borrowed from a response or a record.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisReport<'a> {
    pub analysis_id: &'a AnalysisId,
    pub dataset: &'a str,
    pub profile: Option<DatasetProfile>,
    pub statistics: &'a Statistics,
    pub correlations: Option<&'a [CorrelationPair]>,
    pub insights: &'a [String],
    pub status: InsightStatus,
}

impl<'a> AnalysisReport<'a> {
    pub fn from_record(record: &'a AnalysisRecord) -> Self {
        Self {
            analysis_id: &record.id,
            dataset: record
                .dataset_name
                .as_deref()
                .unwrap_or(record.dataset_id.as_str()),
            profile: record.profile,
            statistics: &record.statistics,
            correlations: record.correlations.as_deref(),
            insights: record.ai_insights.as_deref().unwrap_or_default(),
            status: record.insight_status,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("Dataset: {}\nAnalysis: {}\n", self.dataset, self.analysis_id);
        if let Some(profile) = self.profile {
            out.push_str(&format!(
                "Rows: {}  Columns: {}\n",
                profile.row_count, profile.column_count
            ));
        }
        if !self.statistics.numerical.is_empty() {
            out.push_str(&format!("\n{}\n", numeric_table(self.statistics)));
        }
        if !self.statistics.categorical.is_empty() {
            out.push_str(&format!("\n{}\n", categorical_table(self.statistics)));
        }
        if let Some(pairs) = self.correlations.filter(|pairs| !pairs.is_empty()) {
            out.push_str(&format!("\n{}\n", correlation_table(pairs)));
        }
        out.push_str(&format!(
            "\n{}\n",
            insight_table(self.insights, self.status)
        ));
        out
    }
}

pub fn print_report(report: &AnalysisReport<'_>) {
    print!("{}", report.render());
}

pub fn numeric_table(statistics: &Statistics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stats in &statistics.numerical {
        table.add_row(vec![
            Cell::new(&stats.column).add_attribute(Attribute::Bold),
            Cell::new(stats.count),
            number_cell(stats.mean),
            number_cell(stats.median),
            number_cell(stats.std),
            number_cell(stats.min),
            number_cell(stats.max),
        ]);
    }
    table
}

pub fn categorical_table(statistics: &Statistics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Unique"),
        header_cell("Top values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for stats in &statistics.categorical {
        let top = if stats.top_values.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(
                stats
                    .top_values
                    .iter()
                    .map(|entry| format!("{} ({})", entry.value, entry.count))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        table.add_row(vec![
            Cell::new(&stats.column).add_attribute(Attribute::Bold),
            Cell::new(stats.unique_count),
            top,
        ]);
    }
    table
}

pub fn correlation_table(pairs: &[CorrelationPair]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column 1"),
        header_cell("Column 2"),
        header_cell("r"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for pair in pairs {
        table.add_row(vec![
            Cell::new(&pair.column1),
            Cell::new(&pair.column2),
            correlation_cell(pair),
        ]);
    }
    table
}

pub fn insight_table(insights: &[String], status: InsightStatus) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell(&format!("Insights ({})", status.label())),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    if insights.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("No insights")]);
    }
    for (index, insight) in insights.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(insight)]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}"))
}

/// Same bands the insight sentences use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Strong,
    Moderate,
    Weak,
}

fn band(pair: &CorrelationPair) -> Band {
    let strength = pair.strength();
    if strength > STRONG_CORRELATION {
        Band::Strong
    } else if strength > MODERATE_CORRELATION {
        Band::Moderate
    } else {
        Band::Weak
    }
}

fn correlation_cell(pair: &CorrelationPair) -> Cell {
    let cell = Cell::new(format!("{:.3}", pair.correlation));
    match band(pair) {
        Band::Strong => cell
            .fg(if pair.correlation > 0.0 {
                Color::Green
            } else {
                Color::Red
            })
            .add_attribute(Attribute::Bold),
        Band::Moderate => cell.fg(Color::Yellow),
        Band::Weak => cell.fg(Color::DarkGrey),
    }
}
