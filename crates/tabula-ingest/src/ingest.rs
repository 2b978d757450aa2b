//! Raw text to typed dataset.

use tabula_model::{Cell, Column, Dataset, DatasetProfile};

use crate::classify::{classify_column, to_cell};
use crate::error::{IngestError, Result};
use crate::text::{normalize_headers, split_cells, split_lines};

/// Parse comma-delimited text into typed columns and rows.
///
/// The first non-blank line is the header. Rows shorter than the header are
/// padded with empty cells; cells past the header width are ignored.
pub fn ingest(raw: &str) -> Result<Dataset> {
    let lines = split_lines(raw);
    if lines.len() < 2 {
        return Err(IngestError::TooFewLines { found: lines.len() });
    }

    let headers = normalize_headers(split_cells(lines[0]));
    let width = headers.len();
    let raw_rows: Vec<Vec<String>> = lines[1..]
        .iter()
        .map(|line| {
            let mut cells = split_cells(line);
            cells.resize(width, String::new());
            cells
        })
        .collect();

    let columns: Vec<Column> = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let inferred = classify_column(raw_rows.iter().map(|row| row[idx].as_str()));
            Column::new(name, inferred)
        })
        .collect();

    let rows: Vec<Vec<Cell>> = raw_rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&columns)
                .map(|(value, column)| to_cell(value, column.inferred_type))
                .collect()
        })
        .collect();

    let profile = DatasetProfile {
        row_count: rows.len(),
        column_count: columns.len(),
    };
    tracing::debug!(
        rows = profile.row_count,
        columns = profile.column_count,
        numeric = columns.iter().filter(|column| column.is_numeric()).count(),
        "ingested dataset"
    );

    Ok(Dataset {
        columns,
        rows,
        profile,
    })
}
