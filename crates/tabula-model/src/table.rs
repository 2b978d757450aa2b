#![deny(unsafe_code)]

use std::fmt;

/// A single parsed cell.
///
/// Cells are tagged once during ingestion; statistics only ever look at the
/// variant relevant to the column's inferred type.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    Numeric(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub inferred_type: ColumnType,
    /// Always false: empty cells are excluded from analysis, not tracked.
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, inferred_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            inferred_type,
            nullable: false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.inferred_type == ColumnType::Numeric
    }
}

/// Dataset-wide counts computed once by the ingestor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
}

/// Ingested table: typed columns plus one cell per column for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
    pub profile: DatasetProfile,
}

impl Dataset {
    /// Iterate the cells of one column in row order.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    /// Numeric values of one column aligned by row index.
    ///
    /// Rows whose cell is not `Numeric` yield `None`.
    pub fn numeric_values(&self, index: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.get(index).and_then(Cell::as_f64))
            .collect()
    }

    /// Indices of numeric columns in header order.
    pub fn numeric_column_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.is_numeric())
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset {
            columns: vec![
                Column::new("price", ColumnType::Numeric),
                Column::new("category", ColumnType::Categorical),
            ],
            rows: vec![
                vec![Cell::Numeric(1.5), Cell::Text("A".to_string())],
                vec![Cell::Text("n/a".to_string()), Cell::Empty],
            ],
            profile: DatasetProfile {
                row_count: 2,
                column_count: 2,
            },
        }
    }

    #[test]
    fn numeric_values_align_by_row() {
        let dataset = sample();
        assert_eq!(dataset.numeric_values(0), vec![Some(1.5), None]);
        assert_eq!(dataset.numeric_column_indices(), vec![0]);
    }

    #[test]
    fn column_cells_follow_row_order() {
        let dataset = sample();
        let labels: Vec<Option<&str>> = dataset.column_cells(1).map(Cell::as_text).collect();
        assert_eq!(labels, vec![Some("A"), None]);
        assert!(dataset.column_cells(1).nth(1).is_some_and(Cell::is_empty));
    }

    #[test]
    fn column_defaults_to_non_nullable() {
        let column = Column::new("x", ColumnType::Categorical);
        assert!(!column.nullable);
        assert!(!column.is_numeric());
    }
}
