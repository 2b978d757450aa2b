//! Tabular ingestion.
//!
//! This crate turns comma-delimited text into a typed [`Dataset`]: a header
//! row, one tagged [`Cell`](tabula_model::Cell) per column for every data row,
//! and a numeric/categorical type for every column.
//!
//! # Classification
//!
//! A column is numeric when strictly more than 80% of its non-empty cells parse
//! as finite numbers. Empty cells are ignored for the ratio, and a column with
//! no non-empty cells is categorical.
//!
//! # Example
//!
//! ```
//! use tabula_ingest::ingest;
//!
//! let dataset = ingest("price,category\n10,A\n20,B\n").unwrap();
//! assert_eq!(dataset.columns.len(), 2);
//! assert!(dataset.columns[0].is_numeric());
//! ```

mod classify;
mod error;
mod ingest;
mod reader;
mod text;

// === Error Types ===
pub use error::{IngestError, Result};

// === Ingestion ===
pub use ingest::ingest;
pub use reader::read_text;

// === Classification ===
pub use classify::{ColumnCounts, NUMERIC_RATIO_THRESHOLD, classify_column, parse_numeric};

pub use tabula_model::Dataset;
