//! Analysis pipeline for tabula.
//!
//! [`Analyzer`] ties the crates together: ingest and profile a dataset,
//! persist the record with deterministic insights, then enhance those
//! insights in the background. [`TabulaConfig`] holds every tunable and is
//! built once at start-up.

pub mod analyzer;
pub mod config;
pub mod dispatch;
pub mod error;

pub use analyzer::{
    AnalyzeRequest, AnalyzeResponse, Analyzer, EnhanceRequest, EnhancementOutcome, InsightSource,
};
pub use config::{ConfigError, EnhancementSettings, StoreSettings, TabulaConfig};
pub use dispatch::EnhancementDispatcher;
pub use error::{AnalysisError, Result};
