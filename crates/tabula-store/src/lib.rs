//! Persistence gateway for analysis records.
//!
//! [`AnalysisStore`] is the only interface the pipeline uses. Two adapters are
//! provided: [`MemoryStore`] and [`JsonFileStore`].

pub mod error;
pub mod file;
pub mod gateway;
pub mod memory;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use gateway::AnalysisStore;
pub use memory::MemoryStore;
