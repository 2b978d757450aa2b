//! Insight synthesis for profiled datasets.
//!
//! Two paths produce insight lists:
//!
//! - [`deterministic_insights`] runs synchronously on every analysis and
//!   cannot fail.
//! - The enhancement path builds a prompt ([`build_prompt`]), calls an
//!   [`InsightProvider`], reads the answer with [`parse_response`], and shapes
//!   it with [`finalize_insights`]. Any provider failure switches to
//!   [`fallback_insights`].
//!
//! Orchestration (dispatch, persistence) lives in `tabula-core`.

pub mod config;
pub mod deterministic;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod normalize;
pub mod parse;
pub mod prompt;
pub mod provider;

pub use config::{InsightLimits, ProviderSettings};
pub use deterministic::deterministic_insights;
pub use error::{ProviderError, Result};
pub use fallback::fallback_insights;
pub use gemini::GeminiProvider;
pub use normalize::{GENERIC_FILLER, finalize_insights};
pub use parse::{ParsedInsights, ResponseParser, default_parsers, parse_response, parse_with};
pub use prompt::{build_prompt, data_summary};
pub use provider::{GenerationRequest, InsightProvider};
