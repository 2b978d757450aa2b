//! The external text-generation seam.

use async_trait::async_trait;

use crate::error::Result;

/// One generation call: prompt plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// A text-generation backend.
///
/// Implementations return the raw response text; parsing it into insights is
/// the caller's job.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
