//! The text-generation provider seam.

use async_trait::async_trait;

use crate::error::ProviderError;

/// One completion call: a rendered prompt plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

/// An opaque text-in/text-out model endpoint.
///
/// Swapping providers means implementing this trait; the pipeline never
/// looks past it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Run one completion and return the model's raw reply text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
