//! Text-generation providers, retry policy and response unwrapping.

pub mod json;
pub mod openai;
pub mod provider;
pub mod retry;

pub use json::strip_code_fence;
pub use openai::OpenAiProvider;
pub use provider::{CompletionRequest, TextProvider};
pub use retry::{RetryPolicy, retry_with_backoff};
