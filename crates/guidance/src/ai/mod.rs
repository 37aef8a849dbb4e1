//! Completion API access used to fetch guidance text

pub mod client;
pub mod prompt;

use async_trait::async_trait;

use crate::error::RemoteServiceError;

pub use client::OpenRouterClient;

/// Source of raw completion text.
///
/// The guidance service only needs the text body; transport, auth and
/// response decoding belong to the implementation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, RemoteServiceError>;
}
