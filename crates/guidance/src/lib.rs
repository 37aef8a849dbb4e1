//! derm-guidance library crate
//!
//! Fetches free-text guidance for a skin-condition label from a remote
//! completion model and shapes it into a `GuidanceRecord`.
//! The CLI entrypoint is in `main.rs`.

pub mod ai;
pub mod cache;
pub mod config;
mod error;
pub mod service;

pub use ai::{CompletionProvider, OpenRouterClient};
pub use cache::GuidanceCache;
pub use config::Config;
pub use derm_core::{GuidanceRecord, SectionKind};
pub use error::{ConfigError, GuidanceError, RemoteServiceError};
pub use service::{DEFAULT_PREVENTION, GuidanceService, apply_fallbacks};

/// Load configuration from the environment and build a ready service.
///
/// Split out of `main()` so callers embedding the service (an HTTP layer,
/// tests) get the same wiring as the CLI.
pub fn build_service() -> Result<GuidanceService, GuidanceError> {
    let config = Config::from_env()?;
    GuidanceService::from_config(&config)
}
