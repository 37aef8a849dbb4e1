//! Guidance lookup: cache, completion call, parsing and fallbacks

use std::sync::Arc;
use std::time::Instant;

use derm_core::GuidanceRecord;

use crate::ai::prompt::{SYSTEM_PROMPT, guidance_prompt};
use crate::ai::{CompletionProvider, OpenRouterClient};
use crate::cache::GuidanceCache;
use crate::config::Config;
use crate::error::GuidanceError;

/// Generic prevention advice used when a completion has none
pub const DEFAULT_PREVENTION: [&str; 7] = [
    "Maintain good skin hygiene",
    "Keep skin moisturized",
    "Avoid known triggers",
    "Manage stress levels",
    "Follow a healthy diet",
    "Protect skin from extreme weather",
    "Regular medical check-ups",
];

/// Fill sections that must never be empty. Returns true if anything changed.
pub fn apply_fallbacks(record: &mut GuidanceRecord) -> bool {
    if !record.prevention.is_empty() {
        return false;
    }
    record.prevention = DEFAULT_PREVENTION.iter().map(|s| s.to_string()).collect();
    true
}

/// Fetches structured guidance for a disease label and memoizes the result
#[derive(Clone)]
pub struct GuidanceService {
    provider: Arc<dyn CompletionProvider>,
    cache: Arc<GuidanceCache>,
}

impl GuidanceService {
    pub fn new(provider: Arc<dyn CompletionProvider>, cache: Arc<GuidanceCache>) -> Self {
        Self { provider, cache }
    }

    /// Build the service with an OpenRouter client and a cache sized from config
    pub fn from_config(config: &Config) -> Result<Self, GuidanceError> {
        let client = OpenRouterClient::new(config)?;
        tracing::info!(
            model = client.model(),
            capacity = config.cache_capacity.get(),
            ttl_secs = config.cache_ttl.map(|ttl| ttl.as_secs()),
            "Guidance service configured"
        );
        let cache = GuidanceCache::new(config.cache_capacity, config.cache_ttl);
        Ok(Self::new(Arc::new(client), Arc::new(cache)))
    }

    pub fn cache(&self) -> &GuidanceCache {
        &self.cache
    }

    /// Return guidance for `disease`, calling upstream only on a cache miss.
    ///
    /// The fetch runs in its own task: if the caller stops waiting, the
    /// completion still finishes and lands in the cache.
    pub async fn get_guidance(&self, disease: &str) -> Result<GuidanceRecord, GuidanceError> {
        if let Some(record) = self.cache.get(disease) {
            metrics::counter!("guidance_cache_hits_total").increment(1);
            tracing::debug!(disease = %disease, "Guidance cache hit");
            return Ok(record);
        }
        metrics::counter!("guidance_cache_misses_total").increment(1);

        let provider = Arc::clone(&self.provider);
        let cache = Arc::clone(&self.cache);
        let disease = disease.to_string();

        tokio::spawn(fetch_and_store(provider, cache, disease))
            .await
            .map_err(|e| GuidanceError::Internal(format!("guidance task failed: {}", e)))?
    }
}

async fn fetch_and_store(
    provider: Arc<dyn CompletionProvider>,
    cache: Arc<GuidanceCache>,
    disease: String,
) -> Result<GuidanceRecord, GuidanceError> {
    let prompt = guidance_prompt(&disease);

    let start = Instant::now();
    let result = provider.complete(SYSTEM_PROMPT, &prompt).await;
    metrics::histogram!("guidance_completion_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    let text = match result {
        Ok(text) => text,
        Err(e) => {
            metrics::counter!("guidance_completion_failures_total").increment(1);
            tracing::error!(disease = %disease, error = %e, "Completion request failed");
            return Err(e.into());
        }
    };

    let mut record = derm_core::parse(&text);
    if record.is_empty() {
        tracing::warn!(
            disease = %disease,
            chars = text.len(),
            "Completion contained no recognizable sections"
        );
    } else {
        for kind in record.empty_sections() {
            tracing::debug!(disease = %disease, section = kind.title(), "Section missing from completion");
        }
    }
    if apply_fallbacks(&mut record) {
        metrics::counter!("guidance_prevention_fallbacks_total").increment(1);
        tracing::info!(disease = %disease, "Using default prevention advice");
    }

    tracing::info!(
        disease = %disease,
        symptoms = record.symptoms.len(),
        treatment = record.treatment.len(),
        medical_care = record.medical_care.len(),
        prevention = record.prevention.len(),
        "Guidance parsed"
    );

    cache.insert(disease, record.clone());
    Ok(record)
}
