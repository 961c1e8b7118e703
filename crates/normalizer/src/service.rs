//! Batch normalizer service.
//!
//! Runs the channel's line normalizer over every item of an order, then
//! merges duplicates across the whole batch. A batch either normalizes
//! completely or fails on its first bad line.

use crate::cleaner::CleanerLookup;
use crate::error::{Error, Result};
use crate::merge::merge_and_renumber;
use crate::registry::NormalizerRegistry;
use crate::schema::{NormalizedRecord, RawLineItem};
use crate::traits::LineNormalizer;
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, warn};

/// Batch normalizer service.
///
/// Holds no mutable state; a single instance can serve concurrent batches.
#[derive(Debug)]
pub struct NormalizerService {
    registry: NormalizerRegistry,
}

impl NormalizerService {
    /// Create a service over an existing registry.
    pub fn new(registry: NormalizerRegistry) -> Self {
        Self { registry }
    }

    /// Create a service with the default channel registry.
    pub fn with_defaults(cleaners: CleanerLookup) -> Self {
        Self::new(NormalizerRegistry::with_defaults(cleaners))
    }

    /// Get the registry reference.
    pub fn registry(&self) -> &NormalizerRegistry {
        &self.registry
    }

    /// Normalize a batch of line items into merged, renumbered records.
    pub fn normalize_batch(&self, items: &[RawLineItem]) -> Result<Vec<NormalizedRecord>> {
        counter!("normalizer_batches_total").increment(1);

        let mut records = Vec::new();
        for item in items {
            let normalizer = self.registry.resolve(&item.source_channel);
            counter!(
                "normalizer_line_items_total",
                "channel" => item.source_channel.clone()
            )
            .increment(1);

            let out = normalizer.normalize(item).map_err(|e| {
                warn!(
                    "[{}] Line {} rejected ({}): {}",
                    normalizer.name(),
                    item.sequence_hint,
                    item.raw_identifier,
                    e
                );
                counter!("normalizer_errors_total", "error_type" => e.kind()).increment(1);
                Error::LineItem {
                    no: item.sequence_hint,
                    raw: item.raw_identifier.clone(),
                    source: Box::new(e),
                }
            })?;

            debug!(
                "[{}] Line {} produced {} records",
                normalizer.name(),
                item.sequence_hint,
                out.len()
            );
            records.extend(out);
        }

        let merged = merge_and_renumber(records).map_err(|e| {
            warn!("Batch merge rejected: {}", e);
            counter!("normalizer_errors_total", "error_type" => e.kind()).increment(1);
            e
        })?;
        counter!("normalizer_records_emitted_total").increment(merged.len() as u64);

        Ok(merged)
    }
}

/// Builder for creating normalizer services with custom channels.
pub struct NormalizerServiceBuilder {
    registry: NormalizerRegistry,
}

impl NormalizerServiceBuilder {
    /// Start from the default registry.
    pub fn new(cleaners: CleanerLookup) -> Self {
        Self {
            registry: NormalizerRegistry::with_defaults(cleaners),
        }
    }

    /// Route a channel to a dedicated normalizer.
    pub fn channel(
        mut self,
        channel: impl Into<String>,
        normalizer: Arc<dyn LineNormalizer>,
    ) -> Self {
        self.registry.register(channel, normalizer);
        self
    }

    /// Build the normalizer service.
    pub fn build(self) -> NormalizerService {
        NormalizerService::new(self.registry)
    }
}

// ============================================================================
// Tests
// ============================================================================
