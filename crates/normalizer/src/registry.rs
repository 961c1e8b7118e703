//! Channel to normalizer registry.
//!
//! Every channel without a dedicated normalizer falls back to the default
//! one, so new marketplaces work out of the box and can get their own
//! decoding rules later.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::cleaner::CleanerLookup;
use crate::standard::StandardNormalizer;
use crate::traits::LineNormalizer;

/// Channels routed explicitly to the standard normalizer.
const STANDARD_CHANNELS: &[&str] = &["shopee", "lazada"];

/// Registry of line normalizers keyed by source channel.
pub struct NormalizerRegistry {
    /// Channel name -> normalizer
    normalizers: HashMap<String, Arc<dyn LineNormalizer>>,
    /// Used for channels with no registered normalizer.
    fallback: Arc<dyn LineNormalizer>,
}

impl NormalizerRegistry {
    /// Create an empty registry with the given fallback.
    pub fn new(fallback: Arc<dyn LineNormalizer>) -> Self {
        Self {
            normalizers: HashMap::new(),
            fallback,
        }
    }

    /// Registry with the standard normalizer as fallback and for every
    /// known channel.
    pub fn with_defaults(cleaners: CleanerLookup) -> Self {
        let standard: Arc<dyn LineNormalizer> = Arc::new(StandardNormalizer::new(cleaners));
        let mut registry = Self::new(standard.clone());
        for channel in STANDARD_CHANNELS {
            registry.register(*channel, standard.clone());
        }
        registry
    }

    /// Register a normalizer for a channel, replacing any previous one.
    pub fn register(&mut self, channel: impl Into<String>, normalizer: Arc<dyn LineNormalizer>) {
        let channel = channel.into();
        info!(
            "Registering {} normalizer for channel: {}",
            normalizer.name(),
            channel
        );
        self.normalizers.insert(channel, normalizer);
    }

    /// Normalizer for a channel, or the fallback.
    pub fn resolve(&self, channel: &str) -> &dyn LineNormalizer {
        self.normalizers
            .get(channel)
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Get all registered channel names.
    pub fn channels(&self) -> Vec<&str> {
        self.normalizers.keys().map(|s| s.as_str()).collect()
    }
}

impl std::fmt::Debug for NormalizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerRegistry")
            .field("channels", &self.normalizers.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::schema::{NormalizedRecord, RawLineItem};

    struct FixedNormalizer;

    impl LineNormalizer for FixedNormalizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn normalize(&self, item: &RawLineItem) -> Result<Vec<NormalizedRecord>> {
            Ok(vec![NormalizedRecord::accessory(
                item.sequence_hint,
                "FIXED",
                item.quantity,
            )])
        }
    }

    #[test]
    fn test_defaults_register_known_channels() {
        let registry = NormalizerRegistry::with_defaults(CleanerLookup::default());

        let mut channels = registry.channels();
        channels.sort_unstable();
        assert_eq!(channels, vec!["lazada", "shopee"]);
        assert_eq!(registry.resolve("shopee").name(), "standard");
    }

    #[test]
    fn test_unknown_channel_uses_fallback() {
        let registry = NormalizerRegistry::with_defaults(CleanerLookup::default());
        assert_eq!(registry.resolve("tiktok").name(), "standard");
        assert_eq!(registry.resolve("").name(), "standard");
    }

    #[test]
    fn test_register_overrides_channel() {
        let mut registry = NormalizerRegistry::with_defaults(CleanerLookup::default());
        registry.register("tiktok", Arc::new(FixedNormalizer));

        assert_eq!(registry.resolve("tiktok").name(), "fixed");
        assert_eq!(registry.resolve("lazada").name(), "standard");
    }
}
