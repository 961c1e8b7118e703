//! Order normalization service: normalize a batch, then persist it.

use crate::error::{Error, Result};
use crate::repository::OrderRepository;
use metrics::counter;
use normalizer::{NormalizedRecord, NormalizerService, RawLineItem};
use std::sync::Arc;
use tracing::{error, info};

/// Normalizes incoming orders and hands the result to the repository.
pub struct OrderService {
    normalizer: NormalizerService,
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    /// Create a new order service.
    pub fn new(normalizer: NormalizerService, repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            normalizer,
            repository,
        }
    }

    /// Normalize and persist one order.
    ///
    /// Nothing is persisted if any line fails to normalize.
    pub async fn normalize_order(&self, items: &[RawLineItem]) -> Result<Vec<NormalizedRecord>> {
        let records = self.normalizer.normalize_batch(items)?;

        if let Err(e) = self.repository.save_normalized(&records).await {
            error!("Failed to persist normalized order: {}", e);
            counter!("order_service_persist_errors_total").increment(1);
            return Err(match e {
                Error::Persistence(msg) => Error::Persistence(msg),
                other => Error::Persistence(other.to_string()),
            });
        }

        info!(
            "Normalized order: {} line items -> {} records",
            items.len(),
            records.len()
        );
        Ok(records)
    }
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("normalizer", &self.normalizer)
            .finish()
    }
}
