//! Persistence sink for normalized orders.
//!
//! `OrderRepository` is the seam to a real database. `InMemoryRepository`
//! keeps every saved batch in a DashMap and backs the binary until one is
//! wired in.

use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use normalizer::NormalizedRecord;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Receives the final record set of one normalized batch.
///
/// An error fails the whole batch; callers do not retry.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist one merged and renumbered batch.
    async fn save_normalized(&self, records: &[NormalizedRecord]) -> Result<()>;
}

/// In-memory repository keyed by batch id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<InMemoryRepositoryInner>,
}

#[derive(Debug, Default)]
struct InMemoryRepositoryInner {
    /// batch_id -> records
    batches: DashMap<u64, Vec<NormalizedRecord>>,
    next_batch_id: AtomicU64,
    total_records: AtomicU64,
}

/// Repository statistics.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepositoryStats {
    pub batch_count: usize,
    pub total_records: u64,
}

impl InMemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of a saved batch. Batch ids start at 1.
    pub fn batch(&self, batch_id: u64) -> Option<Vec<NormalizedRecord>> {
        self.inner.batches.get(&batch_id).map(|v| v.clone())
    }

    /// Get repository statistics.
    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            batch_count: self.inner.batches.len(),
            total_records: self.inner.total_records.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn save_normalized(&self, records: &[NormalizedRecord]) -> Result<()> {
        let batch_id = self.inner.next_batch_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner
            .total_records
            .fetch_add(records.len() as u64, Ordering::Relaxed);
        self.inner.batches.insert(batch_id, records.to_vec());
        debug!("Saved batch {} with {} records", batch_id, records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_read_back() {
        let repo = InMemoryRepository::new();
        let records = vec![
            NormalizedRecord::accessory(1, "WIPING-CLOTH", 2),
            NormalizedRecord::accessory(2, "CLEAR-CLEANNER", 2),
        ];

        repo.save_normalized(&records).await.unwrap();
        repo.save_normalized(&records[..1]).await.unwrap();

        assert_eq!(repo.batch(1), Some(records.clone()));
        assert_eq!(repo.batch(2).map(|b| b.len()), Some(1));
        assert_eq!(repo.batch(3), None);
        assert_eq!(
            repo.stats(),
            RepositoryStats {
                batch_count: 2,
                total_records: 3,
            }
        );
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();

        clone
            .save_normalized(&[NormalizedRecord::accessory(1, "WIPING-CLOTH", 1)])
            .await
            .unwrap();

        assert_eq!(repo.stats().batch_count, 1);
    }
}
