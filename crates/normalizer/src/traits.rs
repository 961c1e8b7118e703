//! Core trait for line normalizers (plugin interface).
//!
//! Each marketplace channel can get its own decoding rules by implementing
//! `LineNormalizer` and registering it with the `NormalizerRegistry`.
//!
//! # Example
//!
//! ```ignore
//! pub struct TiktokNormalizer;
//!
//! impl LineNormalizer for TiktokNormalizer {
//!     fn name(&self) -> &'static str {
//!         "tiktok"
//!     }
//!
//!     fn normalize(&self, item: &RawLineItem) -> Result<Vec<NormalizedRecord>> {
//!         // Decode TikTok product ids
//!     }
//! }
//! ```

use crate::error::Result;
use crate::schema::{NormalizedRecord, RawLineItem};

/// Turns one raw line item into normalized records.
///
/// Implementations must be pure: the same item always yields the same
/// records, and a failure yields no records at all.
pub trait LineNormalizer: Send + Sync + 'static {
    /// Normalizer name, used in logs.
    fn name(&self) -> &'static str;

    /// Normalize one line item into product and accessory records.
    ///
    /// Sequence numbers on the returned records are provisional.
    fn normalize(&self, item: &RawLineItem) -> Result<Vec<NormalizedRecord>>;
}
