//! Normalizer for marketplace order line items.
//!
//! Marketplace exports encode products as compact identifier strings with
//! bundle separators, quantity multipliers and noise prefixes. This crate
//! decodes them into structured records, derives the wiping cloth and
//! cleaner accessories, and merges duplicates across an order.
//!
//! # Architecture
//!
//! ```text
//! RawLineItem --> LineNormalizer --> NormalizedRecord* --> merge --> NormalizedRecord*
//!                 (decode, price,                          (dedupe, products
//!                  accessories)                             before accessories)
//! ```
//!
//! # Adding a New Channel
//!
//! 1. Create a new normalizer struct
//! 2. Implement the `LineNormalizer` trait
//! 3. Register it for its channel with `NormalizerServiceBuilder::channel`
//!
//! # Usage
//!
//! ```ignore
//! use normalizer::{CleanerLookup, NormalizerService};
//!
//! let cleaners = CleanerLookup::new([("CLEAR", "CLEAR-CLEANNER")]);
//! let service = NormalizerService::with_defaults(cleaners);
//! let records = service.normalize_batch(&items)?;
//! ```

pub mod accessory;
pub mod cleaner;
pub mod decoder;
pub mod error;
pub mod merge;
pub mod registry;
pub mod schema;
pub mod service;
pub mod standard;
pub mod traits;

// Re-export core types
pub use cleaner::CleanerLookup;
pub use error::{Error, Result};
pub use merge::merge_and_renumber;
pub use registry::NormalizerRegistry;
pub use schema::{
    is_accessory, DecodedComponent, NormalizedRecord, RawLineItem, CLEANER_SUFFIX,
    WIPING_CLOTH_ID,
};
pub use service::{NormalizerService, NormalizerServiceBuilder};
pub use traits::LineNormalizer;

// Re-export channel normalizers
pub use standard::StandardNormalizer;
