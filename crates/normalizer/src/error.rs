//! Error types for order line normalization.

use thiserror::Error;

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Normalization errors.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A bundle member is empty or has fewer than three dash segments.
    #[error("invalid product format: {part} (raw input: {raw})")]
    MalformedIdentifier { part: String, raw: String },

    /// The decoded components of a line add up to zero units.
    #[error("total expanded quantity is zero, cannot apportion price (raw input: {raw})")]
    DivisionByZero { raw: String },

    /// Summed units of a product no longer fit in a `u32`.
    #[error("quantity overflow on {product_id}")]
    QuantityOverflow { product_id: String },

    /// Summed or apportioned price of a product is outside the decimal range.
    #[error("price overflow on {product_id}")]
    PriceOverflow { product_id: String },

    /// A line item failed; wraps the cause with the item's location.
    #[error("normalize failed on item no {no} (productId: {raw}): {source}")]
    LineItem {
        no: u32,
        raw: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Short label used for metrics and API error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedIdentifier { .. } => "malformed_identifier",
            Error::DivisionByZero { .. } => "division_by_zero",
            Error::QuantityOverflow { .. } => "quantity_overflow",
            Error::PriceOverflow { .. } => "price_overflow",
            Error::LineItem { source, .. } => source.kind(),
        }
    }
}
