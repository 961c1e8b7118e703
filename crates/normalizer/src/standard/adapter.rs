//! Standard line normalizer implementation.

use crate::accessory;
use crate::cleaner::CleanerLookup;
use crate::decoder;
use crate::error::{Error, Result};
use crate::schema::{DecodedComponent, NormalizedRecord, RawLineItem};
use crate::traits::LineNormalizer;
use rust_decimal::Decimal;

/// Default normalizer for marketplace line items.
///
/// Decodes bundles, multipliers and noise prefixes, apportions the line
/// total uniformly over the expanded quantity and appends the cloth and
/// cleaner accessories.
#[derive(Debug, Clone, Default)]
pub struct StandardNormalizer {
    cleaners: CleanerLookup,
}

impl StandardNormalizer {
    /// Create a normalizer resolving cleaners through `cleaners`.
    pub fn new(cleaners: CleanerLookup) -> Self {
        Self { cleaners }
    }
}

impl LineNormalizer for StandardNormalizer {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn normalize(&self, item: &RawLineItem) -> Result<Vec<NormalizedRecord>> {
        let components = decoder::decode(&item.raw_identifier, item.quantity)?;

        let total_quantity = decoder::total_quantity(&components, &item.raw_identifier)?;
        // One unit price for every member of the bundle.
        let unit_price = item
            .total_price
            .checked_div(Decimal::from(total_quantity))
            .ok_or_else(|| Error::DivisionByZero {
                raw: item.raw_identifier.clone(),
            })?;

        // Provisional numbers only; the batch merge renumbers from 1.
        let mut records = components
            .iter()
            .enumerate()
            .map(|(i, component)| {
                let no = item.sequence_hint.saturating_add(i as u32);
                product_record(component, no, unit_price)
            })
            .collect::<Result<Vec<_>>>()?;

        let next_no = item.sequence_hint.saturating_add(records.len() as u32);
        records.extend(accessory::derive(&components, &self.cleaners, next_no)?);

        Ok(records)
    }
}

fn product_record(
    component: &DecodedComponent,
    no: u32,
    unit_price: Decimal,
) -> Result<NormalizedRecord> {
    let product_id = component.product_id();
    let total_price = unit_price
        .checked_mul(Decimal::from(component.effective_quantity))
        .ok_or_else(|| Error::PriceOverflow {
            product_id: product_id.clone(),
        })?;

    Ok(NormalizedRecord {
        sequence_no: no,
        product_id,
        material_id: Some(component.material_id.clone()),
        model_id: Some(component.model_id.clone()),
        quantity: component.effective_quantity,
        unit_price,
        total_price,
    })
}

// ============================================================================
// Tests
// ============================================================================
