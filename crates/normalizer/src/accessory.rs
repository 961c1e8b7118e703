//! Accessory derivation: one wiping cloth per line, one cleaner per texture.

use crate::cleaner::CleanerLookup;
use crate::decoder;
use crate::error::{Error, Result};
use crate::schema::{DecodedComponent, NormalizedRecord, WIPING_CLOTH_ID};
use std::collections::BTreeMap;

/// Derive accessory records for the decoded components of one line item.
///
/// Records are numbered from `first_sequence_no`, saturating at `u32::MAX`.
/// The cloth comes first, then cleaners in ascending texture order.
pub fn derive(
    components: &[DecodedComponent],
    lookup: &CleanerLookup,
    first_sequence_no: u32,
) -> Result<Vec<NormalizedRecord>> {
    let total_quantity = decoder::total_quantity(components, WIPING_CLOTH_ID)?;

    let mut by_texture: BTreeMap<String, u32> = BTreeMap::new();
    for component in components {
        let quantity = by_texture.entry(component.texture()).or_default();
        *quantity = quantity
            .checked_add(component.effective_quantity)
            .ok_or_else(|| Error::QuantityOverflow {
                product_id: lookup.resolve(&component.texture()),
            })?;
    }

    let cloth = NormalizedRecord::accessory(first_sequence_no, WIPING_CLOTH_ID, total_quantity);
    let cleaners = by_texture
        .into_iter()
        .enumerate()
        .map(|(i, (texture, quantity))| {
            let no = first_sequence_no.saturating_add(1).saturating_add(i as u32);
            NormalizedRecord::accessory(no, lookup.resolve(&texture), quantity)
        });

    Ok(std::iter::once(cloth).chain(cleaners).collect())
}
