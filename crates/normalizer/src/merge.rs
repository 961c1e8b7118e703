//! Batch-level merging of duplicate products.

use crate::error::{Error, Result};
use crate::schema::NormalizedRecord;
use std::collections::HashMap;

/// Merge records sharing a product id and renumber the result from 1.
///
/// Quantity and total price are summed per product id; unit price, material
/// and model come from the first occurrence. Regular products are listed
/// before accessories, and each tier keeps first-seen order.
///
/// Fails with `QuantityOverflow` or `PriceOverflow` when a merged sum leaves
/// the range of its type.
pub fn merge_and_renumber(records: Vec<NormalizedRecord>) -> Result<Vec<NormalizedRecord>> {
    // Groups are pushed in first-seen order.
    let mut groups: Vec<NormalizedRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        match index.get(&record.product_id).copied() {
            Some(i) => {
                let group = &mut groups[i];
                group.quantity = group.quantity.checked_add(record.quantity).ok_or_else(|| {
                    Error::QuantityOverflow {
                        product_id: record.product_id.clone(),
                    }
                })?;
                group.total_price = group
                    .total_price
                    .checked_add(record.total_price)
                    .ok_or_else(|| Error::PriceOverflow {
                        product_id: record.product_id.clone(),
                    })?;
            }
            None => {
                index.insert(record.product_id.clone(), groups.len());
                groups.push(record);
            }
        }
    }

    let (regular, accessories): (Vec<_>, Vec<_>) =
        groups.into_iter().partition(|group| !group.is_accessory());

    Ok(regular
        .into_iter()
        .chain(accessories)
        .zip(1..)
        .map(|(mut record, no)| {
            record.sequence_no = no;
            record
        })
        .collect())
}
