//! Raw product identifier decoding.
//!
//! A raw identifier is a `/`-separated bundle of members. Each member may be
//! preceded by noise injected by upstream export tools and may end with a
//! `*N` quantity multiplier:
//!
//! ```text
//! FG0A-CLEAR-OPPOA3*2/%20xFG0A-MATTE-OPPOA3
//! └──────┬───────┘ │  └─┬┘└──────┬───────┘
//!   material-model │  noise  material-model
//!                  multiplier
//! ```

use crate::error::{Error, Result};
use crate::schema::DecodedComponent;

/// Noise prefixes, checked in this order on every stripping pass.
const NOISE_PREFIXES: &[&str] = &["x2-3&", "--", "-x", "x", "%20", "%", "&", " "];

const BUNDLE_SEPARATOR: char = '/';
const MULTIPLIER_SEPARATOR: char = '*';
const SEGMENT_SEPARATOR: char = '-';

/// Decode a raw identifier into its bundle components.
///
/// Components keep the order in which they appear in `raw`. Members without
/// a multiplier inherit `base_quantity`.
pub fn decode(raw: &str, base_quantity: u32) -> Result<Vec<DecodedComponent>> {
    raw.split(BUNDLE_SEPARATOR)
        .map(|member| decode_member(raw, member, base_quantity))
        .collect()
}

/// Total expanded quantity of a decoded line.
///
/// Fails with `QuantityOverflow` naming `raw` when the sum leaves `u32`.
pub fn total_quantity(components: &[DecodedComponent], raw: &str) -> Result<u32> {
    components
        .iter()
        .try_fold(0u32, |acc, c| acc.checked_add(c.effective_quantity))
        .ok_or_else(|| Error::QuantityOverflow {
            product_id: raw.to_string(),
        })
}

fn decode_member(raw: &str, member: &str, base_quantity: u32) -> Result<DecodedComponent> {
    let stripped = strip_noise_prefixes(member);
    let (part, effective_quantity) = split_multiplier(stripped, base_quantity);

    let segments: Vec<&str> = part.split(SEGMENT_SEPARATOR).collect();
    if part.is_empty() || segments.len() < 3 {
        return Err(Error::MalformedIdentifier {
            part: part.to_string(),
            raw: raw.to_string(),
        });
    }

    Ok(DecodedComponent {
        canonical_part: part.to_string(),
        material_id: segments[..2].join("-"),
        model_id: segments[2..].join("-"),
        effective_quantity,
    })
}

/// Strip stacked noise prefixes until none of them matches.
///
/// Each pass removes at least one byte, so `len + 1` passes always reach
/// the fixed point.
pub fn strip_noise_prefixes(member: &str) -> &str {
    let mut rest = member;
    for _ in 0..=member.len() {
        match NOISE_PREFIXES.iter().find(|p| rest.starts_with(**p)) {
            Some(prefix) => rest = &rest[prefix.len()..],
            None => break,
        }
    }
    rest
}

/// Split off a `*N` multiplier. An unparsable `N` keeps the base quantity.
///
/// Only the first `*` splits, so `A*2*3` has the unparsable suffix `2*3`.
fn split_multiplier(part: &str, base_quantity: u32) -> (&str, u32) {
    match part.split_once(MULTIPLIER_SEPARATOR) {
        Some((left, multiplier)) => (left, multiplier.parse().unwrap_or(base_quantity)),
        None => (part, base_quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_product() {
        let components = decode("FG0A-CLEAR-IPHONE16PROMAX", 2).unwrap();

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].canonical_part, "FG0A-CLEAR-IPHONE16PROMAX");
        assert_eq!(components[0].material_id, "FG0A-CLEAR");
        assert_eq!(components[0].model_id, "IPHONE16PROMAX");
        assert_eq!(components[0].effective_quantity, 2);
    }

    #[test]
    fn test_decode_prefix_and_multiplier() {
        let components = decode("x2-3&FG0A-MATTE-IPHONE16PROMAX*3", 1).unwrap();

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].product_id(), "FG0A-MATTE-IPHONE16PROMAX");
        assert_eq!(components[0].effective_quantity, 3);
    }

    #[test]
    fn test_decode_bundle_keeps_order() {
        let components = decode("FG0A-CLEAR-OPPOA3/%20xFG0A-CLEAR-OPPOA3-B", 1).unwrap();

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].product_id(), "FG0A-CLEAR-OPPOA3");
        assert_eq!(components[1].product_id(), "FG0A-CLEAR-OPPOA3-B");
        assert_eq!(components[1].model_id, "OPPOA3-B");
        assert!(components.iter().all(|c| c.effective_quantity == 1));
    }

    #[test]
    fn test_multiplier_applies_per_member() {
        let components = decode("--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3", 1).unwrap();

        assert_eq!(components[0].effective_quantity, 2);
        assert_eq!(components[1].effective_quantity, 1);
    }

    #[test]
    fn test_invalid_multiplier_falls_back_to_base_quantity() {
        let components = decode("FG0A-CLEAR-OPPOA3*abc", 4).unwrap();
        assert_eq!(components[0].effective_quantity, 4);
        assert_eq!(components[0].canonical_part, "FG0A-CLEAR-OPPOA3");

        // Only the first '*' splits; "2*3" is not an integer.
        let components = decode("FG0A-CLEAR-OPPOA3*2*3", 5).unwrap();
        assert_eq!(components[0].effective_quantity, 5);
    }

    #[test]
    fn test_zero_multiplier_is_kept() {
        let components = decode("FG0A-CLEAR-OPPOA3*0", 2).unwrap();
        assert_eq!(components[0].effective_quantity, 0);
    }

    #[test]
    fn test_strip_stacked_prefixes() {
        assert_eq!(strip_noise_prefixes("%20xFG0A"), "FG0A");
        assert_eq!(strip_noise_prefixes("x2-3&FG0A"), "FG0A");
        assert_eq!(strip_noise_prefixes("& %-xFG0A"), "FG0A");
        assert_eq!(strip_noise_prefixes("----FG0A"), "FG0A");
        assert_eq!(strip_noise_prefixes("xxxx"), "");
        assert_eq!(strip_noise_prefixes("FG0A-x"), "FG0A-x");
    }

    #[test]
    fn test_strip_uses_priority_order() {
        // "x2-3&" is checked before "x".
        assert_eq!(strip_noise_prefixes("-xx2-3&AB"), "AB");
        // "x2-3" without '&' only loses the leading "x".
        assert_eq!(strip_noise_prefixes("x2-3-AB"), "2-3-AB");
    }

    #[test]
    fn test_malformed_identifier() {
        let err = decode("FG0A-CLEAR", 1).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedIdentifier {
                part: "FG0A-CLEAR".to_string(),
                raw: "FG0A-CLEAR".to_string(),
            }
        );
        assert!(err.to_string().contains("FG0A-CLEAR"));
    }

    #[test]
    fn test_malformed_member_reports_raw_identifier() {
        let err = decode("FG0A-CLEAR-OPPOA3/MATTE*2", 1).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedIdentifier {
                part: "MATTE".to_string(),
                raw: "FG0A-CLEAR-OPPOA3/MATTE*2".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_identifier_is_malformed() {
        assert!(matches!(
            decode("", 1),
            Err(Error::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            decode("FG0A-CLEAR-OPPOA3/", 1),
            Err(Error::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            decode("%20x", 1),
            Err(Error::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let raw = "--FG0A-CLEAR-OPPOA3*2/%20xFG0A-MATTE-OPPOA3";
        assert_eq!(decode(raw, 3).unwrap(), decode(raw, 3).unwrap());
    }

    #[test]
    fn test_total_quantity_overflow() {
        let components = decode("A-B-C*4294967295/A-B-D*1", 1).unwrap();
        assert_eq!(components[0].effective_quantity, u32::MAX);

        assert_eq!(
            total_quantity(&components, "A-B-C*4294967295/A-B-D*1"),
            Err(Error::QuantityOverflow {
                product_id: "A-B-C*4294967295/A-B-D*1".to_string(),
            })
        );
        assert_eq!(total_quantity(&components[..1], "A-B-C"), Ok(u32::MAX));
    }
}
