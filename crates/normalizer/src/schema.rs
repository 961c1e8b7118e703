//! Order line schema definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product id of the wiping cloth added to every line item.
pub const WIPING_CLOTH_ID: &str = "WIPING-CLOTH";

/// Suffix of synthesized cleaner product ids (spelling is part of the catalog).
pub const CLEANER_SUFFIX: &str = "-CLEANNER";

/// Order line as received from a marketplace export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawLineItem {
    /// Line number in the source order. Missing defaults to 0.
    #[serde(rename = "no", default)]
    pub sequence_hint: u32,
    /// Encoded product identifier (bundles, multipliers, noise prefixes).
    #[serde(rename = "platformProductId")]
    pub raw_identifier: String,
    /// Ordered quantity.
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Unit price reported by the marketplace. Informational only.
    #[serde(rename = "unitPrice", default)]
    pub unit_price: Decimal,
    /// Line total. Authoritative for price apportionment.
    #[serde(rename = "totalPrice")]
    pub total_price: Decimal,
    /// Source platform (e.g., "shopee", "lazada").
    #[serde(rename = "channel", default)]
    pub source_channel: String,
}

/// One bundle member of a raw identifier after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedComponent {
    /// Identifier substring after prefix stripping and bundle splitting.
    pub canonical_part: String,
    /// First two dash segments (e.g., "FG0A-CLEAR").
    pub material_id: String,
    /// Remaining dash segments (e.g., "IPHONE16PROMAX").
    pub model_id: String,
    /// Multiplier override, or the line quantity.
    pub effective_quantity: u32,
}

impl DecodedComponent {
    /// Canonical product id: `{material_id}-{model_id}`.
    pub fn product_id(&self) -> String {
        format!("{}-{}", self.material_id, self.model_id)
    }

    /// Texture code (second segment of the material id), uppercased.
    pub fn texture(&self) -> String {
        self.material_id
            .split('-')
            .nth(1)
            .unwrap_or_default()
            .to_uppercase()
    }
}

/// Normalized order record. Unit of output before and after merging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedRecord {
    #[serde(rename = "no")]
    pub sequence_no: u32,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "materialId", default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(rename = "modelId", default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(rename = "qty")]
    pub quantity: u32,
    #[serde(rename = "unitPrice", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(rename = "totalPrice", with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl NormalizedRecord {
    /// Zero-priced accessory record (cloth or cleaner).
    pub fn accessory(sequence_no: u32, product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            sequence_no,
            product_id: product_id.into(),
            material_id: None,
            model_id: None,
            quantity,
            unit_price: Decimal::ZERO,
            total_price: Decimal::ZERO,
        }
    }

    /// Whether this record is a derived accessory rather than a sold product.
    pub fn is_accessory(&self) -> bool {
        is_accessory(&self.product_id)
    }
}

/// Accessory predicate over a product id: the cloth, or any cleaner.
pub fn is_accessory(product_id: &str) -> bool {
    product_id == WIPING_CLOTH_ID || product_id.ends_with(CLEANER_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_accessory() {
        assert!(is_accessory("WIPING-CLOTH"));
        assert!(is_accessory("CLEAR-CLEANNER"));
        assert!(is_accessory("CUSTOM-MATTE-CLEANNER"));
        assert!(!is_accessory("FG0A-CLEAR-IPHONE16PROMAX"));
        assert!(!is_accessory("WIPING-CLOTH-XL"));
    }

    #[test]
    fn test_component_texture_is_uppercased() {
        let component = DecodedComponent {
            canonical_part: "fg0a-clear-oppoa3".to_string(),
            material_id: "fg0a-clear".to_string(),
            model_id: "oppoa3".to_string(),
            effective_quantity: 1,
        };
        assert_eq!(component.texture(), "CLEAR");
        assert_eq!(component.product_id(), "fg0a-clear-oppoa3");
    }

    #[test]
    fn test_raw_line_item_accepts_numeric_prices() {
        let json = r#"{
            "no": 1,
            "platformProductId": "FG0A-CLEAR-IPHONE16PROMAX",
            "qty": 2,
            "unitPrice": 50,
            "totalPrice": 100.5
        }"#;

        let item: RawLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.sequence_hint, 1);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.total_price, Decimal::new(1005, 1));
        assert_eq!(item.source_channel, "");
    }

    #[test]
    fn test_raw_line_item_defaults_informational_fields() {
        let json = r#"{ "platformProductId": "FG0A-CLEAR-OPPOA3", "qty": 1, "totalPrice": 40 }"#;

        let item: RawLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.sequence_hint, 0);
        assert_eq!(item.unit_price, Decimal::ZERO);
        assert_eq!(item.total_price, Decimal::from(40));
    }

    #[test]
    fn test_accessory_omits_material_and_model() {
        let record = NormalizedRecord::accessory(3, WIPING_CLOTH_ID, 2);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["no"], 3);
        assert_eq!(value["productId"], "WIPING-CLOTH");
        assert_eq!(value["qty"], 2);
        assert_eq!(value["unitPrice"], 0.0);
        assert!(value.get("materialId").is_none());
        assert!(value.get("modelId").is_none());
    }
}
