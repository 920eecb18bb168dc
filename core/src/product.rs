//! Sellable catalog entries with stock-tracking fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One sellable item in one locale's catalog.
///
/// Only the stock-tracking fields are modeled explicitly. Display fields
/// (title, price, currency, image URL, tags, …) vary by locale and are
/// carried opaquely in `extra` so the persisted document round-trips
/// unchanged through an inventory update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, unique within a locale list. The same logical
    /// product appears once per locale under the same id.
    pub id: String,
    /// Whether the product is sold out.
    pub sold: bool,
    /// Remaining units in stock.
    pub inventory_quantity: u32,
    /// Append-only audit log of the payment-event identifiers that caused
    /// a decrement for this product. Absent until the first sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<String>>,
    /// Locale-specific display fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// True when a sale can still be recorded against this product.
    #[must_use]
    pub fn has_stock(&self) -> bool {
        !self.sold && self.inventory_quantity > 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_fields_round_trip() {
        let json = serde_json::json!({
            "id": "urban-portrait-7",
            "title": "Urban Portrait #7",
            "sold": false,
            "inventory_quantity": 1,
            "price": 1800,
            "currency": "CAD"
        });

        let product: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(product.id, "urban-portrait-7");
        assert_eq!(product.extra.get("price"), Some(&serde_json::json!(1800)));

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn absent_sales_stays_absent() {
        let json = serde_json::json!({
            "id": "p",
            "sold": false,
            "inventory_quantity": 3
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.sales.is_none());

        let back = serde_json::to_value(&product).unwrap();
        assert!(back.get("sales").is_none());
    }

    #[test]
    fn has_stock_checks_both_fields() {
        let mut product: Product = serde_json::from_value(serde_json::json!({
            "id": "p",
            "sold": false,
            "inventory_quantity": 1
        }))
        .unwrap();
        assert!(product.has_stock());

        product.inventory_quantity = 0;
        assert!(!product.has_stock());

        // A seeded sold flag blocks sales regardless of quantity.
        product.inventory_quantity = 5;
        product.sold = true;
        assert!(!product.has_stock());
    }
}
