//! The persisted product catalog and the sale-recording transition.
//!
//! The catalog holds two parallel product lists, one per locale, joined by
//! product id. `record_sale` is the pure core of the inventory update
//! engine: it locates a product, applies the admission-control check, and
//! performs the decrement/sold-flag/audit-log transition in memory.
//!
//! **Concurrency**: this module is pure and knows nothing about locking.
//! Callers must serialize mutations per storage path (see the path-keyed
//! gate in `atelier-store`), otherwise two callers could both pass the
//! admission check against stale state and over-sell.

use crate::product::Product;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Data Structures
// ============================================================================

/// Locale tags for the two parallel product lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English
    En,
    /// French
    Fr,
}

impl Locale {
    /// Fixed search order when locating a product by id: English first,
    /// then French.
    pub const SEARCH_ORDER: [Self; 2] = [Self::En, Self::Fr];
}

/// The root persisted document: one ordered product list per locale plus
/// opaque passthrough keys (shipping info, print editions, …).
///
/// The two lists are expected to describe the same set of logical products
/// (joined by id), but nothing here enforces cross-locale consistency: a
/// sale mutates whichever entry matches first in [`Locale::SEARCH_ORDER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// English product list.
    pub products_en: Vec<Product>,
    /// French product list.
    pub products_fr: Vec<Product>,
    /// Remaining document keys, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of applying a sale to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    /// Stock was decremented by one; carries the mutated product.
    Sold(Product),
    /// The product exists but is flagged sold or has no remaining
    /// inventory; carries the unmodified product. No mutation occurred.
    AlreadySold(Product),
    /// No product with the requested id in either locale list.
    NotFound,
}

// ============================================================================
// Catalog Operations
// ============================================================================

impl Catalog {
    /// Product list for a locale.
    #[must_use]
    pub fn products(&self, locale: Locale) -> &[Product] {
        match locale {
            Locale::En => &self.products_en,
            Locale::Fr => &self.products_fr,
        }
    }

    fn products_mut(&mut self, locale: Locale) -> &mut Vec<Product> {
        match locale {
            Locale::En => &mut self.products_en,
            Locale::Fr => &mut self.products_fr,
        }
    }

    /// Locate a product by id, scanning locale lists in
    /// [`Locale::SEARCH_ORDER`] and each list in list order.
    #[must_use]
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        Locale::SEARCH_ORDER
            .into_iter()
            .find_map(|locale| self.products(locale).iter().find(|p| p.id == id))
    }

    /// Mutable variant of [`Catalog::find_product`].
    pub fn find_product_mut(&mut self, id: &str) -> Option<&mut Product> {
        let locale = Locale::SEARCH_ORDER
            .into_iter()
            .find(|&locale| self.products(locale).iter().any(|p| p.id == id))?;
        self.products_mut(locale).iter_mut().find(|p| p.id == id)
    }

    /// Record one sale against the product with the given id.
    ///
    /// The first matching product (per [`Locale::SEARCH_ORDER`]) is checked
    /// for remaining stock; a product that is flagged sold or has zero
    /// quantity fails the admission check even if the other locale's entry
    /// would pass. On success the quantity drops by exactly one, the sold
    /// flag flips to `true` when the quantity reaches zero (and is never
    /// reset by this transition), and `payment_event_id`, when provided,
    /// is appended to the product's `sales` audit log.
    ///
    /// Duplicate `payment_event_id`s are recorded, not rejected: the log is
    /// an audit trail, and a redelivered payment event decrements again
    /// while stock remains.
    #[must_use]
    pub fn record_sale(&mut self, id: &str, payment_event_id: Option<&str>) -> SaleOutcome {
        let Some(product) = self.find_product_mut(id) else {
            return SaleOutcome::NotFound;
        };

        if !product.has_stock() {
            return SaleOutcome::AlreadySold(product.clone());
        }

        product.inventory_quantity -= 1;
        if product.inventory_quantity == 0 {
            product.sold = true;
        }

        let sales = product.sales.get_or_insert_with(Vec::new);
        if let Some(event_id) = payment_event_id {
            sales.push(event_id.to_owned());
        }

        SaleOutcome::Sold(product.clone())
    }
}
