//! Cart and line item types.

use crate::cart::OrderMessage;
use crate::catalog::ProductCodeEntry;
use crate::ids::{ProductCode, ProductId};
use serde::{Deserialize, Serialize};

/// The cart: line items in insertion order plus the panel visibility flag.
///
/// Only `items` is part of the persisted snapshot; `is_open` always starts
/// closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from restored items.
    ///
    /// Zero-quantity entries are dropped and repeated codes are merged into
    /// the first occurrence, so the result upholds the cart invariants even
    /// for a hand-edited snapshot.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|i| i.code == item.code) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of a catalog entry.
    ///
    /// An entry already in the cart has its quantity incremented in place;
    /// a new code is appended with quantity 1.
    pub fn add_item(&mut self, entry: &ProductCodeEntry) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.code == entry.code) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.items.push(LineItem::from_entry(entry));
    }

    /// Remove the item with this code. Returns whether anything was removed.
    pub fn remove_item(&mut self, code: &str) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.code != code);
        self.items.len() < len_before
    }

    /// Set an item's quantity.
    ///
    /// A quantity of zero or below removes the item. Returns whether the
    /// cart changed; unknown codes leave it untouched.
    pub fn update_quantity(&mut self, code: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(code);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|i| i.code == code) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every item. The panel flag is left as is.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get an item by code.
    pub fn get_item(&self, code: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.code == code)
    }

    /// Total item count (sum of quantities).
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct codes.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The URL-escaped order summary, or an empty string for an empty cart.
    pub fn order_message(&self) -> String {
        OrderMessage::from_items(&self.items)
            .map(|m| m.encoded())
            .unwrap_or_default()
    }
}

/// A cart entry keyed by product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub code: ProductCode,
    pub name: String,
    pub diameter: String,
    pub length: String,
    pub surface: String,
    pub product_id: ProductId,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    /// A new line item with quantity 1.
    pub fn from_entry(entry: &ProductCodeEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            diameter: entry.diameter.clone(),
            length: entry.length.clone(),
            surface: entry.surface.clone(),
            product_id: entry.product_id.clone(),
            image: entry.image.clone(),
            quantity: 1,
        }
    }

    /// Size label, e.g. `Ø3.5 × 10mm`.
    pub fn size_label(&self) -> String {
        format!("Ø{} × {}mm", self.diameter, self.length)
    }
}
