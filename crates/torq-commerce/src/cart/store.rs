//! Persisted cart store.
//!
//! The store owns the cart and snapshots its items after every change that
//! affects them. Persistence is best effort: a failed write is logged and the
//! in-memory cart stays authoritative, and a snapshot that cannot be read
//! restores as an empty cart.

use crate::cart::{Cart, LineItem};
use crate::catalog::ProductCodeEntry;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use torq_cache::Cache;
use tracing::{debug, error, info};

/// Storage key of the cart snapshot.
pub const CART_STORAGE_KEY: &str = "dental-cart-storage";

/// The persisted part of the cart: items only, never the panel flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
}

/// Cart state plus its snapshot storage.
#[derive(Debug)]
pub struct CartStore {
    cart: Cart,
    cache: Cache,
}

impl CartStore {
    /// Restore the cart from `cache`.
    ///
    /// A missing snapshot yields an empty cart. So does a corrupt or
    /// unreadable one, after logging the failure; restore never fails.
    pub fn restore(cache: Cache) -> Self {
        let cart = match cache.get::<CartSnapshot>(CART_STORAGE_KEY) {
            Ok(Some(snapshot)) => {
                let cart = Cart::from_items(snapshot.items);
                debug!(items = cart.unique_item_count(), "cart restored");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                error!(error = %e, "cart rehydration failed, starting empty");
                Cart::new()
            }
        };
        Self { cart, cache }
    }

    /// Add one unit of a catalog entry and persist.
    pub fn add_item(&mut self, entry: &ProductCodeEntry) {
        self.cart.add_item(entry);
        debug!(code = %entry.code, "item added");
        self.commit();
    }

    /// Remove an item and persist. Unknown codes are ignored.
    pub fn remove_item(&mut self, code: &str) {
        if self.cart.remove_item(code) {
            debug!(code, "item removed");
            self.commit();
        }
    }

    /// Set an item's quantity and persist; `quantity <= 0` removes it.
    pub fn update_quantity(&mut self, code: &str, quantity: i64) {
        if self.cart.update_quantity(code, quantity) {
            debug!(code, quantity, "quantity updated");
            self.commit();
        }
    }

    /// Remove every item and persist. The panel flag is left as is.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        info!("cart cleared");
        self.commit();
    }

    /// Flip the panel flag. Never touches storage.
    pub fn toggle_cart(&mut self) {
        self.cart.toggle();
    }

    /// Close the panel. Never touches storage.
    pub fn close_cart(&mut self) {
        self.cart.close();
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart.is_open()
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn get_total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// URL-escaped order summary; empty when there is nothing to send.
    pub fn get_order_message(&self) -> String {
        self.cart.order_message()
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.cart.items().to_vec(),
        }
    }

    /// Write the snapshot, reporting failures to the caller.
    pub fn persist(&self) -> Result<(), CommerceError> {
        self.cache.set(CART_STORAGE_KEY, &self.snapshot())?;
        Ok(())
    }

    /// Give back the underlying storage.
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    fn commit(&self) {
        if let Err(e) = self.persist() {
            error!(error = %e, "failed to persist cart snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_by_code;

    fn entry(code: &str) -> ProductCodeEntry {
        find_by_code(code).unwrap()
    }

    fn stored(cache: &Cache) -> Option<CartSnapshot> {
        cache.get(CART_STORAGE_KEY).unwrap()
    }

    #[test]
    fn test_restore_missing_snapshot_is_empty() {
        let store = CartStore::restore(Cache::in_memory());
        assert!(store.items().is_empty());
        assert!(!store.is_cart_open());
    }

    #[test]
    fn test_restore_corrupt_snapshot_is_empty() {
        let cache = Cache::in_memory();
        cache.set_raw(CART_STORAGE_KEY, b"{\"items\": [oops").unwrap();

        let store = CartStore::restore(cache);
        assert!(store.items().is_empty());
        assert_eq!(store.get_total_items(), 0);
    }

    #[test]
    fn test_restore_wrong_shape_is_empty() {
        let cache = Cache::in_memory();
        cache
            .set_raw(CART_STORAGE_KEY, br#"{"items":[{"code":"580760","quantity":-1}]}"#)
            .unwrap();

        let store = CartStore::restore(cache);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut store = CartStore::restore(Cache::in_memory());
        store.add_item(&entry("525350100"));
        store.add_item(&entry("525350100"));
        store.add_item(&entry("580760"));

        let cache = store.into_cache();
        let snapshot = stored(&cache).unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(snapshot.items[0].quantity, 2);

        let mut store = CartStore::restore(cache);
        store.update_quantity("580760", 4);
        store.remove_item("525350100");
        let cache = store.into_cache();
        let snapshot = stored(&cache).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].code, "580760");
        assert_eq!(snapshot.items[0].quantity, 4);
    }

    #[test]
    fn test_panel_flag_is_not_persisted() {
        let mut store = CartStore::restore(Cache::in_memory());
        store.add_item(&entry("568455"));
        store.toggle_cart();
        assert!(store.is_cart_open());

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert!(json.get("items").is_some());

        let restored = CartStore::restore(store.into_cache());
        assert!(!restored.is_cart_open());
        assert_eq!(restored.get_total_items(), 1);
    }

    #[test]
    fn test_snapshot_wire_layout() {
        let mut store = CartStore::restore(Cache::in_memory());
        store.add_item(&entry("525350100"));

        let json = serde_json::to_value(store.snapshot()).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["code"], "525350100");
        assert_eq!(item["name"], "Implante Torq®");
        assert_eq!(item["diameter"], "3.5");
        assert_eq!(item["length"], "10");
        assert_eq!(item["surface"], "Porous");
        assert_eq!(item["productId"], "implante-torq");
        assert_eq!(item["image"], "implante-torq-catalog.jpg");
        assert_eq!(item["quantity"], 1);
    }

    #[test]
    fn test_clear_persists_empty_items() {
        let mut store = CartStore::restore(Cache::in_memory());
        store.add_item(&entry("525350100"));
        store.toggle_cart();
        store.clear_cart();

        assert!(store.is_cart_open());
        let cache = store.into_cache();
        assert_eq!(stored(&cache).unwrap(), CartSnapshot::default());
    }

    #[test]
    fn test_snapshot_survives_directory_reopen() {
        let tmp = tempfile::tempdir().unwrap();

        let mut store = CartStore::restore(Cache::open_dir(tmp.path()).unwrap());
        store.add_item(&entry("545375130"));
        store.add_item(&entry("545375130"));
        drop(store);

        let store = CartStore::restore(Cache::open_dir(tmp.path()).unwrap());
        assert_eq!(store.get_total_items(), 2);
        assert_eq!(store.items()[0].surface, "Vulcano");
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("store");
        let mut store = CartStore::restore(Cache::open_dir(&dir).unwrap());

        // Replace the store directory with a file so writes fail.
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, b"blocked").unwrap();

        store.add_item(&entry("525350100"));
        assert_eq!(store.get_total_items(), 1);
        assert!(store.persist().is_err());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let a = entry("525375115");
        let b = entry("545500130");

        let mut store = CartStore::restore(Cache::in_memory());
        store.add_item(&a);
        assert_eq!(store.items()[0].quantity, 1);
        store.add_item(&a);
        assert_eq!(store.items()[0].quantity, 2);
        store.add_item(&b);
        store.remove_item(b.code.as_str());

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].code, a.code);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.get_total_items(), 2);

        let message = store.get_order_message();
        assert!(message.contains("525375115"));
    }
}
