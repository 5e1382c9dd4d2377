//! Catalog, product codes and cart logic for the Torq implant catalog.
//!
//! This crate provides the reusable core behind the ordering front-end:
//!
//! - **Catalog**: the static product family, its surface variants and the
//!   diameter/length matrix of each, plus the catalog image hotspots
//! - **Codes**: the deterministic (surface, diameter, length) → code rule and
//!   the flattened list of every orderable combination
//! - **Cart**: line items keyed by code, totals, the order summary message
//!   and a store that snapshots the items between runs
//! - **Checkout**: the `wa.me` deep link and the ordered hand-off chain
//!
//! # Example
//!
//! ```rust,ignore
//! use torq_commerce::prelude::*;
//! use torq_cache::Cache;
//!
//! let mut store = CartStore::restore(Cache::in_memory());
//!
//! if let Some(entry) = find_by_code("525350100") {
//!     store.add_item(&entry);
//! }
//!
//! let message = store.get_order_message();
//! if !message.is_empty() {
//!     let link = build_deep_link(&WhatsAppConfig::default(), &message)?;
//!     println!("{}", link);
//! }
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        catalog, find_by_code, find_product, find_selection, generate_code,
        generate_product_codes, hotspots_for_product, resolve_hotspots, DiameterLengths, Hotspot,
        HotspotPosition, Product, ProductCodeEntry, SurfaceKey, SurfaceVariant,
    };

    // Cart
    pub use crate::cart::{Cart, CartSnapshot, CartStore, LineItem, OrderMessage, CART_STORAGE_KEY};

    // Checkout
    pub use crate::checkout::{
        build_deep_link, validate_phone_number, DeepLink, Handoff, HandoffOutcome, HandoffReport,
        HandoffStrategy, WhatsAppConfig,
    };
}
