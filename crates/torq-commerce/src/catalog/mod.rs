//! Product catalog module.
//!
//! Contains the product family, its surface variants, the code generator,
//! the flattened code list and the catalog image hotspots.

mod code;
mod data;
mod entry;
mod hotspot;
mod product;

pub use code::{generate_code, SHORTEST_LENGTH};
pub use data::{catalog, find_product, require_product, validate_catalog};
pub use entry::{
    find_by_code, find_selection, flatten, generate_product_codes, ProductCodeEntry,
};
pub use hotspot::{
    hotspot_configurations, hotspots_for_product, resolve_hotspots, Hotspot,
    HotspotConfiguration, HotspotPosition,
};
pub use product::{DiameterLengths, Product, SurfaceKey, SurfaceVariant};
