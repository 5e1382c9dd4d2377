//! Flattened product code entries.

use crate::catalog::{catalog, generate_code, Product};
use crate::ids::{ProductCode, ProductId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One orderable combination, derived from the catalog on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCodeEntry {
    pub code: ProductCode,
    /// Product display name.
    pub name: String,
    pub diameter: String,
    pub length: String,
    /// Surface display name.
    pub surface: String,
    pub product_id: ProductId,
    pub image: String,
}

/// Flatten every product × surface × diameter × length into entries.
///
/// Order follows declaration order at every level.
pub fn flatten(products: &[Product]) -> Vec<ProductCodeEntry> {
    let mut entries = Vec::new();
    for product in products {
        for variant in &product.variations {
            for range in &variant.diameters {
                for length in &range.lengths {
                    entries.push(ProductCodeEntry {
                        code: generate_code(&variant.key, &range.diameter, length),
                        name: product.name.clone(),
                        diameter: range.diameter.clone(),
                        length: length.clone(),
                        surface: variant.name.clone(),
                        product_id: product.id.clone(),
                        image: product.image.clone(),
                    });
                }
            }
        }
    }
    entries
}

/// Every orderable entry of the built-in catalog.
///
/// Recomputed on each call.
pub fn generate_product_codes() -> Vec<ProductCodeEntry> {
    flatten(catalog())
}

/// Find the entry for a product code.
///
/// A miss is logged and reported as `None`; callers skip the code.
pub fn find_by_code(code: &str) -> Option<ProductCodeEntry> {
    let found = generate_product_codes().into_iter().find(|e| e.code == code);
    if found.is_none() {
        warn!(code, "product not found for code");
    }
    found
}

/// Find the entry picked in the selection panel.
///
/// Diameter and length match exactly; the surface matches when its display
/// name contains `surface_key`, ignoring case.
pub fn find_selection(surface_key: &str, diameter: &str, length: &str) -> Option<ProductCodeEntry> {
    let key = surface_key.to_lowercase();
    generate_product_codes().into_iter().find(|e| {
        e.diameter == diameter && e.length == length && e.surface.to_lowercase().contains(&key)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_entry_per_combination() {
        let entries = generate_product_codes();
        assert_eq!(entries.len(), 40);

        let codes: HashSet<_> = entries.iter().map(|e| e.code.clone()).collect();
        assert_eq!(codes.len(), entries.len(), "codes must be unique");
    }

    #[test]
    fn test_repeated_calls_are_equal() {
        assert_eq!(generate_product_codes(), generate_product_codes());
    }

    #[test]
    fn test_declaration_order() {
        let entries = generate_product_codes();
        let first = &entries[0];
        assert_eq!(first.code, "52535085");
        assert_eq!(first.surface, "Porous");
        assert_eq!((first.diameter.as_str(), first.length.as_str()), ("3.5", "8.5"));

        let last = entries.last().unwrap();
        assert_eq!(last.surface, "Short NP BLT");
        assert_eq!((last.diameter.as_str(), last.length.as_str()), ("4.3", "5.5"));
        assert_eq!(last.code, "568455");
    }

    #[test]
    fn test_find_by_code() {
        let entry = find_by_code("580760").unwrap();
        assert_eq!(entry.name, "Implante Torq®");
        assert_eq!(entry.surface, "Short NP BLT");
        assert_eq!(entry.diameter, "3.75");
        assert_eq!(entry.length, "6.5");
        assert_eq!(entry.product_id, "implante-torq");

        assert!(find_by_code("000000").is_none());
    }

    #[test]
    fn test_find_selection() {
        let entry = find_selection("vulcano", "3.75", "13").unwrap();
        assert_eq!(entry.code, "545375130");

        let short = find_selection("SHORT", "4.3", "5.5").unwrap();
        assert_eq!(short.code, "568455");

        assert!(find_selection("porous", "4.0", "15").is_none());
    }

    #[test]
    fn test_entry_wire_names() {
        let entry = find_by_code("525350100").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["productId"], "implante-torq");
        assert_eq!(json["code"], "525350100");
    }
}
