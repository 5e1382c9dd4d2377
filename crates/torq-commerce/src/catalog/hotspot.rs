//! Clickable regions on the catalog image.
//!
//! Each hotspot binds a product code to a rectangle expressed in CSS
//! percentages of the catalog image.

use std::sync::OnceLock;

use crate::catalog::{find_by_code, ProductCodeEntry};
use crate::ids::{ProductCode, ProductId};
use serde::{Deserialize, Serialize};

const ROW_WIDTH: &str = "20%";
const ROW_HEIGHT: &str = "1.5%";

/// Rows of the Torq catalog page: (code, top, left).
const TORQ_ROWS: &[(&str, &str, &str)] = &[
    ("52535085", "49.4%", "23%"),
    ("525350100", "51.0%", "23%"),
    ("525350115", "52.7%", "23%"),
    ("525350130", "54.3%", "23%"),
    ("525350150", "55.9%", "23%"),
    ("525375085", "60.4%", "23%"),
    ("525375100", "62.0%", "23%"),
    ("525375115", "63.6%", "23%"),
    ("525375130", "65.3%", "23%"),
    ("525375150", "66.9%", "23%"),
    ("52540085", "71.4%", "23%"),
    ("525400100", "73.0%", "23%"),
    ("525400115", "74.7%", "23%"),
    ("525400130", "76.3%", "23%"),
    ("52550085", "80.8%", "23%"),
    ("525500100", "82.4%", "23%"),
    ("525500115", "84.1%", "23%"),
    ("525500130", "85.7%", "23%"),
    ("54535085", "49.4%", "65%"),
    ("545350100", "51.0%", "65%"),
    ("545350115", "52.7%", "65%"),
    ("545350130", "54.3%", "65%"),
    ("545350150", "55.9%", "65%"),
    ("545375085", "60.4%", "65%"),
    ("545375100", "62.0%", "65%"),
    ("545375115", "63.6%", "65%"),
    ("545375130", "65.3%", "65%"),
    ("545375150", "66.9%", "65%"),
    ("54540085", "71.4%", "65%"),
    ("545400100", "73.0%", "65%"),
    ("545400115", "74.7%", "65%"),
    ("545400130", "76.3%", "65%"),
    ("54550085", "80.8%", "65%"),
    ("545500100", "82.4%", "65%"),
    ("545500115", "84.1%", "65%"),
    ("545500130", "85.7%", "65%"),
    ("580760", "92%", "50%"),
    ("568455", "93.6%", "50%"),
];

/// Rectangle of a hotspot, in CSS percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotPosition {
    pub top: String,
    pub left: String,
    pub width: String,
    pub height: String,
}

/// A clickable region bound to a product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub code: ProductCode,
    pub position: HotspotPosition,
}

/// The hotspots of one product's catalog image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotConfiguration {
    pub product_id: ProductId,
    pub image: String,
    pub hotspots: Vec<Hotspot>,
}

static CONFIGURATIONS: OnceLock<Vec<HotspotConfiguration>> = OnceLock::new();

/// Hotspot configurations of every product that has one.
pub fn hotspot_configurations() -> &'static [HotspotConfiguration] {
    CONFIGURATIONS.get_or_init(|| {
        vec![HotspotConfiguration {
            product_id: ProductId::new("implante-torq"),
            image: "implante-torq-catalog.jpg".to_string(),
            hotspots: TORQ_ROWS
                .iter()
                .map(|(code, top, left)| Hotspot {
                    code: ProductCode::new(*code),
                    position: HotspotPosition {
                        top: top.to_string(),
                        left: left.to_string(),
                        width: ROW_WIDTH.to_string(),
                        height: ROW_HEIGHT.to_string(),
                    },
                })
                .collect(),
        }]
    })
}

/// Hotspots for a product; empty for products without a configuration.
pub fn hotspots_for_product(product_id: &str) -> &'static [Hotspot] {
    hotspot_configurations()
        .iter()
        .find(|c| c.product_id == product_id)
        .map(|c| c.hotspots.as_slice())
        .unwrap_or(&[])
}

/// Pair each hotspot of a product with its catalog entry.
///
/// Hotspots whose code is missing from the catalog are skipped (the lookup
/// logs a warning), so nothing is rendered for them.
pub fn resolve_hotspots(product_id: &str) -> Vec<(&'static Hotspot, ProductCodeEntry)> {
    hotspots_for_product(product_id)
        .iter()
        .filter_map(|h| find_by_code(h.code.as_str()).map(|entry| (h, entry)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torq_hotspots() {
        let hotspots = hotspots_for_product("implante-torq");
        assert_eq!(hotspots.len(), 38);
        assert_eq!(hotspots[0].code, "52535085");
        assert_eq!(hotspots[0].position.top, "49.4%");
        assert_eq!(hotspots[0].position.width, "20%");
    }

    #[test]
    fn test_unknown_product_has_no_hotspots() {
        assert!(hotspots_for_product("nope").is_empty());
        assert!(resolve_hotspots("nope").is_empty());
    }

    #[test]
    fn test_every_hotspot_resolves() {
        let resolved = resolve_hotspots("implante-torq");
        assert_eq!(resolved.len(), hotspots_for_product("implante-torq").len());
        for (hotspot, entry) in resolved {
            assert_eq!(hotspot.code, entry.code);
        }
    }
}
