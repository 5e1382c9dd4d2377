//! The static product catalog.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::catalog::{DiameterLengths, Product, SurfaceKey, SurfaceVariant};
use crate::error::CommerceError;
use crate::ids::ProductId;

const STANDARD_LONG: &[&str] = &["8.5", "10", "11.5", "13", "15"];
const STANDARD_WIDE: &[&str] = &["8.5", "10", "11.5", "13"];
const SHORT_LENGTHS: &[&str] = &["6.5", "5.5"];

static CATALOG: OnceLock<Vec<Product>> = OnceLock::new();

/// All products, in declaration order.
pub fn catalog() -> &'static [Product] {
    CATALOG.get_or_init(build_catalog)
}

/// Find a product by id.
pub fn find_product(id: &str) -> Option<&'static Product> {
    catalog().iter().find(|p| p.id == id)
}

/// Find a product by id, failing with [`CommerceError::ProductNotFound`].
pub fn require_product(id: &str) -> Result<&'static Product, CommerceError> {
    find_product(id).ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
}

/// Check product ids are unique and every product is well-formed.
pub fn validate_catalog(products: &[Product]) -> Result<(), CommerceError> {
    let mut ids = HashSet::new();
    for product in products {
        if !ids.insert(&product.id) {
            return Err(CommerceError::ValidationError(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        product.validate()?;
    }
    Ok(())
}

fn standard_diameters() -> Vec<DiameterLengths> {
    vec![
        DiameterLengths::new("3.5", STANDARD_LONG),
        DiameterLengths::new("3.75", STANDARD_LONG),
        DiameterLengths::new("4.0", STANDARD_WIDE),
        DiameterLengths::new("5.0", STANDARD_WIDE),
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build_catalog() -> Vec<Product> {
    vec![Product {
        id: ProductId::new("implante-torq"),
        name: "Implante Torq®".to_string(),
        description: "Ø 3,5 - 3,75 - 4,0 - 5,0".to_string(),
        image: "implante-torq-catalog.jpg".to_string(),
        features: strings(&[
            "TiGr4 Hard®",
            "Macro estrutura cilíndrica",
            "Dupla rosca com ápice ativo, quatro fresados",
            "Cone Morse indexado NP",
            "Rosca interna M 1.6",
            "Bioplatform® (tipo switch)",
            "Linha única de componentes",
        ]),
        indications: strings(&[
            "Implantação estética unitária, parcial e múltipla",
            "Protocolo convencional e carga imediata",
            "Indicação dupla, maxila e mandíbula",
            "Short NP mandíbula, prótese múltipla",
        ]),
        variations: vec![
            SurfaceVariant {
                key: SurfaceKey::Porous,
                name: "Porous".to_string(),
                diameters: standard_diameters(),
            },
            SurfaceVariant {
                key: SurfaceKey::Vulcano,
                name: "Vulcano".to_string(),
                diameters: standard_diameters(),
            },
            SurfaceVariant {
                key: SurfaceKey::Short,
                name: "Short NP BLT".to_string(),
                diameters: vec![
                    DiameterLengths::new("3.75", SHORT_LENGTHS),
                    DiameterLengths::new("4.3", SHORT_LENGTHS),
                ],
            },
        ],
    }]
}
