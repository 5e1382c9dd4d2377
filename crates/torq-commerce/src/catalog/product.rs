//! Product and surface variant types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Surface treatment key of a variant.
///
/// The two standard surfaces carry their own code prefix; the short line has
/// fixed codes. Any other key is kept verbatim and coded like a standard
/// non-porous surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceKey {
    Porous,
    Vulcano,
    Short,
    Other(String),
}

impl SurfaceKey {
    pub fn as_str(&self) -> &str {
        match self {
            SurfaceKey::Porous => "porous",
            SurfaceKey::Vulcano => "vulcano",
            SurfaceKey::Short => "short",
            SurfaceKey::Other(key) => key,
        }
    }

    /// Three-digit code prefix for the general coding rule.
    pub fn prefix(&self) -> &'static str {
        match self {
            SurfaceKey::Porous => "525",
            _ => "545",
        }
    }
}

impl From<&str> for SurfaceKey {
    fn from(s: &str) -> Self {
        match s {
            "porous" => SurfaceKey::Porous,
            "vulcano" => SurfaceKey::Vulcano,
            "short" => SurfaceKey::Short,
            other => SurfaceKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SurfaceKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SurfaceKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SurfaceKey::from(s.as_str()))
    }
}

/// A product family in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short descriptive text (diameter range).
    pub description: String,
    /// Catalog image reference.
    pub image: String,
    /// Technical features.
    pub features: Vec<String>,
    /// Clinical indications.
    pub indications: Vec<String>,
    /// Surface variants in declaration order.
    pub variations: Vec<SurfaceVariant>,
}

impl Product {
    /// Look up a surface variant by key.
    pub fn variation(&self, key: &SurfaceKey) -> Option<&SurfaceVariant> {
        self.variations.iter().find(|v| &v.key == key)
    }

    /// Number of orderable (surface, diameter, length) combinations.
    pub fn combination_count(&self) -> usize {
        self.variations
            .iter()
            .flat_map(|v| v.diameters.iter())
            .map(|d| d.lengths.len())
            .sum()
    }

    /// Check that surface keys are unique and every variant is well-formed.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut keys = HashSet::new();
        for variant in &self.variations {
            if !keys.insert(&variant.key) {
                return Err(CommerceError::ValidationError(format!(
                    "product {} declares surface {} twice",
                    self.id, variant.key
                )));
            }
            variant.validate()?;
        }
        Ok(())
    }
}

/// A surface treatment with its own diameter/length matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceVariant {
    /// Surface key used by the code generator.
    pub key: SurfaceKey,
    /// Display name (e.g., "Porous").
    pub name: String,
    /// Diameters in declaration order.
    pub diameters: Vec<DiameterLengths>,
}

impl SurfaceVariant {
    /// Lengths available for a diameter.
    pub fn lengths_for(&self, diameter: &str) -> Option<&[String]> {
        self.diameters
            .iter()
            .find(|d| d.diameter == diameter)
            .map(|d| d.lengths.as_slice())
    }

    fn validate(&self) -> Result<(), CommerceError> {
        let mut seen = HashSet::new();
        for entry in &self.diameters {
            if !seen.insert(entry.diameter.as_str()) {
                return Err(CommerceError::ValidationError(format!(
                    "surface {} declares diameter {} twice",
                    self.key, entry.diameter
                )));
            }
            let mut lengths = HashSet::new();
            if let Some(dup) = entry.lengths.iter().find(|l| !lengths.insert(l.as_str())) {
                return Err(CommerceError::ValidationError(format!(
                    "surface {} diameter {} declares length {} twice",
                    self.key, entry.diameter, dup
                )));
            }
        }
        Ok(())
    }
}

/// One diameter and its available lengths, both decimal strings in mm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiameterLengths {
    pub diameter: String,
    pub lengths: Vec<String>,
}

impl DiameterLengths {
    pub fn new(diameter: impl Into<String>, lengths: &[&str]) -> Self {
        Self {
            diameter: diameter.into(),
            lengths: lengths.iter().map(|l| l.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(key: &str, diameters: Vec<DiameterLengths>) -> SurfaceVariant {
        SurfaceVariant {
            key: SurfaceKey::from(key),
            name: key.to_uppercase(),
            diameters,
        }
    }

    fn product(variations: Vec<SurfaceVariant>) -> Product {
        Product {
            id: ProductId::new("test"),
            name: "Test".to_string(),
            description: String::new(),
            image: "test.jpg".to_string(),
            features: Vec::new(),
            indications: Vec::new(),
            variations,
        }
    }

    #[test]
    fn test_surface_key_parse() {
        assert_eq!(SurfaceKey::from("porous"), SurfaceKey::Porous);
        assert_eq!(SurfaceKey::from("short"), SurfaceKey::Short);
        assert_eq!(
            SurfaceKey::from("Porous"),
            SurfaceKey::Other("Porous".to_string())
        );
        assert_eq!(SurfaceKey::from("acid").as_str(), "acid");
    }

    #[test]
    fn test_surface_prefix() {
        assert_eq!(SurfaceKey::Porous.prefix(), "525");
        assert_eq!(SurfaceKey::Vulcano.prefix(), "545");
        assert_eq!(SurfaceKey::from("anything").prefix(), "545");
    }

    #[test]
    fn test_duplicate_surface_rejected() {
        let p = product(vec![
            variant("porous", vec![DiameterLengths::new("3.5", &["10"])]),
            variant("porous", vec![DiameterLengths::new("4.0", &["10"])]),
        ]);
        assert!(matches!(p.validate(), Err(CommerceError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_length_rejected() {
        let p = product(vec![variant(
            "porous",
            vec![DiameterLengths::new("3.5", &["10", "10"])],
        )]);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_combination_count_and_lookup() {
        let p = product(vec![
            variant("porous", vec![DiameterLengths::new("3.5", &["8.5", "10"])]),
            variant("short", vec![DiameterLengths::new("4.3", &["5.5"])]),
        ]);
        assert!(p.validate().is_ok());
        assert_eq!(p.combination_count(), 3);
        let porous = p.variation(&SurfaceKey::Porous).unwrap();
        assert_eq!(porous.lengths_for("3.5").unwrap().len(), 2);
        assert!(porous.lengths_for("5.0").is_none());
    }
}
