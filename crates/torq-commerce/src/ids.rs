//! Newtype identifiers.
//!
//! Using newtypes prevents accidentally mixing up a product id with a
//! product code; both are plain strings on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype string identifiers.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Catalog identifier of a product family (e.g. `implante-torq`).
    ProductId
);
define_id!(
    /// Orderable product code (SKU) of one surface/diameter/length combination.
    ProductCode
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("implante-torq");
        assert_eq!(id.as_str(), "implante-torq");
    }

    #[test]
    fn test_code_from_string() {
        let code: ProductCode = "580760".into();
        assert_eq!(code, "580760");
        assert_eq!(code.to_string(), "580760");
    }

    #[test]
    fn test_code_serializes_as_plain_string() {
        let code = ProductCode::new("525350100");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"525350100\"");

        let back: ProductCode = serde_json::from_str("\"525350100\"").unwrap();
        assert_eq!(back, code);
    }
}
