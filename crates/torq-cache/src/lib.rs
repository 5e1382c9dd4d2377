//! Type-safe Key-Value snapshot store for the Torq catalog.
//!
//! Provides a small, ergonomic API for keeping client-side state between
//! runs with automatic JSON serialization. Two backends are available:
//! an in-memory map (tests, ephemeral sessions) and a directory of JSON
//! files (one file per key).
//!
//! # Example
//!
//! ```rust,ignore
//! use torq_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Snapshot {
//!     items: Vec<CartItem>,
//! }
//!
//! let cache = Cache::open_dir("/home/me/.local/share/torq/store")?;
//!
//! // Store a value
//! cache.set("dental-cart-storage", &snapshot)?;
//!
//! // Retrieve a value
//! let snapshot: Option<Snapshot> = cache.get("dental-cart-storage")?;
//!
//! // Delete a value
//! cache.delete("dental-cart-storage")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
