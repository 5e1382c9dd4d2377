//! Shopping cart module.
//!
//! Contains the cart state, line items, the order summary message and the
//! persisted cart store.

mod cart;
mod message;
mod store;

pub use cart::{Cart, LineItem};
pub use message::{decode_message, encode_uri_component, OrderMessage};
pub use store::{CartSnapshot, CartStore, CART_STORAGE_KEY};
