//! Checkout module.
//!
//! Contains the WhatsApp deep link builder and the ordered hand-off chain
//! that delivers it.

mod handoff;
mod whatsapp;

pub use handoff::{
    Handoff, HandoffError, HandoffFailure, HandoffOutcome, HandoffReport, HandoffStrategy,
};
pub use whatsapp::{
    build_deep_link, clean_phone_number, is_mobile_user_agent, validate_phone_number, DeepLink,
    WhatsAppConfig, DEFAULT_PHONE_NUMBER, WHATSAPP_BASE_URL,
};
