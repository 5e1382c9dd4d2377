//! WhatsApp deep links.

use crate::cart::decode_message;
use crate::error::CommerceError;
use std::fmt;

/// Base of every outbound link.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/";

/// Number used when none is configured.
pub const DEFAULT_PHONE_NUMBER: &str = "5511999999999";

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// User agent markers of mobile browsers with a native WhatsApp handler.
const MOBILE_MARKERS: &[&str] = &[
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Destination of order messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppConfig {
    phone_number: String,
}

impl WhatsAppConfig {
    /// Use `phone_number`, or the placeholder when it is unset or blank.
    pub fn new(phone_number: Option<&str>) -> Self {
        let phone_number = phone_number
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PHONE_NUMBER);
        Self {
            phone_number: phone_number.to_string(),
        }
    }

    /// The configured number as given.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Whether the configured number is the built-in placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.phone_number == DEFAULT_PHONE_NUMBER
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Strip every non-digit character.
pub fn clean_phone_number(phone_number: &str) -> String {
    phone_number.chars().filter(char::is_ascii_digit).collect()
}

/// A number is valid when it has 10 to 15 digits after cleaning.
pub fn validate_phone_number(phone_number: &str) -> bool {
    let digits = clean_phone_number(phone_number).len();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Whether a browser user agent belongs to a mobile device.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// A `wa.me` link carrying a prefilled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    url: String,
    message: String,
}

impl DeepLink {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The escaped message as embedded in the URL.
    pub fn encoded_message(&self) -> &str {
        &self.message
    }

    /// The message as the recipient reads it.
    pub fn decoded_message(&self) -> String {
        decode_message(&self.message)
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Build `https://wa.me/<digits>?text=<message>`.
///
/// `message` must already be URL-escaped. An empty message means there is
/// nothing to send and is rejected with [`CommerceError::EmptyOrder`].
pub fn build_deep_link(config: &WhatsAppConfig, message: &str) -> Result<DeepLink, CommerceError> {
    if message.is_empty() {
        return Err(CommerceError::EmptyOrder);
    }
    let digits = clean_phone_number(config.phone_number());
    Ok(DeepLink {
        url: format!("{}{}?text={}", WHATSAPP_BASE_URL, digits, message),
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_placeholder() {
        assert_eq!(WhatsAppConfig::new(None).phone_number(), DEFAULT_PHONE_NUMBER);
        assert!(WhatsAppConfig::new(Some("   ")).is_placeholder());
        assert_eq!(
            WhatsAppConfig::new(Some(" +55 (11) 98888-7777 ")).phone_number(),
            "+55 (11) 98888-7777"
        );
    }

    #[test]
    fn test_clean_phone_number() {
        assert_eq!(clean_phone_number("+55 (11) 98888-7777"), "5511988887777");
        assert_eq!(clean_phone_number("abc"), "");
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("+55 (11) 98888-7777"));
        assert!(validate_phone_number("1234567890"));
        assert!(validate_phone_number("123456789012345"));
        assert!(!validate_phone_number("123456789"));
        assert!(!validate_phone_number("1234567890123456"));
        assert!(!validate_phone_number(""));
    }

    #[test]
    fn test_build_deep_link() {
        let config = WhatsAppConfig::new(Some("+55 11 99999-0000"));
        let link = build_deep_link(&config, "Ol%C3%A1%20mundo").unwrap();

        assert_eq!(link.url(), "https://wa.me/5511999990000?text=Ol%C3%A1%20mundo");
        assert_eq!(link.decoded_message(), "Olá mundo");
        assert_eq!(link.to_string(), link.url());
    }

    #[test]
    fn test_empty_message_rejected() {
        let result = build_deep_link(&WhatsAppConfig::default(), "");
        assert!(matches!(result, Err(CommerceError::EmptyOrder)));
    }

    #[test]
    fn test_mobile_user_agent() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0"
        ));
    }
}
