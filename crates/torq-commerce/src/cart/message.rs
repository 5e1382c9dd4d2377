//! Order summary message.

use crate::cart::LineItem;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write as _;

/// Characters left unescaped in a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const GREETING: &str = "Olá! Gostaria de fazer o seguinte pedido:";
const CLOSING: &str = "Aguardo retorno com disponibilidade e valores.\n\nObrigado!";

/// Escape a string for use as a single URI component.
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Reverse [`encode_uri_component`]. Invalid UTF-8 sequences are replaced.
pub fn decode_message(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// The human-readable order summary for a non-empty cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    text: String,
}

impl OrderMessage {
    /// Build the summary; `None` when there is nothing to order.
    pub fn from_items(items: &[LineItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let paragraphs: Vec<String> = items.iter().map(paragraph).collect();
        let total: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();

        let text = format!(
            "{}\n\n{}\n\n*Total de itens:* {}\n\n{}",
            GREETING,
            paragraphs.join("\n\n"),
            total,
            CLOSING
        );
        Some(Self { text })
    }

    /// The unescaped text.
    pub fn plain(&self) -> &str {
        &self.text
    }

    /// The text escaped as a URI component, ready for a `text=` parameter.
    pub fn encoded(&self) -> String {
        encode_uri_component(&self.text)
    }
}

fn paragraph(item: &LineItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "*Produto:* {}", item.name);
    let _ = writeln!(out, "*Medidas:* {}", item.size_label());
    let _ = writeln!(out, "*Superfície:* {}", item.surface);
    let _ = writeln!(out, "*Código:* {}", item.code);
    let _ = write!(out, "*Quantidade:* {}", item.quantity);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ProductCode, ProductId};

    fn sample() -> LineItem {
        LineItem {
            code: ProductCode::new("525350085"),
            name: "Implante Torq®".to_string(),
            diameter: "3.5".to_string(),
            length: "8.5".to_string(),
            surface: "Porous".to_string(),
            product_id: ProductId::new("implante-torq"),
            image: "implante-torq-catalog.jpg".to_string(),
            quantity: 2,
        }
    }

    #[test]
    fn test_empty_items_have_no_message() {
        assert!(OrderMessage::from_items(&[]).is_none());
    }

    #[test]
    fn test_single_item_message() {
        let message = OrderMessage::from_items(&[sample()]).unwrap();
        let expected = "Olá! Gostaria de fazer o seguinte pedido:\n\n\
            *Produto:* Implante Torq®\n\
            *Medidas:* Ø3.5 × 8.5mm\n\
            *Superfície:* Porous\n\
            *Código:* 525350085\n\
            *Quantidade:* 2\n\n\
            *Total de itens:* 2\n\n\
            Aguardo retorno com disponibilidade e valores.\n\nObrigado!";
        assert_eq!(message.plain(), expected);
    }

    #[test]
    fn test_encoded_message_fields() {
        let encoded = OrderMessage::from_items(&[sample()]).unwrap().encoded();

        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert!(encoded.contains("Implante%20Torq%C2%AE"));
        assert!(encoded.contains("3.5"));
        assert!(encoded.contains("8.5"));
        assert!(encoded.contains("Porous"));
        assert!(encoded.contains("525350085"));
        assert!(encoded.contains("*Quantidade%3A*%202"));
        assert!(encoded.contains("*Total%20de%20itens%3A*%202"));
        assert_eq!(decode_message(&encoded), OrderMessage::from_items(&[sample()]).unwrap().plain());
    }

    #[test]
    fn test_paragraphs_are_separated() {
        let mut second = sample();
        second.code = ProductCode::new("580760");
        second.quantity = 1;

        let message = OrderMessage::from_items(&[sample(), second]).unwrap();
        assert!(message
            .plain()
            .contains("*Quantidade:* 2\n\n*Produto:* Implante Torq®"));
        assert!(message.plain().contains("*Total de itens:* 3"));
    }

    #[test]
    fn test_encode_uri_component_matches_js() {
        assert_eq!(encode_uri_component("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("Ø"), "%C3%98");
    }
}
