//! Product code generation.
//!
//! A code is `prefix + diameter segment + length segment`:
//!
//! - prefix: `525` for porous, `545` for every other surface
//! - at the shortest standard length (8.5 mm) the diameter segment is the
//!   diameter with its decimal point removed and the length segment is `085`
//! - otherwise both segments come from fixed three-digit tables, with a
//!   generic fallback for values outside them
//!
//! The short line does not follow the rule; its two defined sizes have fixed
//! codes. Unsupported inputs still yield a best-effort string.

use crate::catalog::SurfaceKey;
use crate::ids::ProductCode;

/// Shortest standard length; switches the diameter segment to compact form.
pub const SHORTEST_LENGTH: &str = "8.5";

/// Fixed codes of the short line: (diameter, length, code).
const SHORT_CODES: &[(&str, &str, &str)] = &[("3.75", "6.5", "580760"), ("4.3", "5.5", "568455")];

const DIAMETER_CODES: &[(&str, &str)] = &[
    ("3.5", "350"),
    ("3.75", "375"),
    ("4.0", "400"),
    ("5.0", "500"),
];

const LENGTH_CODES: &[(&str, &str)] = &[
    ("10", "100"),
    ("11.5", "115"),
    ("13", "130"),
    ("15", "150"),
];

/// Derive the product code of a (surface, diameter, length) combination.
///
/// Pure and deterministic: equal inputs always produce equal codes.
pub fn generate_code(surface: &SurfaceKey, diameter: &str, length: &str) -> ProductCode {
    if *surface == SurfaceKey::Short {
        if let Some((_, _, code)) = SHORT_CODES
            .iter()
            .find(|(d, l, _)| *d == diameter && *l == length)
        {
            return ProductCode::new(*code);
        }
    }

    let (diameter_code, length_code) = if length == SHORTEST_LENGTH {
        (compact(diameter), "085".to_string())
    } else {
        (
            lookup(DIAMETER_CODES, diameter).unwrap_or_else(|| compact(diameter)),
            lookup(LENGTH_CODES, length).unwrap_or_else(|| scaled_length(length)),
        )
    };

    ProductCode::new(format!("{}{}{}", surface.prefix(), diameter_code, length_code))
}

fn lookup(table: &[(&str, &str)], key: &str) -> Option<String> {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}

fn compact(value: &str) -> String {
    value.replacen('.', "", 1)
}

/// Tenths of a millimetre, zero-padded to three digits.
///
/// Lengths of 100 mm or more produce four or more digits; unparseable
/// lengths count as zero.
fn scaled_length(length: &str) -> String {
    let value: f64 = length.trim().parse().unwrap_or(0.0);
    let tenths = (value * 10.0).round() as i64;
    format!("{:03}", tenths)
}
