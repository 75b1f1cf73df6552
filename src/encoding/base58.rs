//! Base-58 encoding of JSON documents.
//!
//! # Responsibilities
//! - Serialize a document to its canonical compact JSON text
//! - Treat the UTF-8 bytes as one big-endian unsigned integer
//! - Render that integer in the 58-symbol alphabet, most significant first
//!
//! # Design Decisions
//! - Conversion is repeated division of the byte buffer by 58; documents are
//!   kilobytes, so quadratic cost is irrelevant
//! - Each leading zero byte becomes one leading `1`
//! - Forward only: nothing in the service decodes

use serde_json::Value;

use crate::encoding::canonical::canonical_json;

/// Symbols in digit order. `0`, `O`, `I` and `l` are omitted.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode a document: canonical compact JSON text, then base-58 over its bytes.
pub fn encode(value: &Value) -> String {
    encode_bytes(canonical_json(value).as_bytes())
}

/// Encode an arbitrary byte sequence.
pub fn encode_bytes(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // Big-endian base-256 digits of the remaining integer.
    let mut number: Vec<u8> = bytes[leading_zeros..].to_vec();
    let mut digits: Vec<u8> = Vec::with_capacity(number.len() * 138 / 100 + 1);

    while !number.is_empty() {
        let remainder = divide_in_place(&mut number, 58);
        digits.push(ALPHABET[remainder as usize]);
        let significant = number.iter().position(|&b| b != 0).unwrap_or(number.len());
        number.drain(..significant);
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    out.extend(std::iter::repeat(ALPHABET[0] as char).take(leading_zeros));
    out.extend(digits.iter().rev().map(|&d| d as char));
    out
}

/// Divide a big-endian base-256 number by `divisor`, returning the remainder.
fn divide_in_place(number: &mut [u8], divisor: u32) -> u32 {
    let mut remainder = 0u32;
    for byte in number.iter_mut() {
        let acc = (remainder << 8) | u32::from(*byte);
        *byte = (acc / divisor) as u8;
        remainder = acc % divisor;
    }
    remainder
}
