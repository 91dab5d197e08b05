//! Base-94 wire codec.
//!
//! Every token body is a run of printable ASCII characters in `!`..=`~`.
//! Each character carries one base-94 digit, `digit = code - 33`.
//!
//! - Integers read those digits positionally, most significant first.
//! - Strings map each digit through [`ALPHABET`], a fixed 94-character
//!   table unrelated to ASCII order.

use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// Number of digits in the wire encoding.
pub const BASE: u32 = 94;

/// ASCII code of digit zero (`!`).
pub const DIGIT_OFFSET: u8 = 33;

/// String alphabet, indexed by base-94 digit.
pub const ALPHABET: &[u8; 94] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`|~ \n";

/// Errors raised while converting between wire bodies and values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A body character lies outside the printable range `!`..=`~`.
    #[error("invalid base-94 digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    /// A message character has no slot in the string alphabet.
    #[error("character {ch:?} at position {position} is not in the string alphabet")]
    NotInAlphabet { ch: char, position: usize },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

fn digit(ch: char, position: usize) -> CodecResult<u8> {
    u8::try_from(ch)
        .ok()
        .and_then(|code| code.checked_sub(DIGIT_OFFSET))
        .filter(|&d| u32::from(d) < BASE)
        .ok_or(CodecError::InvalidDigit { ch, position })
}

fn digit_char(d: u8) -> char {
    char::from(d + DIGIT_OFFSET)
}

/// Decode a big-endian base-94 integer body. The empty body is zero.
pub fn decode_integer(body: &str) -> CodecResult<BigUint> {
    let mut value = BigUint::zero();
    for (position, ch) in body.chars().enumerate() {
        value = value * BASE + u32::from(digit(ch, position)?);
    }
    Ok(value)
}

/// Encode an integer as base-94 digits, least significant digit first.
///
/// Zero encodes as the empty string. Reverse the output (or use
/// [`encode_integer_be`]) to get a body [`decode_integer`] accepts.
pub fn encode_integer(n: &BigUint) -> String {
    if n.is_zero() {
        return String::new();
    }
    n.to_radix_le(BASE).into_iter().map(digit_char).collect()
}

/// Encode an integer as a token body, most significant digit first.
pub fn encode_integer_be(n: &BigUint) -> String {
    if n.is_zero() {
        return String::new();
    }
    n.to_radix_be(BASE).into_iter().map(digit_char).collect()
}

/// Decode a string body through the custom alphabet.
pub fn decode_string(body: &str) -> CodecResult<String> {
    body.chars()
        .enumerate()
        .map(|(position, ch)| digit(ch, position).map(|d| char::from(ALPHABET[usize::from(d)])))
        .collect()
}

/// Encode a message into a string body.
pub fn encode_string(msg: &str) -> CodecResult<String> {
    msg.chars()
        .enumerate()
        .map(|(position, ch)| {
            ALPHABET
                .iter()
                .position(|&b| char::from(b) == ch)
                .and_then(|index| u8::try_from(index).ok())
                .map(digit_char)
                .ok_or(CodecError::NotInAlphabet { ch, position })
        })
        .collect()
}
