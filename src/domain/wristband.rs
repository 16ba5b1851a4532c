//! Wristband code handling.
//!
//! A code is `PREFIX-XXXXC`: a 2-3 letter guest-type prefix, four payload
//! characters from a restricted alphabet and one checksum character. The
//! alphabet drops glyphs that misread when handwritten (0/O, 1/L, 6/B,
//! 9/Q); its first 16 characters double as the base-16 digit set used to
//! render the checksum.

use crate::error::ErrorCode;

pub const ALPHABET: &str = "234578ACDEFGHIJKMNPRSTUVWXYZ";

const PAYLOAD_LEN: usize = 5;

fn char_value(c: char) -> Option<usize> {
    ALPHABET.find(c.to_ascii_uppercase())
}

/// Uppercase the code; matching is case-insensitive throughout.
pub fn normalize(code: &str) -> String {
    code.to_ascii_uppercase()
}

/// Shape and alphabet check only, no checksum.
pub fn validate_format(code: &str) -> bool {
    let Some((prefix, payload)) = code.split_once('-') else {
        return false;
    };
    if !(2..=3).contains(&prefix.len()) || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    payload.chars().count() == PAYLOAD_LEN && payload.chars().all(|c| char_value(c).is_some())
}

/// Checksum over the four payload characters:
/// (v0 + 3*v1 + v2 + 3*v3) mod 16, rendered in the alphabet's digit set.
pub fn checksum(payload: &str) -> Option<char> {
    let values: Vec<usize> = payload.chars().map(char_value).collect::<Option<_>>()?;
    if values.len() != PAYLOAD_LEN - 1 {
        return None;
    }
    let sum = values[0] + 3 * values[1] + values[2] + 3 * values[3];
    ALPHABET.chars().nth(sum % 16)
}

/// Format must match and the fifth payload character must equal the
/// checksum of the first four.
pub fn validate(code: &str) -> bool {
    if !validate_format(code) {
        return false;
    }
    let code = normalize(code);
    // split_once cannot fail here, validate_format already accepted it
    let (_, payload) = code.split_once('-').unwrap();
    checksum(&payload[..PAYLOAD_LEN - 1]) == payload.chars().last()
}

/// Format/checksum then color, in that order; uniqueness is the caller's
/// concern since it needs the registry.
pub fn assert_wearable(code: &str, expected_prefix: &str) -> Result<(), ErrorCode> {
    if !validate(code) {
        return Err(ErrorCode::InvalidWristbandCode);
    }
    let normalized = normalize(code);
    let (prefix, _) = normalized.split_once('-').unwrap();
    if prefix != expected_prefix {
        return Err(ErrorCode::WrongWristbandColor);
    }
    Ok(())
}
