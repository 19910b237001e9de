//! # Identifier Codec
//!
//! Reversible mapping between canonical document ids and short, URL-safe
//! tokens.
//!
//! Regular ids encode to exactly [`TOKEN_LENGTH`] base62 characters,
//! left-padded with `'0'` so the width is fixed and the mapping stays
//! bijective. The sentinel id is exempt from coding: it passes through as
//! its own textual form, keeping the well-known "no value" placeholder
//! stable and human-recognizable in links.
//!
//! ## Round-Trip Laws
//!
//! For every id `x` and every well-formed token text `t`:
//! - `decode(encode(x).as_str()) == Ok(x)`
//! - `encode(&decode(t)?).as_str() == t`
//!
//! The all-zero token is NOT well-formed: the zero value belongs to the
//! sentinel, whose only spelling is the passthrough form. Rejecting it is
//! what makes the second law total.
//!
//! No hidden state, no randomness, no I/O.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

use crate::primitives::{BASE62_ALPHABET, SENTINEL_TEXT, TOKEN_LENGTH};
use crate::types::{DocId, VicinityError};

// =============================================================================
// SHORT TOKEN
// =============================================================================

/// A short, URL-safe token in bijection with a canonical id.
///
/// Regular tokens are exactly [`TOKEN_LENGTH`] base62 characters; the
/// sentinel's token is the sentinel's textual form. Node ids derived via
/// [`ShortToken::with_rank`] carry a decimal suffix and are longer than
/// any undecorated token, so the two kinds never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortToken(String);

impl ShortToken {
    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the disambiguated node id for a neighbor at `rank`.
    ///
    /// Appends the 0-based rank index in decimal. Positional and
    /// deterministic: identical inputs always yield identical node ids.
    #[must_use]
    pub fn with_rank(&self, rank: usize) -> Self {
        Self(format!("{}{rank}", self.0))
    }
}

impl fmt::Display for ShortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ShortToken {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Encode a canonical id as a short token.
///
/// Deterministic, total, pure. The sentinel passes through unchanged;
/// every other id becomes the fixed-width base62 rendering of its 128-bit
/// value.
#[must_use]
pub fn encode(id: &DocId) -> ShortToken {
    match id {
        DocId::NoValue => ShortToken(SENTINEL_TEXT.to_string()),
        DocId::Id(uuid) => {
            let mut value = uuid.as_u128();
            let mut buf = [BASE62_ALPHABET[0]; TOKEN_LENGTH];
            let mut pos = TOKEN_LENGTH;
            while value > 0 {
                pos -= 1;
                buf[pos] = BASE62_ALPHABET[(value % 62) as usize];
                value /= 62;
            }
            ShortToken(buf.iter().map(|b| char::from(*b)).collect())
        }
    }
}

/// Decode a short token back to a canonical id.
///
/// Inverse of [`encode`]. The sentinel's fixed form decodes to the
/// sentinel. Everything else must be exactly [`TOKEN_LENGTH`] base62
/// characters whose value is nonzero and fits in 128 bits; anything less
/// fails with [`VicinityError::InvalidToken`].
pub fn decode(token: &str) -> Result<DocId, VicinityError> {
    if token == SENTINEL_TEXT {
        return Ok(DocId::NoValue);
    }

    if token.len() != TOKEN_LENGTH {
        return Err(VicinityError::InvalidToken(format!(
            "expected {TOKEN_LENGTH} base62 characters, got {} in {token:?}",
            token.len()
        )));
    }

    let mut value: u128 = 0;
    for byte in token.bytes() {
        let digit = digit_value(byte).ok_or_else(|| {
            VicinityError::InvalidToken(format!(
                "invalid base62 character {:?} in {token:?}",
                char::from(byte)
            ))
        })?;
        value = value
            .checked_mul(62)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or_else(|| {
                VicinityError::InvalidToken(format!("value out of range in {token:?}"))
            })?;
    }

    if value == 0 {
        return Err(VicinityError::InvalidToken(
            "zero value is reserved for the no-value sentinel".to_string(),
        ));
    }

    Ok(DocId::Id(Uuid::from_u128(value)))
}

/// Digit value of a base62 character. Matches the index in
/// [`BASE62_ALPHABET`].
fn digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'Z' => Some(byte - b'A' + 10),
        b'a'..=b'z' => Some(byte - b'a' + 36),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_fixed_width_base62() {
        let token = encode(&DocId::from_u128(1));
        assert_eq!(token.as_str().len(), TOKEN_LENGTH);
        assert!(token.as_str().bytes().all(|b| digit_value(b).is_some()));
    }

    #[test]
    fn encode_pads_small_values_with_zeros() {
        let token = encode(&DocId::from_u128(1));
        assert_eq!(token.as_str(), "0000000000000000000001");

        let token = encode(&DocId::from_u128(61));
        assert_eq!(token.as_str(), "000000000000000000000z");

        let token = encode(&DocId::from_u128(62));
        assert_eq!(token.as_str(), "0000000000000000000010");
    }

    #[test]
    fn sentinel_passes_through_both_directions() {
        assert_eq!(encode(&DocId::NoValue).as_str(), SENTINEL_TEXT);
        assert_eq!(decode(SENTINEL_TEXT).expect("decode"), DocId::NoValue);
    }

    #[test]
    fn round_trip_decode_of_encode() {
        for value in [1u128, 61, 62, 4096, u128::from(u64::MAX), u128::MAX] {
            let id = DocId::from_u128(value);
            let token = encode(&id);
            assert_eq!(decode(token.as_str()).expect("decode"), id);
        }
    }

    #[test]
    fn round_trip_encode_of_decode() {
        for token in ["0000000000000000000001", "00000000000000000000zZ"] {
            let id = decode(token).expect("decode");
            assert_eq!(encode(&id).as_str(), token);
        }
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert!(matches!(
            decode("abc"),
            Err(VicinityError::InvalidToken(_))
        ));
        assert!(matches!(
            decode(""),
            Err(VicinityError::InvalidToken(_))
        ));
        // One character over
        assert!(matches!(
            decode("00000000000000000000011"),
            Err(VicinityError::InvalidToken(_))
        ));
    }

    #[test]
    fn decode_rejects_non_base62_characters() {
        assert!(matches!(
            decode("not-valid-base62!!----"),
            Err(VicinityError::InvalidToken(_))
        ));
        assert!(matches!(
            decode("000000000000000000000-"),
            Err(VicinityError::InvalidToken(_))
        ));
    }

    #[test]
    fn decode_rejects_values_above_u128() {
        // 62^22 - 1, which exceeds u128::MAX
        assert!(matches!(
            decode("zzzzzzzzzzzzzzzzzzzzzz"),
            Err(VicinityError::InvalidToken(_))
        ));
    }

    #[test]
    fn decode_rejects_all_zero_token() {
        // The zero value is the sentinel's; its only spelling is the
        // passthrough form.
        assert!(matches!(
            decode("0000000000000000000000"),
            Err(VicinityError::InvalidToken(_))
        ));
    }

    #[test]
    fn with_rank_appends_decimal_index() {
        let token = encode(&DocId::from_u128(1));
        let node_id = token.with_rank(2);
        assert_eq!(node_id.as_str(), "00000000000000000000012");
        assert!(node_id.as_str().len() > TOKEN_LENGTH);
    }

    #[test]
    fn token_borrows_as_str_for_map_lookup() {
        use std::collections::BTreeMap;

        let token = encode(&DocId::from_u128(7));
        let mut map = BTreeMap::new();
        map.insert(token.clone(), 7u32);
        assert_eq!(map.get(token.as_str()), Some(&7));
    }
}
