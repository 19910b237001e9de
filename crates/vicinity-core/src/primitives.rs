//! # Core Constants
//!
//! Hardcoded runtime constants for the Vicinity CORE.
//!
//! The codec and the graph builder carry zero configuration; every knob
//! they honor is compiled into the binary and immutable at runtime.

/// Alphabet for short tokens, ordered by ascending digit value.
///
/// 62 characters: `0-9`, `A-Z`, `a-z`. Index in this table IS the digit
/// value, so decoding is a position lookup.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Fixed width of a regular short token, in characters.
///
/// 62^22 > 2^128, so 22 base62 digits cover every 128-bit id. Encoded
/// tokens are left-padded with `'0'` to exactly this width, which keeps
/// the encoding bijective and makes token well-formedness a length check.
pub const TOKEN_LENGTH: usize = 22;

/// Textual form of the sentinel id ("no value/category").
///
/// The nil UUID. The sentinel is exempt from base62 coding: it encodes to
/// this exact string and only this exact string decodes back to it.
pub const SENTINEL_TEXT: &str = "00000000-0000-0000-0000-000000000000";

/// Visual weight of a neighbor node in the rendered graph.
pub const NEIGHBOR_NODE_SIZE: u32 = 7;

/// Visual weight of the root node in the rendered graph.
///
/// Larger than [`NEIGHBOR_NODE_SIZE`] so the root is distinguishable
/// without consulting labels.
pub const ROOT_NODE_SIZE: u32 = 25;

/// Fixed label of the root node.
///
/// The root never gets a host-derived label; it is always marked as the
/// selected result.
pub const ROOT_NODE_LABEL: &str = "Result";

/// Default number of neighbors fetched for a root document.
pub const DEFAULT_NEIGHBOR_COUNT: usize = 3;

/// Upper bound on the neighbor count a fetch may request.
///
/// Keeps the built graph renderable and the fetch computationally bounded.
pub const MAX_NEIGHBOR_COUNT: usize = 50;

/// Path prefix of a shareable result link.
///
/// Full links are `{RESULT_PATH_PREFIX}{token}`.
pub const RESULT_PATH_PREFIX: &str = "/result/";
