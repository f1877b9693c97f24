//! # Hex Encoding/Decoding Utilities
//!
//! Thin wrappers over the `hex` crate used for frame logging and for writing
//! byte-exact test vectors as readable strings.

use crate::error::DsAirError;

/// Encode bytes to lowercase hex string.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode a hex string (upper or lower case, no separators) to bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, DsAirError> {
    hex::decode(s).map_err(|_| DsAirError::InvalidHexString)
}
