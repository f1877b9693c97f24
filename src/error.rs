//! # DS-AIR Error Handling
//!
//! This module defines the DsAirError enum, which represents the different error
//! types that can occur in the dsair-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the DS-AIR crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DsAirError {
    /// A field value exceeds the range of its declared byte width.
    #[error("value {value} out of range for {width}-byte field")]
    ValueOutOfRange { value: u32, width: u8 },

    /// The encoder was finalized with length rewriting, but the second
    /// recorded field is not a 2-byte length placeholder.
    #[error("length placeholder missing: field 1 is not a 2-byte slot")]
    LengthSlotMissing,

    /// A room id does not fit the single byte reserved for it in a
    /// capability-query subbody.
    #[error("room id {0} not addressable in a capability query (must fit one byte)")]
    RoomIdNotAddressable(u16),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// A catch-all error for uncategorized cases.
    #[error("Other error: {0}")]
    Other(String),
}
