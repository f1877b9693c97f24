//! # Frame Encoder
//!
//! Typed little-endian field accumulator for DS-AIR frames. Writes record a
//! (width, value) pair and advance the running length; nothing is serialized
//! until [`Encoder::finish`], which optionally patches the 2-byte total-length
//! placeholder and then lays the fields out in write order.
//!
//! Every write range-checks its value against the declared width and fails
//! with [`DsAirError::ValueOutOfRange`] instead of truncating: a silently
//! wrapped field corrupts the length accounting for the fixed-firmware
//! receiver.

use crate::constants::FRAME_LENGTH_EXCLUDED;
use crate::error::DsAirError;
use bytes::{BufMut, BytesMut};

/// One recorded field with its declared wire width.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    U8(u8),
    U16(u16),
    U32(u32),
    Bytes(Vec<u8>),
}

/// Accumulates typed fields into a little-endian byte buffer.
#[derive(Debug, Default)]
pub struct Encoder {
    fields: Vec<Field>,
    len: u32,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            fields: Vec::new(),
            len: 0,
        }
    }

    /// Appends a 1-byte unsigned integer.
    pub fn write_u8(&mut self, value: u32) -> Result<(), DsAirError> {
        let byte = u8::try_from(value).map_err(|_| DsAirError::ValueOutOfRange {
            value,
            width: 1,
        })?;
        self.fields.push(Field::U8(byte));
        self.len += 1;
        Ok(())
    }

    /// Appends a 2-byte little-endian unsigned integer.
    pub fn write_u16(&mut self, value: u32) -> Result<(), DsAirError> {
        let word = u16::try_from(value).map_err(|_| DsAirError::ValueOutOfRange {
            value,
            width: 2,
        })?;
        self.fields.push(Field::U16(word));
        self.len += 2;
        Ok(())
    }

    /// Appends a 4-byte little-endian unsigned integer.
    pub fn write_u32(&mut self, value: u32) -> Result<(), DsAirError> {
        self.fields.push(Field::U32(value));
        self.len += 4;
        Ok(())
    }

    /// Appends raw bytes verbatim. No length prefix is added.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.len += data.len() as u32;
        self.fields.push(Field::Bytes(data.to_vec()));
    }

    /// Running length in bytes of everything recorded so far.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Serializes all recorded fields in write order.
    ///
    /// With `rewrite_length` set, the second recorded field must be the
    /// 2-byte total-length placeholder; it is overwritten with the running
    /// length minus the four framing bytes the protocol excludes.
    pub fn finish(mut self, rewrite_length: bool) -> Result<Vec<u8>, DsAirError> {
        if rewrite_length {
            // A frame shorter than the four framing bytes cannot hold a
            // meaningful length field in the first place.
            let patched = self
                .len
                .checked_sub(FRAME_LENGTH_EXCLUDED)
                .ok_or(DsAirError::LengthSlotMissing)?;
            match self.fields.get_mut(1) {
                Some(Field::U16(slot)) => {
                    *slot = u16::try_from(patched).map_err(|_| DsAirError::ValueOutOfRange {
                        value: patched,
                        width: 2,
                    })?;
                }
                _ => return Err(DsAirError::LengthSlotMissing),
            }
        }

        let mut buf = BytesMut::with_capacity(self.len as usize);
        for field in &self.fields {
            match field {
                Field::U8(v) => buf.put_u8(*v),
                Field::U16(v) => buf.put_u16_le(*v),
                Field::U32(v) => buf.put_u32_le(*v),
                Field::Bytes(data) => buf.put_slice(data),
            }
        }
        Ok(buf.to_vec())
    }
}
