//! # Command Frame Layout
//!
//! This module owns the fixed header/trailer layout shared by every outbound
//! gateway command and the monotonic command-id sequence frames draw from.
//!
//! A frame is: lead byte 2, a 2-byte total-length field (total minus the four
//! framing bytes), reserved byte 13, reserved byte 0, the 1-byte subbody
//! version, reserved byte 0, the 4-byte command id, the 1-byte target
//! category, the 4-byte target subtype, the ack-required byte, the 2-byte
//! command-type code, the variant subbody, and trailer byte 3. All integers
//! are little-endian. The heartbeat keep-alive is a degenerate 4-byte frame
//! that skips the general header entirely.

use std::sync::atomic::{AtomicU32, Ordering};

use log::trace;
use once_cell::sync::Lazy;

use crate::constants::{FRAME_CHECK, FRAME_LEAD, FRAME_TRAILER};
use crate::dsair::command::CommandKind;
use crate::dsair::encoder::Encoder;
use crate::error::DsAirError;
use crate::types::DeviceClass;
use crate::util::hex::encode_hex;

static GLOBAL_SEQUENCE: Lazy<CommandSequence> = Lazy::new(CommandSequence::new);

/// Monotonic source of command ids.
///
/// Every command construction atomically reserves the next id; ids start at 1,
/// are never reused and stay strictly increasing even when frames are built
/// concurrently or discarded before transmission. Tests construct their own
/// sequence for deterministic ids; production code typically shares
/// [`CommandSequence::global`].
#[derive(Debug, Default)]
pub struct CommandSequence {
    next: AtomicU32,
}

impl CommandSequence {
    pub fn new() -> Self {
        CommandSequence {
            next: AtomicU32::new(0),
        }
    }

    /// The process-wide shared sequence.
    pub fn global() -> &'static CommandSequence {
        &GLOBAL_SEQUENCE
    }

    /// Reserves and returns the next command id.
    pub fn next_id(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// One outbound gateway command: frame metadata plus the variant-specific
/// subbody payload.
///
/// Commands are built through the constructors in [`crate::dsair::command`],
/// serialized once with [`Command::serialize`] and handed to the transport
/// collaborator, which uses [`Command::has_result`] to decide whether to
/// await a correlated response.
#[derive(Debug, Clone)]
pub struct Command {
    id: u32,
    target: DeviceClass,
    cmd_type: u16,
    need_ack: bool,
    subbody_ver: u8,
    has_result: bool,
    kind: CommandKind,
}

impl Command {
    pub(crate) fn assemble(
        sequence: &CommandSequence,
        target: DeviceClass,
        cmd_type: u16,
        has_result: bool,
        kind: CommandKind,
    ) -> Self {
        Command {
            id: sequence.next_id(),
            target,
            cmd_type,
            need_ack: true,
            subbody_ver: 0,
            has_result,
            kind,
        }
    }

    pub(crate) fn with_subbody_ver(mut self, subbody_ver: u8) -> Self {
        self.subbody_ver = subbody_ver;
        self
    }

    /// Command id assigned at construction.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Device class this command targets.
    pub fn target(&self) -> DeviceClass {
        self.target
    }

    /// Command-type code serialized into the header.
    pub fn cmd_type(&self) -> u16 {
        self.cmd_type
    }

    /// Whether the transport should await a correlated response frame. Not
    /// serialized.
    pub fn has_result(&self) -> bool {
        self.has_result
    }

    /// Serializes the command to its wire representation.
    pub fn serialize(&self) -> Result<Vec<u8>, DsAirError> {
        let bytes = match self.kind {
            CommandKind::Heartbeat => self.serialize_heartbeat()?,
            _ => self.serialize_general()?,
        };
        trace!(
            "serialized cmd id={} type={} target={:?}: {}",
            self.id,
            self.cmd_type,
            self.target,
            encode_hex(&bytes)
        );
        Ok(bytes)
    }

    /// The keep-alive frame: lead, zero length, trailer. No header, no id on
    /// the wire.
    fn serialize_heartbeat(&self) -> Result<Vec<u8>, DsAirError> {
        let mut enc = Encoder::new();
        enc.write_u8(u32::from(FRAME_LEAD))?;
        enc.write_u16(0)?;
        enc.write_u8(u32::from(FRAME_TRAILER))?;
        enc.finish(false)
    }

    fn serialize_general(&self) -> Result<Vec<u8>, DsAirError> {
        let (category, subtype) = self.target.codes();

        let mut enc = Encoder::new();
        enc.write_u8(u32::from(FRAME_LEAD))?;
        enc.write_u16(0)?; // total-length placeholder, patched in finish
        enc.write_u8(u32::from(FRAME_CHECK))?;
        enc.write_u8(0)?;
        enc.write_u8(u32::from(self.subbody_ver))?;
        enc.write_u8(0)?;
        enc.write_u32(self.id)?;
        enc.write_u8(u32::from(category))?;
        enc.write_u32(subtype)?;
        enc.write_u8(u32::from(self.need_ack))?;
        enc.write_u16(u32::from(self.cmd_type))?;
        self.kind.write_subbody(&mut enc)?;
        enc.write_u8(u32::from(FRAME_TRAILER))?;
        enc.finish(true)
    }
}
