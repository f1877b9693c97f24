//! DS-AIR Protocol Constants
//!
//! This module defines constants used in the DS-AIR gateway protocol
//! implementation: the fixed frame framing bytes, command-type codes and the
//! quirk literals the gateway firmware expects verbatim.

// ----------------------------------------------------------------------------
// Frame framing bytes
// ----------------------------------------------------------------------------

/// Leading reserved byte of every frame
pub const FRAME_LEAD: u8 = 0x02;

/// Trailing reserved byte of every frame
pub const FRAME_TRAILER: u8 = 0x03;

/// Third reserved byte of the general frame header
pub const FRAME_CHECK: u8 = 0x0D;

/// Bytes excluded from the embedded length field: the lead byte, the two
/// length bytes themselves and the trailer
pub const FRAME_LENGTH_EXCLUDED: u32 = 4;

/// Size of the general frame header, from the lead byte up to and including
/// the 2-byte command-type code
pub const FRAME_HEADER_LEN: usize = 19;

// ----------------------------------------------------------------------------
// Command-type codes (shared per-device-class namespaces; the frame target
// field disambiguates)
// ----------------------------------------------------------------------------

/// Control command for air conditioner and ventilation devices
pub const CMD_CONTROL: u16 = 1;

/// Acknowledgment (system); also the command type recorded for heartbeat
/// frames, which never serialize it
pub const CMD_SYS_ACK: u16 = 1;

/// Status query for air conditioner and ventilation devices
pub const CMD_QUERY_STATUS: u16 = 3;

/// Recommended indoor temperature query (air conditioner)
pub const CMD_AIR_RECOMMENDED_INDOOR_TEMP: u16 = 4;

/// Capability query (air conditioner)
pub const CMD_AIR_CAPABILITY_QUERY: u16 = 6;

/// Capability query (ventilation)
pub const CMD_VENT_CAPABILITY_QUERY: u16 = 6;

/// Composite situation query for small VAM ventilation units
pub const CMD_VENT_QUERY_COMPOSITE_SITUATION: u16 = 14;

/// Room information query (system)
pub const CMD_SYS_GET_ROOM_INFO: u16 = 48;

/// Gateway handshake (system)
pub const CMD_SYS_HAND_SHAKE: u16 = 40960;

// ----------------------------------------------------------------------------
// Quirk literals
// ----------------------------------------------------------------------------

/// Flag byte the gateway expects in every ventilation status query. The vendor
/// firmware sends this literal for all ventilation models regardless of the
/// device's capability fields; deriving it from capabilities the way the air
/// conditioner query does changes nothing in the reply but deviates from the
/// reference traffic. Preserve verbatim.
pub const VENT_QUERY_STATUS_FLAG: u8 = 7;

/// Room id wildcard in a room-info query; rooms addressed with it carry no
/// refresh-type byte
pub const ROOM_ID_ALL: u16 = 65535;

/// Refresh type requested for each room in a room-info query
pub const ROOM_INFO_REFRESH_TYPE: u8 = 1;
