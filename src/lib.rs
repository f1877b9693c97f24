//! # dsair-rs - A Rust Crate for the DS-AIR Gateway Command Protocol
//!
//! The dsair-rs crate implements the binary command protocol of the DS-AIR
//! HVAC/ventilation gateway: little-endian command frames for querying and
//! controlling air conditioner and ventilation units behind the gateway.
//!
//! ## Features
//!
//! - Compose capability, status and composite-situation queries per device
//! - Compose control commands from optional-field status deltas, with the
//!   flag byte and field order the fixed firmware expects byte-for-byte
//! - Fixed frame header/trailer layout with automatic length accounting
//! - Process-wide monotonic command ids for response correlation
//! - Fail-fast range checks on every encoded field
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust
//! use dsair_rs::{
//!     AirCon, AirConStatusDelta, CodecConfig, Command, CommandSequence,
//!     DeviceIdentity, Switch,
//! };
//!
//! let sequence = CommandSequence::new();
//! let device = AirCon::minimal(DeviceIdentity::new(3, 1));
//! let delta = AirConStatusDelta {
//!     switch: Some(Switch::On),
//!     ..Default::default()
//! };
//! let cmd = Command::air_con_control(&sequence, &device, delta, &CodecConfig::default());
//! let bytes = cmd.serialize().unwrap();
//! assert!(!cmd.has_result());
//! assert_eq!(bytes.len(), 24);
//! ```
//!
//! The resulting bytes are handed to the transport collaborator, which owns
//! the connection and correlates response frames to command ids. Decoding
//! inbound frames is a sibling concern outside this crate.

pub mod config;
pub mod constants;
pub mod dsair;
pub mod error;
pub mod logging;
pub mod types;
pub mod util;

pub use crate::error::DsAirError;
pub use crate::logging::init_logger;

// Core codec types
pub use config::CodecConfig;
pub use dsair::{Command, CommandKind, CommandSequence, Encoder};

// Device and status value objects
pub use types::{
    AirCon, AirConMode, AirConStatusDelta, AirFlow, ControlFlags, DeviceClass, DeviceIdentity,
    FanDirection, FanVolume, Humidity, Switch, Ventilation, VentilationStatusDelta, VentMode,
};
