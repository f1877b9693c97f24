//! # DS-AIR Device and Status Types
//!
//! Value objects shared between the codec and its collaborators: device class
//! tags, addressable identities, capability descriptors populated by the
//! device registry, the control-field bitmask and the optional-field status
//! deltas used by control commands.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Device class of a frame target, identified on the wire by a
/// (category, subtype) code pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    System,
    AirCon,
    Geothermic,
    Ventilation,
    Hd,
    NewAirCon,
    Bathroom,
}

impl DeviceClass {
    /// Wire codes of this device class: 1-byte category and 4-byte subtype.
    pub fn codes(self) -> (u8, u32) {
        match self {
            DeviceClass::System => (0, 0),
            DeviceClass::AirCon => (8, 18),
            DeviceClass::Geothermic => (8, 19),
            DeviceClass::Ventilation => (8, 20),
            DeviceClass::Hd => (8, 22),
            DeviceClass::NewAirCon => (8, 23),
            DeviceClass::Bathroom => (8, 24),
        }
    }
}

/// Addressable identity of one physical device within a room.
///
/// The codec never fabricates identities; they come from the external device
/// registry. Field widths match the protocol ranges, so every identity that
/// can be constructed is representable in a general frame. Capability-query
/// subbodies reserve a single byte for the room id and re-check at encode
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub room_id: u16,
    pub unit_id: u8,
}

impl DeviceIdentity {
    pub fn new(room_id: u16, unit_id: u8) -> Self {
        DeviceIdentity { room_id, unit_id }
    }
}

bitflags! {
    /// Bitmask naming the optional control fields present in a control or
    /// status-query subbody.
    ///
    /// Invariant: the bits set must exactly match, in scan order, the fields
    /// actually serialized after the flag byte; the receiver walks the bits
    /// sequentially and reads values positionally.
    ///
    /// `FRESH_AIR_HUMIDIFICATION` shares the `CURRENT_TEMP` bit position:
    /// query masks never request the current temperature and control payloads
    /// never carry fresh-air humidification, so the byte stays unambiguous
    /// for each command kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ControlFlags: u8 {
        const SWITCH = 0x01;
        const MODE = 0x02;
        const AIR_FLOW = 0x04;
        const CURRENT_TEMP = 0x08;
        const SETTED_TEMP = 0x10;
        const FAN_DIRECTION = 0x20;
        const HUMIDITY = 0x40;
        const BREATHE = 0x80;
        const FRESH_AIR_HUMIDIFICATION = 0x08;
    }
}

/// Switch state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Switch {
    Off = 0,
    On = 1,
}

/// Operating mode of an air conditioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum AirConMode {
    Cold = 0,
    Dry = 1,
    Vent = 2,
    Auto = 3,
    Heat = 4,
    AutoDry = 5,
    Relax = 6,
    Sleep = 7,
    MoreDry = 8,
    PreHeat = 9,
}

/// Operating mode of a ventilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum VentMode {
    Auto = 0,
    Smart = 1,
    Sleep = 2,
    On = 3,
}

/// Fan speed setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum AirFlow {
    SuperWeak = 0,
    Weak = 1,
    Middle = 2,
    Strong = 3,
    SuperStrong = 4,
    Auto = 5,
}

/// Fan direction capability and setting. `Fix` marks a louver that cannot be
/// steered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FanDirection {
    Fix = 0,
    Step1 = 1,
    Step2 = 2,
    Step3 = 3,
    Step4 = 4,
    Step5 = 5,
}

/// Fan volume capability reported by the device. `No` marks a unit without an
/// adjustable fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FanVolume {
    No = 0,
    Fix = 1,
    Step2 = 2,
    Step3 = 3,
    Step4 = 4,
    Step5 = 5,
    Stepless = 7,
}

/// Humidification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Humidity {
    Close = 0,
    Step1 = 1,
    Step2 = 2,
    Step3 = 3,
}

/// An air conditioner as described by the device registry: identity plus the
/// capability fields that gate optional command fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirCon {
    pub identity: DeviceIdentity,
    /// New-style air conditioner subtype; the only subtype with a
    /// controllable humidifier.
    pub new_air_con: bool,
    /// Bathroom unit; excluded from fan-direction control.
    pub bath_room: bool,
    pub fan_volume: FanVolume,
    pub fan_direction1: FanDirection,
    pub fan_direction2: FanDirection,
    /// Supports three-dimensional fresh air.
    pub three_d_fresh: bool,
    /// Supports humidified fresh air.
    pub hum_fresh_air: bool,
}

impl AirCon {
    /// An air conditioner with no optional capabilities, for registries that
    /// only know the address so far.
    pub fn minimal(identity: DeviceIdentity) -> Self {
        AirCon {
            identity,
            new_air_con: false,
            bath_room: false,
            fan_volume: FanVolume::No,
            fan_direction1: FanDirection::Fix,
            fan_direction2: FanDirection::Fix,
            three_d_fresh: false,
            hum_fresh_air: false,
        }
    }

    /// Device class used as the control-command target for this unit.
    pub fn device_class(&self) -> DeviceClass {
        if self.new_air_con {
            DeviceClass::NewAirCon
        } else if self.bath_room {
            DeviceClass::Bathroom
        } else {
            DeviceClass::AirCon
        }
    }
}

/// A ventilation unit as described by the device registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ventilation {
    pub identity: DeviceIdentity,
    /// Small VAM model; the only model answering composite situation queries.
    pub small_vam: bool,
}

impl Ventilation {
    pub fn new(identity: DeviceIdentity, small_vam: bool) -> Self {
        Ventilation {
            identity,
            small_vam,
        }
    }
}

/// Requested changes to an air conditioner's controllable fields. Unset
/// fields are left unchanged by the gateway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirConStatusDelta {
    pub switch: Option<Switch>,
    pub mode: Option<AirConMode>,
    pub air_flow: Option<AirFlow>,
    /// Current temperature report, tenths of a degree.
    pub current_temp: Option<u16>,
    /// Temperature setpoint, tenths of a degree.
    pub setted_temp: Option<u16>,
    pub fan_direction1: Option<FanDirection>,
    pub fan_direction2: Option<FanDirection>,
    pub humidity: Option<Humidity>,
}

impl AirConStatusDelta {
    /// True when no field is set; such a delta encodes to a no-op command.
    pub fn is_empty(&self) -> bool {
        self.switch.is_none()
            && self.mode.is_none()
            && self.air_flow.is_none()
            && self.current_temp.is_none()
            && self.setted_temp.is_none()
            && self.fan_direction1.is_none()
            && self.fan_direction2.is_none()
            && self.humidity.is_none()
    }
}

/// Requested changes to a ventilation unit's controllable fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VentilationStatusDelta {
    pub switch: Option<Switch>,
    pub mode: Option<VentMode>,
    pub air_flow: Option<AirFlow>,
}

impl VentilationStatusDelta {
    /// True when no field is set; such a delta encodes to a no-op command.
    pub fn is_empty(&self) -> bool {
        self.switch.is_none() && self.mode.is_none() && self.air_flow.is_none()
    }
}
