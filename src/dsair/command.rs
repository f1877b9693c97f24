//! # Command Variants
//!
//! One variant per device class and operation. Each variant knows how to
//! compose its subbody from a device identity plus, for control commands, a
//! status delta of optional fields.
//!
//! Control and status-query subbodies share one framing rule: a flag byte
//! names the optional fields present, and the field values follow in the
//! exact order the flag bits were scanned. The receiver walks the bits
//! sequentially and reads values positionally, so composition is a single
//! ordered pass that both ORs the bit and queues the value.

use log::warn;

use crate::config::CodecConfig;
use crate::constants::{
    CMD_AIR_CAPABILITY_QUERY, CMD_AIR_RECOMMENDED_INDOOR_TEMP, CMD_CONTROL, CMD_QUERY_STATUS,
    CMD_SYS_ACK, CMD_SYS_GET_ROOM_INFO, CMD_SYS_HAND_SHAKE, CMD_VENT_CAPABILITY_QUERY,
    CMD_VENT_QUERY_COMPOSITE_SITUATION, ROOM_ID_ALL, ROOM_INFO_REFRESH_TYPE,
    VENT_QUERY_STATUS_FLAG,
};
use crate::dsair::encoder::Encoder;
use crate::dsair::frame::{Command, CommandSequence};
use crate::error::DsAirError;
use crate::types::{
    AirCon, AirConStatusDelta, ControlFlags, DeviceClass, DeviceIdentity, FanDirection, FanVolume,
    Ventilation, VentilationStatusDelta,
};

/// Variant-specific payload of an outbound command.
#[derive(Debug, Clone)]
pub enum CommandKind {
    /// Keep-alive; serializes as the 4-byte degenerate frame.
    Heartbeat,
    /// Gateway handshake; header only.
    HandShake,
    /// Room information query for the given room ids.
    GetRoomInfo { room_ids: Vec<u16> },
    /// Air conditioner capability query for the listed devices.
    AirConCapabilityQuery { devices: Vec<DeviceIdentity> },
    /// Recommended indoor temperature query; header only.
    AirConRecommendedIndoorTemp,
    /// Air conditioner status query; the flag byte is derived from the
    /// device's capabilities.
    AirConStatusQuery { device: AirCon, new_version: bool },
    /// Air conditioner control carrying a status delta.
    AirConControl {
        device: AirCon,
        delta: AirConStatusDelta,
        new_version: bool,
    },
    /// Ventilation capability query for the listed devices.
    VentilationCapabilityQuery { devices: Vec<DeviceIdentity> },
    /// Ventilation status query; fixed flag byte.
    VentilationStatusQuery { device: Ventilation },
    /// Ventilation control carrying a status delta.
    VentilationControl {
        device: Ventilation,
        delta: VentilationStatusDelta,
    },
    /// Secondary query answered by small VAM units only.
    VentilationCompositeSituationQuery { device: Ventilation },
}

/// A queued optional-field value with its declared wire width.
#[derive(Debug, Clone, Copy)]
enum FieldValue {
    One(u8),
    Two(u16),
}

impl Command {
    /// Builds a heartbeat keep-alive frame.
    pub fn heartbeat(sequence: &CommandSequence) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::System,
            CMD_SYS_ACK,
            false,
            CommandKind::Heartbeat,
        )
    }

    /// Builds the gateway handshake command.
    pub fn handshake(sequence: &CommandSequence) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::System,
            CMD_SYS_HAND_SHAKE,
            true,
            CommandKind::HandShake,
        )
    }

    /// Builds a room information query. Use [`crate::constants::ROOM_ID_ALL`]
    /// to query every room.
    pub fn get_room_info(sequence: &CommandSequence, room_ids: &[u16]) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::System,
            CMD_SYS_GET_ROOM_INFO,
            true,
            CommandKind::GetRoomInfo {
                room_ids: room_ids.to_vec(),
            },
        )
        .with_subbody_ver(1)
    }

    /// Builds an air conditioner capability query for the listed devices.
    ///
    /// Capability queries address rooms with a single byte; a device whose
    /// room id exceeds 255 fails at serialize time.
    pub fn air_con_capability_query(
        sequence: &CommandSequence,
        devices: &[DeviceIdentity],
    ) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::AirCon,
            CMD_AIR_CAPABILITY_QUERY,
            true,
            CommandKind::AirConCapabilityQuery {
                devices: devices.to_vec(),
            },
        )
    }

    /// Builds the recommended indoor temperature query.
    pub fn air_con_recommended_indoor_temp(sequence: &CommandSequence) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::AirCon,
            CMD_AIR_RECOMMENDED_INDOOR_TEMP,
            true,
            CommandKind::AirConRecommendedIndoorTemp,
        )
    }

    /// Builds an air conditioner status query.
    pub fn air_con_status_query(
        sequence: &CommandSequence,
        device: &AirCon,
        config: &CodecConfig,
    ) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::AirCon,
            CMD_QUERY_STATUS,
            true,
            CommandKind::AirConStatusQuery {
                device: device.clone(),
                new_version: config.new_protocol_version,
            },
        )
    }

    /// Builds an air conditioner control command from a status delta.
    ///
    /// The frame target is derived from the device's subtype flags, not fixed
    /// to the generic air conditioner class: new-style units and bathroom
    /// units answer under their own subtype codes.
    pub fn air_con_control(
        sequence: &CommandSequence,
        device: &AirCon,
        delta: AirConStatusDelta,
        config: &CodecConfig,
    ) -> Command {
        if delta.is_empty() {
            warn!(
                "air conditioner control for room {} unit {} has no fields set; \
                 the gateway will treat it as a no-op",
                device.identity.room_id, device.identity.unit_id
            );
        }
        Command::assemble(
            sequence,
            device.device_class(),
            CMD_CONTROL,
            false,
            CommandKind::AirConControl {
                device: device.clone(),
                delta,
                new_version: config.new_protocol_version,
            },
        )
    }

    /// Builds a ventilation capability query for the listed devices.
    pub fn ventilation_capability_query(
        sequence: &CommandSequence,
        devices: &[DeviceIdentity],
    ) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::Ventilation,
            CMD_VENT_CAPABILITY_QUERY,
            true,
            CommandKind::VentilationCapabilityQuery {
                devices: devices.to_vec(),
            },
        )
    }

    /// Builds a ventilation status query.
    pub fn ventilation_status_query(sequence: &CommandSequence, device: &Ventilation) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::Ventilation,
            CMD_QUERY_STATUS,
            true,
            CommandKind::VentilationStatusQuery {
                device: device.clone(),
            },
        )
    }

    /// Builds a ventilation control command from a status delta.
    pub fn ventilation_control(
        sequence: &CommandSequence,
        device: &Ventilation,
        delta: VentilationStatusDelta,
    ) -> Command {
        if delta.is_empty() {
            warn!(
                "ventilation control for room {} unit {} has no fields set; \
                 the gateway will treat it as a no-op",
                device.identity.room_id, device.identity.unit_id
            );
        }
        Command::assemble(
            sequence,
            DeviceClass::Ventilation,
            CMD_CONTROL,
            false,
            CommandKind::VentilationControl {
                device: device.clone(),
                delta,
            },
        )
    }

    /// Builds the composite situation query for a small VAM unit.
    pub fn ventilation_composite_situation_query(
        sequence: &CommandSequence,
        device: &Ventilation,
    ) -> Command {
        Command::assemble(
            sequence,
            DeviceClass::Ventilation,
            CMD_VENT_QUERY_COMPOSITE_SITUATION,
            true,
            CommandKind::VentilationCompositeSituationQuery {
                device: device.clone(),
            },
        )
    }
}

impl CommandKind {
    /// Appends this variant's subbody to the encoder. Header-only commands
    /// append nothing.
    pub(crate) fn write_subbody(&self, enc: &mut Encoder) -> Result<(), DsAirError> {
        match self {
            CommandKind::Heartbeat
            | CommandKind::HandShake
            | CommandKind::AirConRecommendedIndoorTemp => Ok(()),
            CommandKind::GetRoomInfo { room_ids } => write_room_info(enc, room_ids),
            CommandKind::AirConCapabilityQuery { devices }
            | CommandKind::VentilationCapabilityQuery { devices } => {
                write_capability_query(enc, devices)
            }
            CommandKind::AirConStatusQuery {
                device,
                new_version,
            } => {
                enc.write_u8(u32::from(device.identity.room_id))?;
                enc.write_u8(u32::from(device.identity.unit_id))?;
                let flags = status_query_flags(device, *new_version);
                enc.write_u8(u32::from(flags.bits()))
            }
            CommandKind::AirConControl {
                device,
                delta,
                new_version,
            } => write_air_con_control(enc, device, delta, *new_version),
            CommandKind::VentilationStatusQuery { device } => {
                enc.write_u8(u32::from(device.identity.room_id))?;
                enc.write_u8(u32::from(device.identity.unit_id))?;
                // Fixed flag byte for all ventilation models, matching the
                // vendor firmware's traffic. Do not derive from capabilities.
                enc.write_u8(u32::from(VENT_QUERY_STATUS_FLAG))
            }
            CommandKind::VentilationControl { device, delta } => {
                write_ventilation_control(enc, device, delta)
            }
            CommandKind::VentilationCompositeSituationQuery { device } => {
                enc.write_u8(u32::from(device.identity.room_id))?;
                enc.write_u8(u32::from(device.identity.unit_id))?;
                Ok(())
            }
        }
    }
}

/// Count byte, then a u16 room id per room, each followed by the refresh-type
/// byte unless the room id is the wildcard.
fn write_room_info(enc: &mut Encoder, room_ids: &[u16]) -> Result<(), DsAirError> {
    enc.write_u8(room_ids.len() as u32)?;
    for &room_id in room_ids {
        enc.write_u16(u32::from(room_id))?;
        if room_id != ROOM_ID_ALL {
            enc.write_u8(u32::from(ROOM_INFO_REFRESH_TYPE))?;
        }
    }
    Ok(())
}

/// Count byte, then (room id, 1, 0) per device. One byte per room id.
fn write_capability_query(enc: &mut Encoder, devices: &[DeviceIdentity]) -> Result<(), DsAirError> {
    enc.write_u8(devices.len() as u32)?;
    for device in devices {
        if device.room_id > u16::from(u8::MAX) {
            return Err(DsAirError::RoomIdNotAddressable(device.room_id));
        }
        enc.write_u8(u32::from(device.room_id))?;
        enc.write_u8(1)?;
        enc.write_u8(0)?;
    }
    Ok(())
}

/// Derives the status-query flag byte from the device's capabilities.
///
/// Switch, mode and setpoint are always requested. Fan speed is added when
/// the unit has one at all; the extended-protocol fields are gated on the
/// global toggle, with breathe limited to bathroom units and units with
/// three-dimensional fresh air, and fan direction requiring both louvers to
/// be steerable.
fn status_query_flags(device: &AirCon, new_version: bool) -> ControlFlags {
    let mut flags = ControlFlags::SWITCH | ControlFlags::MODE | ControlFlags::SETTED_TEMP;
    if device.fan_volume != FanVolume::No {
        flags |= ControlFlags::AIR_FLOW;
    }
    if new_version {
        if device.fan_direction1 != FanDirection::Fix && device.fan_direction2 != FanDirection::Fix
        {
            flags |= ControlFlags::FAN_DIRECTION;
        }
        if device.bath_room || device.three_d_fresh {
            flags |= ControlFlags::BREATHE;
        }
        flags |= ControlFlags::HUMIDITY;
    }
    if device.hum_fresh_air {
        flags |= ControlFlags::FRESH_AIR_HUMIDIFICATION;
    }
    flags
}

fn write_air_con_control(
    enc: &mut Encoder,
    device: &AirCon,
    delta: &AirConStatusDelta,
    new_version: bool,
) -> Result<(), DsAirError> {
    let mut flags = ControlFlags::empty();
    let mut queued: Vec<FieldValue> = Vec::new();

    if let Some(switch) = delta.switch {
        flags |= ControlFlags::SWITCH;
        queued.push(FieldValue::One(switch as u8));
    }
    if let Some(mode) = delta.mode {
        flags |= ControlFlags::MODE;
        queued.push(FieldValue::One(mode as u8));
    }
    if let Some(air_flow) = delta.air_flow {
        flags |= ControlFlags::AIR_FLOW;
        queued.push(FieldValue::One(air_flow as u8));
    }
    if let Some(current_temp) = delta.current_temp {
        flags |= ControlFlags::CURRENT_TEMP;
        queued.push(FieldValue::Two(current_temp));
    }
    if let Some(setted_temp) = delta.setted_temp {
        flags |= ControlFlags::SETTED_TEMP;
        queued.push(FieldValue::Two(setted_temp));
    }
    if new_version && device.device_class() != DeviceClass::Bathroom {
        // Both louver directions travel packed into one byte; emitted only
        // when the delta sets both.
        if let (Some(dir1), Some(dir2)) = (delta.fan_direction1, delta.fan_direction2) {
            flags |= ControlFlags::FAN_DIRECTION;
            queued.push(FieldValue::One(dir1 as u8 | (dir2 as u8) << 4));
        }
        if device.device_class() == DeviceClass::NewAirCon {
            if let Some(humidity) = delta.humidity {
                flags |= ControlFlags::HUMIDITY;
                queued.push(FieldValue::One(humidity as u8));
            }
        }
    }

    write_control_subbody(enc, device.identity, flags, &queued)
}

fn write_ventilation_control(
    enc: &mut Encoder,
    device: &Ventilation,
    delta: &VentilationStatusDelta,
) -> Result<(), DsAirError> {
    let mut flags = ControlFlags::empty();
    let mut queued: Vec<FieldValue> = Vec::new();

    if let Some(switch) = delta.switch {
        flags |= ControlFlags::SWITCH;
        queued.push(FieldValue::One(switch as u8));
    }
    if let Some(mode) = delta.mode {
        flags |= ControlFlags::MODE;
        queued.push(FieldValue::One(mode as u8));
    }
    if let Some(air_flow) = delta.air_flow {
        flags |= ControlFlags::AIR_FLOW;
        queued.push(FieldValue::One(air_flow as u8));
    }

    write_control_subbody(enc, device.identity, flags, &queued)
}

/// Room, unit, flag byte, then the queued values in scan order with their
/// declared widths.
fn write_control_subbody(
    enc: &mut Encoder,
    identity: DeviceIdentity,
    flags: ControlFlags,
    queued: &[FieldValue],
) -> Result<(), DsAirError> {
    enc.write_u8(u32::from(identity.room_id))?;
    enc.write_u8(u32::from(identity.unit_id))?;
    enc.write_u8(u32::from(flags.bits()))?;
    for value in queued {
        match value {
            FieldValue::One(v) => enc.write_u8(u32::from(*v))?,
            FieldValue::Two(v) => enc.write_u16(u32::from(*v))?,
        }
    }
    Ok(())
}
