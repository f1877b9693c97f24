//! Unit tests for the `dsair::command` module: subbody composition for every
//! query and control variant, flag-byte derivation and field gating.

use dsair_rs::constants::FRAME_HEADER_LEN;
use dsair_rs::{
    AirCon, AirConMode, AirConStatusDelta, AirFlow, CodecConfig, Command, CommandSequence,
    ControlFlags, DeviceIdentity, DsAirError, FanDirection, FanVolume, Humidity, Switch,
    Ventilation, VentilationStatusDelta, VentMode,
};

/// The variant payload between the fixed header and the trailer byte.
fn subbody(bytes: &[u8]) -> &[u8] {
    &bytes[FRAME_HEADER_LEN..bytes.len() - 1]
}

fn steerable_air_con(room_id: u16, unit_id: u8) -> AirCon {
    AirCon {
        identity: DeviceIdentity::new(room_id, unit_id),
        new_air_con: false,
        bath_room: false,
        fan_volume: FanVolume::Step5,
        fan_direction1: FanDirection::Step1,
        fan_direction2: FanDirection::Step1,
        three_d_fresh: false,
        hum_fresh_air: false,
    }
}

// ---------------------------------------------------------------------------
// Capability queries
// ---------------------------------------------------------------------------

/// Tests the capability-query subbody shape and length arithmetic: the full
/// frame is 21 + 3n bytes and the embedded length field is that minus 4.
#[test]
fn test_air_con_capability_query_layout() {
    let sequence = CommandSequence::new();
    let devices = vec![
        DeviceIdentity::new(1, 1),
        DeviceIdentity::new(7, 2),
        DeviceIdentity::new(250, 1),
    ];
    let cmd = Command::air_con_capability_query(&sequence, &devices);
    assert!(cmd.has_result());

    let bytes = cmd.serialize().unwrap();
    assert_eq!(bytes.len(), 21 + 3 * devices.len());
    let embedded = u16::from_le_bytes([bytes[1], bytes[2]]) as usize;
    assert_eq!(embedded, bytes.len() - 4);

    assert_eq!(subbody(&bytes), &[3, 1, 1, 0, 7, 1, 0, 250, 1, 0]);
    // target: air conditioner (8, 18), command type 6
    assert_eq!(bytes[11], 8);
    assert_eq!(&bytes[12..16], &18u32.to_le_bytes());
    assert_eq!(&bytes[17..19], &6u16.to_le_bytes());
}

/// Tests that a capability query refuses a room id that does not fit the
/// single byte the subbody reserves for it.
#[test]
fn test_capability_query_rejects_wide_room_id() {
    let sequence = CommandSequence::new();
    let cmd = Command::air_con_capability_query(&sequence, &[DeviceIdentity::new(256, 1)]);
    assert_eq!(
        cmd.serialize(),
        Err(DsAirError::RoomIdNotAddressable(256))
    );
}

/// Tests that the ventilation capability query shares the air-conditioner
/// shape but targets the ventilation class.
#[test]
fn test_ventilation_capability_query_layout() {
    let sequence = CommandSequence::new();
    let cmd = Command::ventilation_capability_query(&sequence, &[DeviceIdentity::new(9, 1)]);
    let bytes = cmd.serialize().unwrap();
    assert_eq!(subbody(&bytes), &[1, 9, 1, 0]);
    assert_eq!(bytes[11], 8);
    assert_eq!(&bytes[12..16], &20u32.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Status queries
// ---------------------------------------------------------------------------

/// Tests that a plain air conditioner without a fan speed requests exactly
/// switch, mode and setpoint.
#[test]
fn test_status_query_base_flags() {
    let sequence = CommandSequence::new();
    let mut device = steerable_air_con(5, 2);
    device.fan_volume = FanVolume::No;
    device.fan_direction1 = FanDirection::Fix;

    let cmd = Command::air_con_status_query(&sequence, &device, &CodecConfig::default());
    let bytes = cmd.serialize().unwrap();
    let expected = ControlFlags::SWITCH | ControlFlags::MODE | ControlFlags::SETTED_TEMP;
    assert_eq!(subbody(&bytes), &[5, 2, expected.bits()]);
}

/// Tests that a reported fan speed capability adds the air-flow flag.
#[test]
fn test_status_query_fan_volume_adds_air_flow() {
    let sequence = CommandSequence::new();
    let mut device = steerable_air_con(5, 2);
    device.fan_direction1 = FanDirection::Fix;
    let cmd = Command::air_con_status_query(&sequence, &device, &CodecConfig::default());
    let bytes = cmd.serialize().unwrap();
    assert_eq!(subbody(&bytes)[2], 0x13 | ControlFlags::AIR_FLOW.bits());
}

/// Tests the extended-protocol derivation for a bathroom unit: breathe and
/// humidity are added, but never fan direction while a louver is fixed.
#[test]
fn test_status_query_new_version_bathroom() {
    let sequence = CommandSequence::new();
    let mut device = steerable_air_con(5, 2);
    device.bath_room = true;
    device.fan_direction2 = FanDirection::Fix;

    let cmd = Command::air_con_status_query(&sequence, &device, &CodecConfig::new_version());
    let bytes = cmd.serialize().unwrap();
    let flags = ControlFlags::from_bits_retain(subbody(&bytes)[2]);
    assert!(flags.contains(ControlFlags::BREATHE));
    assert!(flags.contains(ControlFlags::HUMIDITY));
    assert!(!flags.contains(ControlFlags::FAN_DIRECTION));
}

/// Tests that fan direction is requested only when both louvers are
/// steerable and the extended protocol is active.
#[test]
fn test_status_query_fan_direction_gating() {
    let sequence = CommandSequence::new();
    let device = steerable_air_con(5, 2);

    let old = Command::air_con_status_query(&sequence, &device, &CodecConfig::default());
    let old_flags = ControlFlags::from_bits_retain(subbody(&old.serialize().unwrap())[2]);
    assert!(!old_flags.contains(ControlFlags::FAN_DIRECTION));

    let new = Command::air_con_status_query(&sequence, &device, &CodecConfig::new_version());
    let new_flags = ControlFlags::from_bits_retain(subbody(&new.serialize().unwrap())[2]);
    assert!(new_flags.contains(ControlFlags::FAN_DIRECTION));
    assert!(new_flags.contains(ControlFlags::HUMIDITY));
}

/// Tests that three-dimensional fresh air adds breathe like a bathroom unit
/// does, and humidified fresh air is requested on either protocol version.
#[test]
fn test_status_query_fresh_air_flags() {
    let sequence = CommandSequence::new();
    let mut device = steerable_air_con(5, 2);
    device.three_d_fresh = true;
    device.hum_fresh_air = true;

    let new = Command::air_con_status_query(&sequence, &device, &CodecConfig::new_version());
    let new_flags = ControlFlags::from_bits_retain(subbody(&new.serialize().unwrap())[2]);
    assert!(new_flags.contains(ControlFlags::BREATHE));
    assert!(new_flags.contains(ControlFlags::FRESH_AIR_HUMIDIFICATION));

    let old = Command::air_con_status_query(&sequence, &device, &CodecConfig::default());
    let old_flags = ControlFlags::from_bits_retain(subbody(&old.serialize().unwrap())[2]);
    assert!(old_flags.contains(ControlFlags::FRESH_AIR_HUMIDIFICATION));
    assert!(!old_flags.contains(ControlFlags::BREATHE));
}

/// Tests that the ventilation status query always carries the literal flag
/// byte 7, independent of anything on the device.
#[test]
fn test_ventilation_status_query_literal_flag() {
    let sequence = CommandSequence::new();
    for small_vam in [false, true] {
        let vent = Ventilation::new(DeviceIdentity::new(4, 3), small_vam);
        let cmd = Command::ventilation_status_query(&sequence, &vent);
        let bytes = cmd.serialize().unwrap();
        assert_eq!(subbody(&bytes), &[4, 3, 7]);
    }
}

/// Tests the composite situation query subbody: room and unit only.
#[test]
fn test_composite_situation_query() {
    let sequence = CommandSequence::new();
    let vent = Ventilation::new(DeviceIdentity::new(6, 1), true);
    let cmd = Command::ventilation_composite_situation_query(&sequence, &vent);
    assert!(cmd.has_result());
    let bytes = cmd.serialize().unwrap();
    assert_eq!(subbody(&bytes), &[6, 1]);
    assert_eq!(&bytes[17..19], &14u16.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Control commands
// ---------------------------------------------------------------------------

/// Tests that a switch-only control serializes to room, unit, the switch bit
/// and a single value byte, independent of the protocol version.
#[test]
fn test_control_switch_only() {
    let sequence = CommandSequence::new();
    let device = steerable_air_con(3, 1);
    let delta = AirConStatusDelta {
        switch: Some(Switch::On),
        ..Default::default()
    };

    for config in [CodecConfig::default(), CodecConfig::new_version()] {
        let cmd = Command::air_con_control(&sequence, &device, delta, &config);
        assert!(!cmd.has_result());
        let bytes = cmd.serialize().unwrap();
        assert_eq!(subbody(&bytes), &[3, 1, ControlFlags::SWITCH.bits(), 1]);
    }
}

/// Tests the full field ordering of an air conditioner control: values follow
/// the flag byte in the fixed scan order with their declared widths.
#[test]
fn test_control_field_order_and_widths() {
    let sequence = CommandSequence::new();
    let mut device = steerable_air_con(3, 1);
    device.new_air_con = true;
    let delta = AirConStatusDelta {
        switch: Some(Switch::On),
        mode: Some(AirConMode::Heat),
        air_flow: Some(AirFlow::Middle),
        current_temp: Some(221),
        setted_temp: Some(265),
        fan_direction1: Some(FanDirection::Step2),
        fan_direction2: Some(FanDirection::Step5),
        humidity: Some(Humidity::Step2),
    };

    let cmd = Command::air_con_control(&sequence, &device, delta, &CodecConfig::new_version());
    let bytes = cmd.serialize().unwrap();
    let flags = ControlFlags::SWITCH
        | ControlFlags::MODE
        | ControlFlags::AIR_FLOW
        | ControlFlags::CURRENT_TEMP
        | ControlFlags::SETTED_TEMP
        | ControlFlags::FAN_DIRECTION
        | ControlFlags::HUMIDITY;
    assert_eq!(
        subbody(&bytes),
        &[
            3,
            1,
            flags.bits(),
            1,               // switch on
            4,               // heat
            2,               // middle air flow
            221, 0,          // current temp, two bytes
            9, 1,            // setpoint 265, two bytes
            2 | (5 << 4),    // packed louver directions
            2,               // humidity step 2
        ]
    );
}

/// Tests that the target class follows the device subtype flags.
#[test]
fn test_control_target_derivation() {
    let sequence = CommandSequence::new();
    let config = CodecConfig::default();
    let delta = AirConStatusDelta {
        switch: Some(Switch::Off),
        ..Default::default()
    };

    let plain = steerable_air_con(1, 1);
    let bytes = Command::air_con_control(&sequence, &plain, delta, &config)
        .serialize()
        .unwrap();
    assert_eq!(&bytes[12..16], &18u32.to_le_bytes());

    let mut new_style = steerable_air_con(1, 1);
    new_style.new_air_con = true;
    let bytes = Command::air_con_control(&sequence, &new_style, delta, &config)
        .serialize()
        .unwrap();
    assert_eq!(&bytes[12..16], &23u32.to_le_bytes());

    let mut bathroom = steerable_air_con(1, 1);
    bathroom.bath_room = true;
    let bytes = Command::air_con_control(&sequence, &bathroom, delta, &config)
        .serialize()
        .unwrap();
    assert_eq!(&bytes[12..16], &24u32.to_le_bytes());
}

/// Tests that bathroom units never emit the fan-direction field, and that the
/// packed byte also requires the extended protocol and both louver settings.
#[test]
fn test_control_fan_direction_gating() {
    let sequence = CommandSequence::new();
    let delta = AirConStatusDelta {
        fan_direction1: Some(FanDirection::Step1),
        fan_direction2: Some(FanDirection::Step2),
        ..Default::default()
    };

    let mut bathroom = steerable_air_con(2, 1);
    bathroom.bath_room = true;
    let bytes = Command::air_con_control(&sequence, &bathroom, delta, &CodecConfig::new_version())
        .serialize()
        .unwrap();
    assert_eq!(subbody(&bytes), &[2, 1, 0]);

    let plain = steerable_air_con(2, 1);
    let bytes = Command::air_con_control(&sequence, &plain, delta, &CodecConfig::default())
        .serialize()
        .unwrap();
    assert_eq!(subbody(&bytes), &[2, 1, 0]);

    let half = AirConStatusDelta {
        fan_direction1: Some(FanDirection::Step1),
        ..Default::default()
    };
    let bytes = Command::air_con_control(&sequence, &plain, half, &CodecConfig::new_version())
        .serialize()
        .unwrap();
    assert_eq!(subbody(&bytes), &[2, 1, 0]);
}

/// Tests that humidity is emitted only for new-style air conditioners under
/// the extended protocol.
#[test]
fn test_control_humidity_gating() {
    let sequence = CommandSequence::new();
    let delta = AirConStatusDelta {
        humidity: Some(Humidity::Step3),
        ..Default::default()
    };

    let plain = steerable_air_con(2, 1);
    let bytes = Command::air_con_control(&sequence, &plain, delta, &CodecConfig::new_version())
        .serialize()
        .unwrap();
    assert_eq!(subbody(&bytes), &[2, 1, 0]);

    let mut new_style = steerable_air_con(2, 1);
    new_style.new_air_con = true;
    let bytes = Command::air_con_control(&sequence, &new_style, delta, &CodecConfig::new_version())
        .serialize()
        .unwrap();
    assert_eq!(
        subbody(&bytes),
        &[2, 1, ControlFlags::HUMIDITY.bits(), 3]
    );

    let bytes = Command::air_con_control(&sequence, &new_style, delta, &CodecConfig::default())
        .serialize()
        .unwrap();
    assert_eq!(subbody(&bytes), &[2, 1, 0]);
}

/// Tests that an all-unset delta still serializes: flag byte 0, no payload.
#[test]
fn test_control_empty_delta_is_noop() {
    let sequence = CommandSequence::new();
    let device = steerable_air_con(8, 2);
    let cmd = Command::air_con_control(
        &sequence,
        &device,
        AirConStatusDelta::default(),
        &CodecConfig::default(),
    );
    let bytes = cmd.serialize().unwrap();
    assert_eq!(subbody(&bytes), &[8, 2, 0]);
}

/// Tests the ventilation control subbody: switch, mode and air flow only.
#[test]
fn test_ventilation_control() {
    let sequence = CommandSequence::new();
    let vent = Ventilation::new(DeviceIdentity::new(4, 1), false);
    let delta = VentilationStatusDelta {
        switch: Some(Switch::On),
        mode: Some(VentMode::Sleep),
        air_flow: Some(AirFlow::Strong),
    };
    let cmd = Command::ventilation_control(&sequence, &vent, delta);
    assert!(!cmd.has_result());
    let bytes = cmd.serialize().unwrap();
    let flags = ControlFlags::SWITCH | ControlFlags::MODE | ControlFlags::AIR_FLOW;
    assert_eq!(subbody(&bytes), &[4, 1, flags.bits(), 1, 2, 3]);
}

// ---------------------------------------------------------------------------
// System commands
// ---------------------------------------------------------------------------

/// Tests the room-info subbody: count, u16 room ids, and a refresh-type byte
/// for every room except the wildcard. The frame uses subbody version 1.
#[test]
fn test_room_info_query() {
    let sequence = CommandSequence::new();
    let cmd = Command::get_room_info(&sequence, &[1, 65535]);
    let bytes = cmd.serialize().unwrap();
    assert_eq!(bytes[5], 1); // subbody version
    assert_eq!(&bytes[17..19], &48u16.to_le_bytes());
    assert_eq!(subbody(&bytes), &[2, 1, 0, 1, 0xFF, 0xFF]);
}
