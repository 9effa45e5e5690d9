//! Bundled subsets of the `common` and `ardupilotmega` dialects.
//!
//! Full dialect sets arrive through a [`DefinitionSource`] backed by
//! an external document parser; the subsets here cover the core
//! telemetry traffic so the default configuration loads standalone.
//!
//! [`DefinitionSource`]: super::DefinitionSource

use super::document::{DefinitionDocument, EnumDef, EnumEntry, FieldDef, MessageDef};

fn message(id: u8, name: &str, fields: &[(&str, &str)]) -> MessageDef {
    MessageDef {
        id,
        name: name.to_owned(),
        fields: fields
            .iter()
            .map(|&(token, name)| FieldDef::new(token, name))
            .collect(),
    }
}

fn enumeration(name: &str, entries: &[(&str, u32)]) -> EnumDef {
    EnumDef {
        name: name.to_owned(),
        entries: entries
            .iter()
            .map(|&(name, value)| EnumEntry::new(name, value))
            .collect(),
    }
}

/// Core telemetry subset of the `common` dialect.
#[must_use]
pub fn common() -> DefinitionDocument {
    DefinitionDocument {
        enums: vec![
            enumeration(
                "MAV_AUTOPILOT",
                &[
                    ("MAV_AUTOPILOT_GENERIC", 0),
                    ("MAV_AUTOPILOT_PIXHAWK", 1),
                    ("MAV_AUTOPILOT_SLUGS", 2),
                    ("MAV_AUTOPILOT_ARDUPILOTMEGA", 3),
                ],
            ),
            enumeration(
                "MAV_STATE",
                &[
                    ("MAV_STATE_UNINIT", 0),
                    ("MAV_STATE_BOOT", 1),
                    ("MAV_STATE_CALIBRATING", 2),
                    ("MAV_STATE_STANDBY", 3),
                    ("MAV_STATE_ACTIVE", 4),
                    ("MAV_STATE_CRITICAL", 5),
                    ("MAV_STATE_EMERGENCY", 6),
                    ("MAV_STATE_POWEROFF", 7),
                ],
            ),
        ],
        messages: vec![
            message(
                0,
                "HEARTBEAT",
                &[
                    ("uint8_t", "type"),
                    ("uint8_t", "autopilot"),
                    ("uint8_t", "base_mode"),
                    ("uint32_t", "custom_mode"),
                    ("uint8_t", "system_status"),
                    ("uint8_t_mavlink_version", "mavlink_version"),
                ],
            ),
            message(
                1,
                "SYS_STATUS",
                &[
                    ("uint32_t", "onboard_control_sensors_present"),
                    ("uint32_t", "onboard_control_sensors_enabled"),
                    ("uint32_t", "onboard_control_sensors_health"),
                    ("uint16_t", "load"),
                    ("uint16_t", "voltage_battery"),
                    ("int16_t", "current_battery"),
                    ("int8_t", "battery_remaining"),
                    ("uint16_t", "drop_rate_comm"),
                    ("uint16_t", "errors_comm"),
                    ("uint16_t", "errors_count1"),
                    ("uint16_t", "errors_count2"),
                    ("uint16_t", "errors_count3"),
                    ("uint16_t", "errors_count4"),
                ],
            ),
            message(
                2,
                "SYSTEM_TIME",
                &[
                    ("uint64_t", "time_unix_usec"),
                    ("uint32_t", "time_boot_ms"),
                ],
            ),
            message(
                22,
                "PARAM_VALUE",
                &[
                    ("char[16]", "param_id"),
                    ("float", "param_value"),
                    ("uint8_t", "param_type"),
                    ("uint16_t", "param_count"),
                    ("uint16_t", "param_index"),
                ],
            ),
            message(
                24,
                "GPS_RAW_INT",
                &[
                    ("uint64_t", "time_usec"),
                    ("uint8_t", "fix_type"),
                    ("int32_t", "lat"),
                    ("int32_t", "lon"),
                    ("int32_t", "alt"),
                    ("uint16_t", "eph"),
                    ("uint16_t", "epv"),
                    ("uint16_t", "vel"),
                    ("uint16_t", "cog"),
                    ("uint8_t", "satellites_visible"),
                ],
            ),
            message(
                25,
                "GPS_STATUS",
                &[
                    ("uint8_t", "satellites_visible"),
                    ("uint8_t[20]", "satellite_prn"),
                    ("uint8_t[20]", "satellite_used"),
                    ("uint8_t[20]", "satellite_elevation"),
                    ("uint8_t[20]", "satellite_azimuth"),
                    ("uint8_t[20]", "satellite_snr"),
                ],
            ),
            message(
                30,
                "ATTITUDE",
                &[
                    ("uint32_t", "time_boot_ms"),
                    ("float", "roll"),
                    ("float", "pitch"),
                    ("float", "yaw"),
                    ("float", "rollspeed"),
                    ("float", "pitchspeed"),
                    ("float", "yawspeed"),
                ],
            ),
        ],
    }
}

/// Core telemetry subset of the `ardupilotmega` dialect.
#[must_use]
pub fn ardupilotmega() -> DefinitionDocument {
    DefinitionDocument {
        enums: Vec::new(),
        messages: vec![
            message(
                152,
                "MEMINFO",
                &[("uint16_t", "brkval"), ("uint16_t", "freemem")],
            ),
            message(
                163,
                "AHRS",
                &[
                    ("float", "omegaIx"),
                    ("float", "omegaIy"),
                    ("float", "omegaIz"),
                    ("float", "accel_weight"),
                    ("float", "renorm_val"),
                    ("float", "error_rp"),
                    ("float", "error_yaw"),
                ],
            ),
            message(
                165,
                "HWSTATUS",
                &[("uint16_t", "Vcc"), ("uint8_t", "I2Cerr")],
            ),
            message(
                166,
                "RADIO",
                &[
                    ("uint8_t", "rssi"),
                    ("uint8_t", "remrssi"),
                    ("uint8_t", "txbuf"),
                    ("uint8_t", "noise"),
                    ("uint8_t", "remnoise"),
                    ("uint16_t", "rxerrors"),
                    ("uint16_t", "fixed"),
                ],
            ),
        ],
    }
}
