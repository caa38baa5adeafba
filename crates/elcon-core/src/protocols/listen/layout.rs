use std::ops::Range;

pub const FRAME_LEN: usize = 79;

pub const START_MARKER_RANGE: Range<usize> = 0..2;
pub const PACKET_TYPE_OFFSET: usize = 2;
pub const LENGTH_OFFSET: usize = 3;
pub const EEPROM_VERSION_OFFSET: usize = 4;
pub const HARDWARE_VERSION_OFFSET: usize = 5;
pub const SOFTWARE_VERSION_OFFSET: usize = 6;
pub const CURVE_VERSION_OFFSET: usize = 7;
pub const ERROR_CODE_RANGE: Range<usize> = 8..10;
pub const INPUT_VOLTAGE_FLAG_OFFSET: usize = 10;

pub const INTERNAL_TEMP_RANGE: Range<usize> = 11..15;
pub const INTERNAL_TEMP_START_RANGE: Range<usize> = 15..19;
pub const EXTERNAL_TEMP_RANGE: Range<usize> = 19..23;
pub const DC_VOLTAGE_RANGE: Range<usize> = 23..27;
pub const DC_CURRENT_RANGE: Range<usize> = 27..31;
pub const DC_CURRENT_WAVE_RANGE: Range<usize> = 31..35;
pub const BATTERY_VOLTAGE_RANGE: Range<usize> = 35..39;

pub const OUTSIDE_TEMP_STATE_OFFSET: usize = 39;
pub const BATTERY_OVER_TEMP_OFFSET: usize = 40;

pub const BATTERY_TEMP_RANGE: Range<usize> = 41..45;
pub const VOLTAGE_TEMP_COMPENSATION_RANGE: Range<usize> = 45..49;
pub const PFC_VOLTAGE_RANGE: Range<usize> = 49..53;
pub const DC_VOLTAGE_SET_RANGE: Range<usize> = 53..57;
pub const DC_CURRENT_SET_RANGE: Range<usize> = 57..61;
pub const BATTERY_CURRENT_SET_RANGE: Range<usize> = 61..65;
pub const DVDT_15MIN_RANGE: Range<usize> = 65..69;
pub const AH_TOTAL_DELIVERED_RANGE: Range<usize> = 69..73;

pub const CHARGING_MINUTES_RANGE: Range<usize> = 73..75;
pub const CHARGE_STATE_OFFSET: usize = 75;
pub const RELAY_FLAG_OFFSET: usize = 76;
pub const SERIAL_ERROR_COUNT_OFFSET: usize = 77;
pub const CHECKSUM_OFFSET: usize = 78;

/// Bytes covered by the XOR checksum: everything after the start marker up
/// to, but not including, the checksum byte.
pub const CHECKSUM_RANGE: Range<usize> = START_MARKER_RANGE.end..CHECKSUM_OFFSET;

pub const START_MARKER: u16 = 0xFFFE;
pub const LISTEN_TYPE: u8 = 0xF0;
pub const MASTER_TYPE: u8 = 0xC5;
/// Frame length minus start marker, type, length and checksum bytes.
pub const EXPECTED_LENGTH: u8 = (FRAME_LEN - 5) as u8;
