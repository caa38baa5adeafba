use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::ListenReader;

/// A decoded Listen packet, fields in wire order.
///
/// Decoding never inspects field values, so a packet with a bad marker or
/// checksum still decodes and can be inspected field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ListenPacket {
    pub start_marker: u16,
    pub packet_type: u8,
    pub length: u8,
    pub eeprom_version: u8,
    /// Tenths of a version unit.
    pub hardware_version: u8,
    /// Tenths of a version unit.
    pub software_version: u8,
    /// Tenths of a version unit.
    pub curve_version: u8,
    pub error_code: u16,
    pub input_voltage_flag: u8,
    /// Degrees C.
    pub internal_temp: f32,
    /// Degrees C.
    pub internal_temp_start: f32,
    pub external_temp: f32,
    pub dc_voltage: f32,
    pub dc_current: f32,
    pub dc_current_wave: f32,
    pub battery_voltage: f32,
    pub outside_temp_state: u8,
    pub battery_over_temp: u8,
    pub battery_temp: f32,
    pub voltage_temp_compensation: f32,
    pub pfc_voltage: f32,
    pub dc_voltage_set: f32,
    pub dc_current_set: f32,
    pub battery_current_set: f32,
    pub dvdt_15min: f32,
    pub ah_total_delivered: f32,
    pub charging_minutes: u16,
    pub charge_state: u8,
    pub relay_flag: u8,
    pub serial_error_count: u8,
    pub checksum: u8,
}

/// Mains input selection reported by the charger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputVoltage {
    Vac120,
    Vac240,
}

impl TryFrom<u8> for InputVoltage {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Vac120),
            2 => Ok(Self::Vac240),
            other => Err(other),
        }
    }
}

impl ListenPacket {
    pub fn hardware_version_scaled(&self) -> f64 {
        scale_version(self.hardware_version)
    }

    pub fn software_version_scaled(&self) -> f64 {
        scale_version(self.software_version)
    }

    pub fn curve_version_scaled(&self) -> f64 {
        scale_version(self.curve_version)
    }

    pub fn input_voltage(&self) -> Option<InputVoltage> {
        InputVoltage::try_from(self.input_voltage_flag).ok()
    }

    /// Re-encodes the packet with the wire layout it was decoded from.
    pub fn to_bytes(&self) -> [u8; layout::FRAME_LEN] {
        let mut frame = [0u8; layout::FRAME_LEN];
        frame[layout::START_MARKER_RANGE].copy_from_slice(&self.start_marker.to_be_bytes());
        frame[layout::PACKET_TYPE_OFFSET] = self.packet_type;
        frame[layout::LENGTH_OFFSET] = self.length;
        frame[layout::EEPROM_VERSION_OFFSET] = self.eeprom_version;
        frame[layout::HARDWARE_VERSION_OFFSET] = self.hardware_version;
        frame[layout::SOFTWARE_VERSION_OFFSET] = self.software_version;
        frame[layout::CURVE_VERSION_OFFSET] = self.curve_version;
        frame[layout::ERROR_CODE_RANGE].copy_from_slice(&self.error_code.to_be_bytes());
        frame[layout::INPUT_VOLTAGE_FLAG_OFFSET] = self.input_voltage_flag;

        let leading_floats = [
            (layout::INTERNAL_TEMP_RANGE, self.internal_temp),
            (layout::INTERNAL_TEMP_START_RANGE, self.internal_temp_start),
            (layout::EXTERNAL_TEMP_RANGE, self.external_temp),
            (layout::DC_VOLTAGE_RANGE, self.dc_voltage),
            (layout::DC_CURRENT_RANGE, self.dc_current),
            (layout::DC_CURRENT_WAVE_RANGE, self.dc_current_wave),
            (layout::BATTERY_VOLTAGE_RANGE, self.battery_voltage),
        ];
        for (range, value) in leading_floats {
            frame[range].copy_from_slice(&value.to_be_bytes());
        }

        frame[layout::OUTSIDE_TEMP_STATE_OFFSET] = self.outside_temp_state;
        frame[layout::BATTERY_OVER_TEMP_OFFSET] = self.battery_over_temp;

        let trailing_floats = [
            (layout::BATTERY_TEMP_RANGE, self.battery_temp),
            (
                layout::VOLTAGE_TEMP_COMPENSATION_RANGE,
                self.voltage_temp_compensation,
            ),
            (layout::PFC_VOLTAGE_RANGE, self.pfc_voltage),
            (layout::DC_VOLTAGE_SET_RANGE, self.dc_voltage_set),
            (layout::DC_CURRENT_SET_RANGE, self.dc_current_set),
            (layout::BATTERY_CURRENT_SET_RANGE, self.battery_current_set),
            (layout::DVDT_15MIN_RANGE, self.dvdt_15min),
            (layout::AH_TOTAL_DELIVERED_RANGE, self.ah_total_delivered),
        ];
        for (range, value) in trailing_floats {
            frame[range].copy_from_slice(&value.to_be_bytes());
        }

        frame[layout::CHARGING_MINUTES_RANGE]
            .copy_from_slice(&self.charging_minutes.to_be_bytes());
        frame[layout::CHARGE_STATE_OFFSET] = self.charge_state;
        frame[layout::RELAY_FLAG_OFFSET] = self.relay_flag;
        frame[layout::SERIAL_ERROR_COUNT_OFFSET] = self.serial_error_count;
        frame[layout::CHECKSUM_OFFSET] = self.checksum;
        frame
    }
}

fn scale_version(raw: u8) -> f64 {
    f64::from(raw) / 10.0
}

/// Decodes a Listen frame positionally without validating its contents.
///
/// # Examples
/// ```
/// use elcon_core::{REFERENCE_FRAME, decode};
///
/// let packet = decode(&REFERENCE_FRAME)?;
/// assert_eq!(packet.start_marker, 0xFFFE);
/// assert_eq!(packet.length, 74);
/// # Ok::<(), elcon_core::DecodeError>(())
/// ```
pub fn decode(raw: &[u8]) -> Result<ListenPacket, DecodeError> {
    let reader = ListenReader::new(raw);
    reader.require_exact_len(layout::FRAME_LEN)?;

    Ok(ListenPacket {
        start_marker: reader.read_u16_be(layout::START_MARKER_RANGE)?,
        packet_type: reader.read_u8(layout::PACKET_TYPE_OFFSET)?,
        length: reader.read_u8(layout::LENGTH_OFFSET)?,
        eeprom_version: reader.read_u8(layout::EEPROM_VERSION_OFFSET)?,
        hardware_version: reader.read_u8(layout::HARDWARE_VERSION_OFFSET)?,
        software_version: reader.read_u8(layout::SOFTWARE_VERSION_OFFSET)?,
        curve_version: reader.read_u8(layout::CURVE_VERSION_OFFSET)?,
        error_code: reader.read_u16_be(layout::ERROR_CODE_RANGE)?,
        input_voltage_flag: reader.read_u8(layout::INPUT_VOLTAGE_FLAG_OFFSET)?,
        internal_temp: reader.read_f32_be(layout::INTERNAL_TEMP_RANGE)?,
        internal_temp_start: reader.read_f32_be(layout::INTERNAL_TEMP_START_RANGE)?,
        external_temp: reader.read_f32_be(layout::EXTERNAL_TEMP_RANGE)?,
        dc_voltage: reader.read_f32_be(layout::DC_VOLTAGE_RANGE)?,
        dc_current: reader.read_f32_be(layout::DC_CURRENT_RANGE)?,
        dc_current_wave: reader.read_f32_be(layout::DC_CURRENT_WAVE_RANGE)?,
        battery_voltage: reader.read_f32_be(layout::BATTERY_VOLTAGE_RANGE)?,
        outside_temp_state: reader.read_u8(layout::OUTSIDE_TEMP_STATE_OFFSET)?,
        battery_over_temp: reader.read_u8(layout::BATTERY_OVER_TEMP_OFFSET)?,
        battery_temp: reader.read_f32_be(layout::BATTERY_TEMP_RANGE)?,
        voltage_temp_compensation: reader.read_f32_be(layout::VOLTAGE_TEMP_COMPENSATION_RANGE)?,
        pfc_voltage: reader.read_f32_be(layout::PFC_VOLTAGE_RANGE)?,
        dc_voltage_set: reader.read_f32_be(layout::DC_VOLTAGE_SET_RANGE)?,
        dc_current_set: reader.read_f32_be(layout::DC_CURRENT_SET_RANGE)?,
        battery_current_set: reader.read_f32_be(layout::BATTERY_CURRENT_SET_RANGE)?,
        dvdt_15min: reader.read_f32_be(layout::DVDT_15MIN_RANGE)?,
        ah_total_delivered: reader.read_f32_be(layout::AH_TOTAL_DELIVERED_RANGE)?,
        charging_minutes: reader.read_u16_be(layout::CHARGING_MINUTES_RANGE)?,
        charge_state: reader.read_u8(layout::CHARGE_STATE_OFFSET)?,
        relay_flag: reader.read_u8(layout::RELAY_FLAG_OFFSET)?,
        serial_error_count: reader.read_u8(layout::SERIAL_ERROR_COUNT_OFFSET)?,
        checksum: reader.read_u8(layout::CHECKSUM_OFFSET)?,
    })
}
