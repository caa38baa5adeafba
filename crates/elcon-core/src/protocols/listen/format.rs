use serde::Serialize;

use super::parser::ListenPacket;

const DUMP_HEADER: &str = "Dumping Listen Packet -";
const LABEL_COLUMN_WIDTH: usize = 23;
const DETAIL_SEPARATOR: &str = "    - ";
const TEMP_SUFFIX: &str = "   - degrees C";
const INPUT_VOLTAGE_ANNOTATION: &str = "(1=>120VAC, 2=>240VAC)";

/// One labeled field of the canonical dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpLine {
    pub label: &'static str,
    pub value: String,
    /// Printed between label and padding; the monitor tool omits the colon
    /// on one line and parsers of its output expect that.
    #[serde(skip)]
    label_suffix: &'static str,
}

impl DumpLine {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            label_suffix: ":",
        }
    }

    fn without_colon(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            label_suffix: "",
        }
    }
}

/// Renders every field of a packet, in wire order.
///
/// Intended for packets that passed validation; formatting itself never fails.
pub fn format_packet(packet: &ListenPacket) -> Vec<DumpLine> {
    vec![
        DumpLine::new("Packet start", hex_u16(packet.start_marker)),
        DumpLine::new("Packet type", hex_u8(packet.packet_type)),
        DumpLine::new("Length", hex_u8_with_decimal(packet.length)),
        DumpLine::new("EEPROM version", hex_u8_with_decimal(packet.eeprom_version)),
        DumpLine::new(
            "HW version",
            version(packet.hardware_version, packet.hardware_version_scaled()),
        ),
        DumpLine::new(
            "SW version",
            version(packet.software_version, packet.software_version_scaled()),
        ),
        DumpLine::new(
            "Curve version",
            version(packet.curve_version, packet.curve_version_scaled()),
        ),
        DumpLine::new("Error code", hex_u16(packet.error_code)),
        DumpLine::new(
            "Input voltage flag",
            format!(
                "{}{DETAIL_SEPARATOR}{INPUT_VOLTAGE_ANNOTATION}",
                hex_u8(packet.input_voltage_flag)
            ),
        ),
        DumpLine::new("Internal temp", temperature(packet.internal_temp)),
        DumpLine::new("Internal temp start", temperature(packet.internal_temp_start)),
        DumpLine::new("External temp", float(packet.external_temp)),
        DumpLine::new("DC Voltage", float(packet.dc_voltage)),
        DumpLine::new("DC Current", float(packet.dc_current)),
        DumpLine::new("DC Current Wave", float(packet.dc_current_wave)),
        DumpLine::new("Battery Voltage", float(packet.battery_voltage)),
        DumpLine::new("Outside temp state", hex_u8(packet.outside_temp_state)),
        DumpLine::new("Battry over temp flag", hex_u8(packet.battery_over_temp)),
        DumpLine::new("Battery temp", float(packet.battery_temp)),
        DumpLine::new("Voltage temp compens", float(packet.voltage_temp_compensation)),
        DumpLine::new("PFC Voltage", float(packet.pfc_voltage)),
        DumpLine::new("DC Voltage set", float(packet.dc_voltage_set)),
        DumpLine::new("DC Current set", float(packet.dc_current_set)),
        DumpLine::without_colon(
            "Battery Current set",
            float(packet.battery_current_set),
        ),
        DumpLine::new("DVDT 15min", float(packet.dvdt_15min)),
        DumpLine::new("AH total delivered", float(packet.ah_total_delivered)),
        DumpLine::new(
            "Time charging minutes",
            format!(
                "{}{DETAIL_SEPARATOR}{}",
                hex_u16(packet.charging_minutes),
                packet.charging_minutes
            ),
        ),
        DumpLine::new("Charge state", hex_u8(packet.charge_state)),
        DumpLine::new("Relay flag", hex_u8(packet.relay_flag)),
        DumpLine::new("Serial error count", hex_u8(packet.serial_error_count)),
        DumpLine::new("Check sum", hex_u8(packet.checksum)),
    ]
}

/// Joins dump lines into the line-oriented text block, newline terminated.
///
/// # Examples
/// ```
/// use elcon_core::{REFERENCE_FRAME, decode, format_packet, render_dump};
///
/// let packet = decode(&REFERENCE_FRAME)?;
/// let text = render_dump(&format_packet(&packet));
/// assert!(text.starts_with("Dumping Listen Packet -\n  Packet start:          0xFFFE\n"));
/// # Ok::<(), elcon_core::DecodeError>(())
/// ```
pub fn render_dump(lines: &[DumpLine]) -> String {
    let mut out = String::from(DUMP_HEADER);
    out.push('\n');
    for line in lines {
        let label = format!("{}{}", line.label, line.label_suffix);
        out.push_str(&format!(
            "  {label:<width$}{}\n",
            line.value,
            width = LABEL_COLUMN_WIDTH
        ));
    }
    out
}

fn hex_u8(value: u8) -> String {
    format!("0x{value:02X}")
}

fn hex_u16(value: u16) -> String {
    format!("0x{value:04X}")
}

fn hex_u8_with_decimal(value: u8) -> String {
    format!("{}{DETAIL_SEPARATOR}{value}", hex_u8(value))
}

fn version(raw: u8, scaled: f64) -> String {
    format!("{}{DETAIL_SEPARATOR}{scaled:.2}", hex_u8(raw))
}

fn float(value: f32) -> String {
    if value.is_nan() {
        // Sign and payload are not shown; width 4 zero-padded like the rest.
        return "0nan".to_string();
    }
    format!("{value:04.2}")
}

fn temperature(value: f32) -> String {
    format!("{}{TEMP_SUFFIX}", float(value))
}
