//! Elcon/TCCH charger Listen packet decoder.
//!
//! Non-CAN Elcon/TCCH chargers broadcast a fixed 79-byte telemetry frame
//! ("Listen packet") over their serial link. This crate turns such a frame
//! into a typed [`ListenPacket`], checks its framing and XOR checksum, and
//! renders the canonical line-oriented dump:
//! decode -> validate -> format.
//!
//! Decoding, validation and formatting are pure functions over an in-memory
//! buffer with no state carried between frames. File access is isolated in
//! the `source` module; acquiring bytes from a serial port is left to callers.
//!
//! Invariants:
//! - Only buffers of exactly [`FRAME_LEN`] bytes decode.
//! - A structurally decodable frame always yields every field, even when its
//!   marker, type, length or checksum are wrong.
//! - Validation reports the first failing check in a fixed order: start
//!   marker, type, length, checksum.
//!
//! # Examples
//! ```
//! use elcon_core::{REFERENCE_FRAME, decode_and_validate, format_packet, render_dump};
//!
//! let packet = decode_and_validate(&REFERENCE_FRAME)?;
//! print!("{}", render_dump(&format_packet(&packet)));
//! # Ok::<(), elcon_core::FrameError>(())
//! ```

use serde::Serialize;

mod protocols;
mod source;

pub use protocols::listen::layout;
pub use protocols::listen::layout::FRAME_LEN;
pub use protocols::listen::{
    DecodeError, DumpLine, FrameError, InputVoltage, ListenPacket, ValidationError,
    ValidationResult, decode, decode_and_validate, format_packet, render_dump, validate,
};
pub use source::{FrameEncoding, REFERENCE_FRAME, SourceError, parse_hex_frame, read_frame};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result of inspecting one frame, ready for JSON output.
///
/// `packet` is present whenever the frame decoded, so invalid frames can
/// still be inspected; `fields` is only filled for valid frames.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input metadata.
    pub input: InputInfo,
    /// Whether the frame passed every check.
    pub valid: bool,
    /// Diagnostic for the first failed step, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<ListenPacket>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DumpLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputInfo {
    /// Input path as provided by the caller.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

impl Report {
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Decodes and validates `raw`, recording the outcome in a [`Report`].
///
/// # Examples
/// ```
/// use elcon_core::{REFERENCE_FRAME, build_report};
///
/// let report = build_report("reference", &REFERENCE_FRAME);
/// assert!(report.valid);
/// assert_eq!(report.fields.len(), 31);
/// ```
pub fn build_report(input_path: &str, raw: &[u8]) -> Report {
    let mut report = Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "elcon".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: raw.len() as u64,
        },
        valid: false,
        error: None,
        packet: None,
        fields: Vec::new(),
    };

    let packet = match decode(raw) {
        Ok(packet) => packet,
        Err(err) => {
            report.error = Some(err.to_string());
            return report;
        }
    };
    report.packet = Some(packet);
    match validate(raw, &packet) {
        Ok(()) => {
            report.valid = true;
            report.fields = format_packet(&packet);
        }
        Err(err) => report.error = Some(err.to_string()),
    }
    report
}

/// Canonical text for one frame: the dump when valid, otherwise the error.
///
/// # Examples
/// ```
/// use elcon_core::{REFERENCE_FRAME, dump_frame};
///
/// let mut frame = REFERENCE_FRAME;
/// frame[0] = 0xFE;
/// let err = dump_frame(&frame).unwrap_err();
/// assert_eq!(err.to_string(), "Incorrect start characters: 0xFEFE");
/// ```
pub fn dump_frame(raw: &[u8]) -> Result<String, FrameError> {
    let packet = decode_and_validate(raw)?;
    Ok(render_dump(&format_packet(&packet)))
}
