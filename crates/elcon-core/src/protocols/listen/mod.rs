//! Elcon/TCCH Listen packet decoding.
//!
//! The Listen packet is the fixed-size telemetry frame a non-CAN charger
//! broadcasts for passive monitoring. The parser extracts every field
//! positionally (big-endian, IEEE-754 single precision floats) without
//! judging content; `validate` then checks start marker, type, length and
//! the XOR checksum in that order and reports the first failure.
//!
//! Byte offsets live in `layout`, bounds-checked access in `reader`, and the
//! canonical text dump in `format`.

pub mod error;
pub mod format;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod validate;

pub use error::{DecodeError, FrameError, ValidationError};
pub use format::{DumpLine, format_packet, render_dump};
pub use parser::{InputVoltage, ListenPacket, decode};
pub use validate::{ValidationResult, decode_and_validate, validate};
