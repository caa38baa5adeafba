mod hex;

pub use hex::parse_hex_frame;

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::protocols::listen::layout::FRAME_LEN;

/// Listen packet captured from a TCCH-120-15 charger; decodes and validates
/// cleanly (checksum 0x5F).
pub const REFERENCE_FRAME: [u8; FRAME_LEN] = [
    0xFF, 0xFE, 0xF0, 0x4A, 0x02, 0x0D, 0x14, 0x14, 0x00, 0x00, 0x01, 0x41, 0x64, 0x3A, 0x16, 0x41,
    0x4A, 0x70, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x43, 0x21, 0x5E, 0x20, 0x40, 0x2D, 0x18, 0x11, 0x00,
    0x00, 0x00, 0x00, 0x43, 0x21, 0x72, 0xE6, 0xFF, 0x0A, 0x41, 0x70, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x43, 0xB0, 0xA2, 0x0C, 0x43, 0x4A, 0x19, 0x9A, 0x40, 0x2E, 0x2C, 0xCE, 0x40, 0x2E, 0x2C,
    0xCE, 0x00, 0x00, 0x00, 0x00, 0x3D, 0x61, 0xF2, 0x59, 0x00, 0x01, 0x02, 0x01, 0x01, 0x5F,
];

/// How a frame file is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEncoding {
    /// Raw bytes exactly as received from the serial link.
    Binary,
    /// Hex text, see [`parse_hex_frame`].
    Hex,
}

impl FrameEncoding {
    /// Picks `Hex` for `.hex`/`.txt` files and `Binary` otherwise.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "hex" | "txt" => FrameEncoding::Hex,
            _ => FrameEncoding::Binary,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex token '{token}' on line {line}")]
    InvalidHex { line: usize, token: String },
}

/// Loads one frame from `path`. The length is not checked here; `decode`
/// rejects anything that is not a whole frame.
pub fn read_frame(path: &Path, encoding: FrameEncoding) -> Result<Vec<u8>, SourceError> {
    let frame = match encoding {
        FrameEncoding::Binary => fs::read(path)?,
        FrameEncoding::Hex => parse_hex_frame(&fs::read_to_string(path)?)?,
    };
    debug!(
        "read {} bytes ({:?}) from {}",
        frame.len(),
        encoding,
        path.display()
    );
    Ok(frame)
}
