use thiserror::Error;

/// Structural decode failure: the buffer is not a whole Listen frame.
///
/// # Examples
/// ```
/// use elcon_core::{DecodeError, decode};
///
/// let err = decode(&[0xFF, 0xFE]).unwrap_err();
/// assert!(matches!(err, DecodeError::MalformedInput { actual: 2, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed input: expected {expected} bytes, got {actual}")]
    MalformedInput { expected: usize, actual: usize },
}

/// Semantic check failures, reported in check order.
///
/// The display text matches the diagnostics of the charger's monitor tool.
///
/// # Examples
/// ```
/// use elcon_core::ValidationError;
///
/// let err = ValidationError::InvalidChecksum { calculated: 0x5F, read: 0x00 };
/// assert_eq!(err.to_string(), "Incorrect checksum. Calculated: 0x5F  Read: 0x00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Incorrect start characters: 0x{actual:04X}")]
    InvalidStartMarker { expected: u16, actual: u16 },
    #[error("Incorrect type: 0x{actual:02X}")]
    InvalidType { expected: u8, actual: u8 },
    #[error("Incorrect length: {actual}")]
    InvalidLength { expected: u8, actual: u8 },
    #[error("Incorrect checksum. Calculated: 0x{calculated:02X}  Read: 0x{read:02X}")]
    InvalidChecksum { calculated: u8, read: u8 },
}

/// Either step of `decode_and_validate` failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error(transparent)]
    Malformed(#[from] DecodeError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
