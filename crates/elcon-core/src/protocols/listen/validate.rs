use super::error::{FrameError, ValidationError};
use super::layout;
use super::parser::{ListenPacket, decode};
use crate::protocols::common::checksum::xor_checksum;

/// Outcome of checking a decoded frame; `Ok(())` means the frame is valid.
pub type ValidationResult = Result<(), ValidationError>;

/// Checks start marker, type, length and checksum, in that order.
///
/// The first failing check is reported. `raw` is the buffer the packet was
/// decoded from; when it is not a whole frame the checksum is taken over the
/// packet's own encoding instead.
///
/// # Examples
/// ```
/// use elcon_core::{REFERENCE_FRAME, ValidationError, decode, validate};
///
/// let mut frame = REFERENCE_FRAME;
/// frame[2] = 0xC5;
/// let packet = decode(&frame)?;
/// assert!(matches!(
///     validate(&frame, &packet),
///     Err(ValidationError::InvalidType { actual: 0xC5, .. })
/// ));
/// # Ok::<(), elcon_core::DecodeError>(())
/// ```
pub fn validate(raw: &[u8], packet: &ListenPacket) -> ValidationResult {
    if packet.start_marker != layout::START_MARKER {
        return Err(ValidationError::InvalidStartMarker {
            expected: layout::START_MARKER,
            actual: packet.start_marker,
        });
    }
    if packet.packet_type != layout::LISTEN_TYPE {
        return Err(ValidationError::InvalidType {
            expected: layout::LISTEN_TYPE,
            actual: packet.packet_type,
        });
    }
    if packet.length != layout::EXPECTED_LENGTH {
        return Err(ValidationError::InvalidLength {
            expected: layout::EXPECTED_LENGTH,
            actual: packet.length,
        });
    }

    let encoded;
    let frame = if raw.len() == layout::FRAME_LEN {
        raw
    } else {
        encoded = packet.to_bytes();
        &encoded[..]
    };
    let calculated = xor_checksum(&frame[layout::CHECKSUM_RANGE]);
    if packet.checksum != calculated {
        return Err(ValidationError::InvalidChecksum {
            calculated,
            read: packet.checksum,
        });
    }
    Ok(())
}

/// Decodes `raw` and validates the result in one step.
pub fn decode_and_validate(raw: &[u8]) -> Result<ListenPacket, FrameError> {
    let packet = decode(raw)?;
    validate(raw, &packet)?;
    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::{decode_and_validate, validate};
    use crate::protocols::listen::error::{DecodeError, FrameError, ValidationError};
    use crate::protocols::listen::layout;
    use crate::protocols::listen::parser::decode;
    use crate::source::REFERENCE_FRAME;

    fn check(frame: &[u8]) -> Result<(), ValidationError> {
        let packet = decode(frame).unwrap();
        validate(frame, &packet)
    }

    #[test]
    fn reference_frame_is_valid() {
        assert_eq!(check(&REFERENCE_FRAME), Ok(()));
    }

    #[test]
    fn bad_start_marker() {
        let mut frame = REFERENCE_FRAME;
        frame[0] = 0xFE;
        assert_eq!(
            check(&frame),
            Err(ValidationError::InvalidStartMarker {
                expected: 0xFFFE,
                actual: 0xFEFE
            })
        );
    }

    #[test]
    fn master_type_is_rejected() {
        let mut frame = REFERENCE_FRAME;
        frame[layout::PACKET_TYPE_OFFSET] = layout::MASTER_TYPE;
        assert_eq!(
            check(&frame),
            Err(ValidationError::InvalidType {
                expected: 0xF0,
                actual: 0xC5
            })
        );
    }

    #[test]
    fn bad_length() {
        let mut frame = REFERENCE_FRAME;
        frame[layout::LENGTH_OFFSET] = 73;
        assert_eq!(
            check(&frame),
            Err(ValidationError::InvalidLength {
                expected: 74,
                actual: 73
            })
        );
    }

    #[test]
    fn start_marker_is_reported_before_type() {
        let mut frame = REFERENCE_FRAME;
        frame[1] = 0x00;
        frame[layout::PACKET_TYPE_OFFSET] = 0x00;
        frame[layout::LENGTH_OFFSET] = 0x00;
        assert!(matches!(
            check(&frame),
            Err(ValidationError::InvalidStartMarker { .. })
        ));
    }

    #[test]
    fn type_is_reported_before_length() {
        let mut frame = REFERENCE_FRAME;
        frame[layout::PACKET_TYPE_OFFSET] = 0x00;
        frame[layout::LENGTH_OFFSET] = 0x00;
        assert!(matches!(
            check(&frame),
            Err(ValidationError::InvalidType { .. })
        ));
    }

    #[test]
    fn bad_checksum_reports_both_values() {
        let mut frame = REFERENCE_FRAME;
        frame[layout::CHECKSUM_OFFSET] = 0x00;
        assert_eq!(
            check(&frame),
            Err(ValidationError::InvalidChecksum {
                calculated: 0x5F,
                read: 0x00
            })
        );
    }

    #[test]
    fn any_payload_byte_mutation_breaks_checksum() {
        for offset in layout::LENGTH_OFFSET + 1..layout::CHECKSUM_OFFSET {
            for flip in [0x01u8, 0x80, 0xFF] {
                let mut frame = REFERENCE_FRAME;
                frame[offset] ^= flip;
                assert!(
                    matches!(check(&frame), Err(ValidationError::InvalidChecksum { .. })),
                    "offset {offset} flip {flip:#04x}"
                );
            }
        }
    }

    #[test]
    fn valid_only_when_checksum_matches_xor() {
        for value in 0..=u8::MAX {
            let mut frame = REFERENCE_FRAME;
            frame[layout::CHECKSUM_OFFSET] = value;
            assert_eq!(check(&frame).is_ok(), value == 0x5F);
        }
    }

    #[test]
    fn checksum_falls_back_to_encoding_for_foreign_buffers() {
        let packet = decode(&REFERENCE_FRAME).unwrap();
        assert_eq!(validate(&[], &packet), Ok(()));
    }

    #[test]
    fn decode_and_validate_reports_each_stage() {
        assert!(decode_and_validate(&REFERENCE_FRAME).is_ok());
        assert_eq!(
            decode_and_validate(&REFERENCE_FRAME[..10]).unwrap_err(),
            FrameError::Malformed(DecodeError::MalformedInput {
                expected: 79,
                actual: 10
            })
        );
        let mut frame = REFERENCE_FRAME;
        frame[layout::CHECKSUM_OFFSET] = 0;
        assert!(matches!(
            decode_and_validate(&frame),
            Err(FrameError::Invalid(ValidationError::InvalidChecksum { .. }))
        ));
    }
}
