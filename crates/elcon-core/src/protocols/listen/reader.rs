use std::ops::Range;

use super::error::DecodeError;

pub struct ListenReader<'a> {
    frame: &'a [u8],
}

impl<'a> ListenReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), DecodeError> {
        if self.frame.len() != expected {
            return Err(DecodeError::MalformedInput {
                expected,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.frame
            .get(offset)
            .copied()
            .ok_or(DecodeError::MalformedInput {
                expected: offset + 1,
                actual: self.frame.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        let bytes = self.read_array::<2>(range)?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_f32_be(&self, range: Range<usize>) -> Result<f32, DecodeError> {
        let bytes = self.read_array::<4>(range)?;
        Ok(f32::from_be_bytes(bytes))
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.frame
            .get(range.clone())
            .ok_or(DecodeError::MalformedInput {
                expected: range.end,
                actual: self.frame.len(),
            })
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DecodeError::MalformedInput {
            expected: N,
            actual: bytes.len(),
        })
    }
}
