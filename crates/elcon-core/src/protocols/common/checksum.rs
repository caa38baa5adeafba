/// XOR of every byte in `bytes`; zero for an empty slice.
pub(crate) fn xor_checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, byte| acc ^ byte)
}

#[cfg(test)]
mod tests {
    use super::xor_checksum;

    #[test]
    fn xor_checksum_empty() {
        assert_eq!(xor_checksum(&[]), 0);
    }

    #[test]
    fn xor_checksum_values() {
        assert_eq!(xor_checksum(&[0xF0, 0x4A]), 0xBA);
        assert_eq!(xor_checksum(&[0x12, 0x12]), 0);
    }
}
