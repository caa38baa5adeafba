use super::SourceError;

/// Parses a hex dump into bytes.
///
/// Tokens are separated by whitespace or commas and may carry `0x` or `\x`
/// prefixes; `\xFF\xFE` runs are accepted as well. Text after `#` on a line
/// is ignored.
pub fn parse_hex_frame(text: &str) -> Result<Vec<u8>, SourceError> {
    let mut bytes = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let content = line.split('#').next().unwrap_or_default();
        for token in content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            parse_token(token, line_no, &mut bytes)?;
        }
    }
    Ok(bytes)
}

fn parse_token(token: &str, line: usize, out: &mut Vec<u8>) -> Result<(), SourceError> {
    let invalid = || SourceError::InvalidHex {
        line,
        token: token.to_string(),
    };

    let digits = token.replace("\\x", "");
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    if digits.is_empty()
        || digits.len() % 2 != 0
        || !digits.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(invalid());
    }

    for index in (0..digits.len()).step_by(2) {
        let byte = u8::from_str_radix(&digits[index..index + 2], 16).map_err(|_| invalid())?;
        out.push(byte);
    }
    Ok(())
}
