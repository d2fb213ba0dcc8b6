use crc32fast::Hasher;

/// Compute CRC32 checksum for a byte slice
pub fn crc32(data: &[u8]) -> u32 {
    crc32_parts(&[data])
}

/// CRC32 over the concatenation of `parts` without copying them together
pub fn crc32_parts(parts: &[&[u8]]) -> u32 {
    let mut hasher = Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_parts_match_concatenation() {
        assert_eq!(crc32_parts(&[b"1234", b"", b"56789"]), crc32(b"123456789"));
    }
}
