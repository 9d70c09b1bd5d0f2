//! CRC32 checksums for operation log lines

use crc32fast::Hasher;

/// CRC32 (IEEE) over `data`
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_detects_change() {
        let line = br#"{"op":"remove","id":"abc"}"#;
        let sum = compute_checksum(line);
        assert!(verify_checksum(line, sum));
        assert!(!verify_checksum(br#"{"op":"remove","id":"abd"}"#, sum));
    }
}
