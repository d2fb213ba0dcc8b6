use sha2::{Digest, Sha256};

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Lowercase hex SHA-256 digest, used as a content fingerprint
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
