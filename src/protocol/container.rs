use crate::engine::bitpack::PackedBits;
use crate::engine::huffman::HuffmanNode;
use crate::error::CodecError;
use crate::protocol::constants::{CONTAINER_MAGIC, CONTAINER_VERSION, MAX_TREE_BYTES};
use crate::protocol::tree::{deserialize_tree, serialize_tree};
use crate::utils::bits::bytes_for_bits;
use crate::utils::crc::crc32_parts;
use tracing::error;

/// Fixed-size container header (28 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub version: u16,
    pub symbol_count: u64,
    pub bit_count: u64,
    pub tree_len: u16,
    pub checksum: u32,
}

impl ContainerHeader {
    pub const SIZE: usize = 28;

    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < Self::SIZE {
            error!("Container header too short: {} bytes", buf.len());
            return Err(CodecError::corrupt("truncated header"));
        }

        if buf[0..4] != CONTAINER_MAGIC {
            error!("Bad container magic: {:02x?}", &buf[0..4]);
            return Err(CodecError::corrupt("invalid magic"));
        }

        let version = u16::from_be_bytes([buf[4], buf[5]]);
        if version != CONTAINER_VERSION {
            error!("Unsupported container version {}", version);
            return Err(CodecError::corrupt(format!("unsupported version {}", version)));
        }

        Ok(Self {
            version,
            symbol_count: u64::from_be_bytes(be_array(&buf[6..14])),
            bit_count: u64::from_be_bytes(be_array(&buf[14..22])),
            tree_len: u16::from_be_bytes([buf[22], buf[23]]),
            checksum: u32::from_be_bytes([buf[24], buf[25], buf[26], buf[27]]),
        })
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&CONTAINER_MAGIC);
        buf[4..6].copy_from_slice(&self.version.to_be_bytes());
        buf[6..14].copy_from_slice(&self.symbol_count.to_be_bytes());
        buf[14..22].copy_from_slice(&self.bit_count.to_be_bytes());
        buf[22..24].copy_from_slice(&self.tree_len.to_be_bytes());
        buf[24..28].copy_from_slice(&self.checksum.to_be_bytes());
        buf
    }

    /// Counts must agree with each other before any payload is touched.
    fn validate(&self) -> Result<(), CodecError> {
        let empty = [self.symbol_count == 0, self.bit_count == 0, self.tree_len == 0];
        if empty.iter().any(|&e| e) && !empty.iter().all(|&e| e) {
            return Err(CodecError::corrupt(format!(
                "inconsistent counts: {} symbols, {} bits, {} tree bytes",
                self.symbol_count, self.bit_count, self.tree_len
            )));
        }
        if self.bit_count < self.symbol_count {
            return Err(CodecError::corrupt(format!(
                "{} symbols cannot fit in {} bits",
                self.symbol_count, self.bit_count
            )));
        }
        if self.tree_len as usize > MAX_TREE_BYTES {
            return Err(CodecError::corrupt(format!("tree of {} bytes", self.tree_len)));
        }
        Ok(())
    }
}

fn be_array(bytes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(bytes);
    out
}

/// Self-describing unit: decode tree, original symbol count, packed payload.
/// `tree` is `None` exactly when the original input was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub tree: Option<HuffmanNode>,
    pub symbol_count: u64,
    pub payload: PackedBits,
}

impl Container {
    pub fn empty() -> Self {
        Self {
            tree: None,
            symbol_count: 0,
            payload: PackedBits::default(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut tree_bytes = Vec::new();
        if let Some(tree) = &self.tree {
            serialize_tree(tree, &mut tree_bytes);
        }

        let header = ContainerHeader {
            version: CONTAINER_VERSION,
            symbol_count: self.symbol_count,
            bit_count: self.payload.bit_len,
            tree_len: tree_bytes.len() as u16,
            checksum: crc32_parts(&[&tree_bytes, &self.payload.bytes]),
        };

        let mut out = Vec::with_capacity(
            ContainerHeader::SIZE + tree_bytes.len() + self.payload.bytes.len(),
        );
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(&tree_bytes);
        out.extend_from_slice(&self.payload.bytes);
        out
    }

    pub fn from_bytes(data: &[u8], verify_checksum: bool) -> Result<Self, CodecError> {
        let header = ContainerHeader::decode(data)?;
        header.validate()?;

        let body = &data[ContainerHeader::SIZE..];
        let tree_len = header.tree_len as usize;
        if body.len() < tree_len {
            error!("Container truncated inside tree: {} of {} bytes", body.len(), tree_len);
            return Err(CodecError::corrupt("truncated tree"));
        }
        let (tree_bytes, payload) = body.split_at(tree_len);

        let expected_payload = bytes_for_bits(header.bit_count);
        if payload.len() as u64 != expected_payload {
            error!(
                "Payload length mismatch: expected={}, actual={}",
                expected_payload,
                payload.len()
            );
            return Err(CodecError::corrupt(format!(
                "payload is {} bytes, header implies {}",
                payload.len(),
                expected_payload
            )));
        }

        if verify_checksum {
            let computed = crc32_parts(&[tree_bytes, payload]);
            if computed != header.checksum {
                error!("Checksum mismatch: expected={:x}, computed={:x}", header.checksum, computed);
                return Err(CodecError::corrupt("checksum mismatch"));
            }
        }

        let tree = if tree_bytes.is_empty() {
            None
        } else {
            Some(deserialize_tree(tree_bytes)?)
        };

        Ok(Self {
            tree,
            symbol_count: header.symbol_count,
            payload: PackedBits {
                bytes: payload.to_vec(),
                bit_len: header.bit_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(symbol: u8) -> HuffmanNode {
        HuffmanNode::Leaf { symbol, freq: 0 }
    }

    fn sample() -> Container {
        Container {
            tree: Some(HuffmanNode::Internal {
                freq: 0,
                left: Box::new(leaf(b'a')),
                right: Box::new(leaf(b'b')),
            }),
            symbol_count: 3,
            payload: PackedBits { bytes: vec![0b0100_0000], bit_len: 3 },
        }
    }

    #[test]
    fn test_header_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], b"HUFP");
        assert_eq!(&bytes[4..6], &[0, 1]);
        assert_eq!(&bytes[6..14], &3u64.to_be_bytes());
        assert_eq!(&bytes[14..22], &3u64.to_be_bytes());
        assert_eq!(&bytes[22..24], &5u16.to_be_bytes());
        assert_eq!(&bytes[28..33], &[0x00, 0x01, b'a', 0x01, b'b']);
        assert_eq!(&bytes[33..], &[0b0100_0000]);
    }

    #[test]
    fn test_parse_written_container() {
        let container = sample();
        let parsed = Container::from_bytes(&container.to_bytes(), true).unwrap();
        assert_eq!(parsed, container);
    }

    #[test]
    fn test_empty_container() {
        let bytes = Container::empty().to_bytes();
        assert_eq!(bytes.len(), ContainerHeader::SIZE);
        let parsed = Container::from_bytes(&bytes, true).unwrap();
        assert_eq!(parsed, Container::empty());
    }

    fn assert_corrupt(data: &[u8]) {
        assert!(
            matches!(Container::from_bytes(data, true), Err(CodecError::CorruptStream(_))),
            "accepted {:?}",
            data
        );
    }

    #[test]
    fn test_rejects_bad_magic_and_version() {
        let mut bytes = sample().to_bytes();
        bytes[0] = b'X';
        assert_corrupt(&bytes);

        let mut bytes = sample().to_bytes();
        bytes[5] = 2;
        assert_corrupt(&bytes);
    }

    #[test]
    fn test_rejects_truncation_and_trailing_bytes() {
        let bytes = sample().to_bytes();
        for len in 0..bytes.len() {
            assert_corrupt(&bytes[..len]);
        }
        let mut longer = bytes.clone();
        longer.push(0);
        assert_corrupt(&longer);
    }

    #[test]
    fn test_rejects_checksum_mismatch() {
        let mut bytes = sample().to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert_corrupt(&bytes);
        // structural checks still pass without verification
        assert!(Container::from_bytes(&bytes, false).is_ok());
    }

    #[test]
    fn test_rejects_inconsistent_counts() {
        let mut header = ContainerHeader {
            version: CONTAINER_VERSION,
            symbol_count: 0,
            bit_count: 8,
            tree_len: 0,
            checksum: crc32_parts(&[&[0u8]]),
        };
        let mut bytes = header.encode().to_vec();
        bytes.push(0);
        assert_corrupt(&bytes);

        header.symbol_count = 9;
        let mut bytes = header.encode().to_vec();
        bytes.push(0);
        assert_corrupt(&bytes);
    }
}
