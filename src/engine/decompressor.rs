use tracing::debug;

use crate::engine::{bitpack::unpack, config::EngineConfig};
use crate::error::CodecError;
use crate::protocol::container::Container;

pub fn decompress(container: &Container) -> Result<Vec<u8>, CodecError> {
    let Some(ref root) = container.tree else {
        if container.symbol_count != 0 || container.payload.bit_len != 0 {
            return Err(CodecError::corrupt("payload present without a tree"));
        }
        return Ok(Vec::new());
    };

    let out = unpack(&container.payload, root, container.symbol_count)?;
    debug!(
        "Decoded {} symbols from {} bits",
        out.len(),
        container.payload.bit_len
    );
    Ok(out)
}

/// Decodes container bytes produced by [`crate::encode`].
pub fn decode(data: &[u8], config: &EngineConfig) -> Result<Vec<u8>, CodecError> {
    let container = Container::from_bytes(data, config.verify_checksum)?;
    decompress(&container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bitpack::PackedBits;
    use crate::engine::compressor::encode;

    #[test]
    fn test_round_trip() {
        let config = EngineConfig::default();
        let inputs: [&[u8]; 5] = [b"", b"a", b"aaabbc", b"hello, world", &[0, 255, 0, 255, 7]];
        for input in inputs {
            let bytes = encode(input, &config).unwrap();
            assert_eq!(decode(&bytes, &config).unwrap(), input);
        }
    }

    #[test]
    fn test_payload_without_tree() {
        let container = Container {
            tree: None,
            symbol_count: 1,
            payload: PackedBits { bytes: vec![0], bit_len: 1 },
        };
        assert!(matches!(decompress(&container), Err(CodecError::CorruptStream(_))));
    }
}
