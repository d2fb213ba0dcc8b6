use tracing::debug;

use crate::engine::{
    bitpack::pack,
    config::EngineConfig,
    frequency::count_frequencies,
    huffman::{assign_codes, build_tree},
};
use crate::error::CodecError;
use crate::protocol::container::Container;

/// Runs the encoding pipeline: count, build tree, assign codes, pack.
///
/// Empty input short-circuits to [`Container::empty`] without building a tree.
pub fn compress(input: &[u8], config: &EngineConfig) -> Result<Container, CodecError> {
    if input.len() > config.max_input_size {
        return Err(CodecError::InputTooLarge {
            size: input.len(),
            limit: config.max_input_size,
        });
    }

    if input.is_empty() {
        debug!("Empty input, emitting empty container");
        return Ok(Container::empty());
    }

    let freqs = count_frequencies(input);
    let tree = build_tree(&freqs)?;
    let codes = assign_codes(&tree);
    debug!(
        "Alphabet of {} symbols, tree depth {}",
        freqs.len(),
        tree.depth()
    );

    let payload = pack(input, &codes)?;
    debug!(
        "Packed {} symbols into {} bits ({} bytes)",
        input.len(),
        payload.bit_len,
        payload.bytes.len()
    );

    Ok(Container {
        tree: Some(tree),
        symbol_count: input.len() as u64,
        payload,
    })
}

/// Encodes `input` into container bytes.
pub fn encode(input: &[u8], config: &EngineConfig) -> Result<Vec<u8>, CodecError> {
    Ok(compress(input, config)?.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::container::ContainerHeader;

    #[test]
    fn test_empty_input_has_no_tree() {
        let container = compress(b"", &EngineConfig::default()).unwrap();
        assert_eq!(container, Container::empty());
        assert_eq!(encode(b"", &EngineConfig::default()).unwrap().len(), ContainerHeader::SIZE);
    }

    #[test]
    fn test_aaabbc_container() {
        let container = compress(b"aaabbc", &EngineConfig::default()).unwrap();
        assert_eq!(container.symbol_count, 6);
        assert_eq!(container.payload.bit_len, 9);
        assert_eq!(container.payload.bytes.len(), 2);
        assert_eq!(container.tree.map(|t| t.leaf_count()), Some(3));
    }

    #[test]
    fn test_input_limit() {
        let config = EngineConfig {
            max_input_size: 4,
            ..EngineConfig::default()
        };
        assert_eq!(
            compress(b"hello", &config),
            Err(CodecError::InputTooLarge { size: 5, limit: 4 })
        );
        assert!(compress(b"hell", &config).is_ok());
    }
}
