use serde::Serialize;

use crate::engine::frequency::{count_frequencies, entropy};
use crate::engine::huffman::{assign_codes, code_to_string, weighted_path_length};
use crate::protocol::constants::CONTAINER_VERSION;
use crate::protocol::container::{Container, ContainerHeader};
use crate::protocol::tree::serialize_tree;

#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
    pub original_bytes: u64,
    pub container_bytes: u64,
    pub payload_bits: u64,
    pub distinct_symbols: usize,
    /// Bits per input symbol actually spent in the payload
    pub average_code_length: f64,
    /// Shannon lower bound in bits per symbol
    pub entropy_bits: f64,
    pub ratio: f64,
}

impl CompressionStats {
    pub fn measure(input: &[u8], container: &Container, container_bytes: usize) -> Self {
        let freqs = count_frequencies(input);
        let payload_bits = match &container.tree {
            Some(tree) => weighted_path_length(&freqs, &assign_codes(tree)),
            None => 0,
        };

        let average_code_length = if input.is_empty() {
            0.0
        } else {
            payload_bits as f64 / input.len() as f64
        };
        let ratio = if input.is_empty() {
            0.0
        } else {
            container_bytes as f64 / input.len() as f64
        };

        Self {
            original_bytes: input.len() as u64,
            container_bytes: container_bytes as u64,
            payload_bits,
            distinct_symbols: freqs.len(),
            average_code_length,
            entropy_bits: entropy(&freqs),
            ratio,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeEntry {
    pub symbol: u8,
    pub code: String,
}

/// What `inspect` reports about a parsed container.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerSummary {
    pub version: u16,
    pub symbol_count: u64,
    pub bit_count: u64,
    pub padding_bits: u64,
    pub header_bytes: usize,
    pub tree_bytes: usize,
    pub payload_bytes: usize,
    pub codes: Vec<CodeEntry>,
}

impl ContainerSummary {
    pub fn from_container(container: &Container) -> Self {
        let mut tree_bytes = Vec::new();
        let codes = match &container.tree {
            Some(tree) => {
                serialize_tree(tree, &mut tree_bytes);
                assign_codes(tree)
                    .into_iter()
                    .map(|(symbol, code)| CodeEntry {
                        symbol,
                        code: code_to_string(&code),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Self {
            version: CONTAINER_VERSION,
            symbol_count: container.symbol_count,
            bit_count: container.payload.bit_len,
            padding_bits: container.payload.padding_bits(),
            header_bytes: ContainerHeader::SIZE,
            tree_bytes: tree_bytes.len(),
            payload_bytes: container.payload.bytes.len(),
            codes,
        }
    }
}
