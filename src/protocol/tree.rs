use crate::engine::huffman::HuffmanNode;
use crate::error::CodecError;
use crate::protocol::constants::{
    MAX_TREE_DEPTH, MAX_TREE_LEAVES, TREE_TAG_INTERNAL, TREE_TAG_LEAF,
};

/// Pre-order encoding: `0x00` for an internal node followed by its left and
/// right subtrees, `0x01 <symbol>` for a leaf. Frequencies are not stored.
pub fn serialize_tree(root: &HuffmanNode, out: &mut Vec<u8>) {
    match root {
        HuffmanNode::Leaf { symbol, .. } => {
            out.push(TREE_TAG_LEAF);
            out.push(*symbol);
        }
        HuffmanNode::Internal { left, right, .. } => {
            out.push(TREE_TAG_INTERNAL);
            serialize_tree(left, out);
            serialize_tree(right, out);
        }
    }
}

/// Rebuilds a tree written by [`serialize_tree`]. The whole buffer must be
/// consumed. Rebuilt nodes carry zero frequencies.
pub fn deserialize_tree(data: &[u8]) -> Result<HuffmanNode, CodecError> {
    let mut parser = TreeParser {
        data,
        offset: 0,
        seen: [false; 256],
        leaves: 0,
    };
    let root = parser.node(0)?;

    if parser.offset != data.len() {
        return Err(CodecError::corrupt(format!(
            "{} trailing bytes after tree",
            data.len() - parser.offset
        )));
    }
    Ok(root)
}

struct TreeParser<'a> {
    data: &'a [u8],
    offset: usize,
    seen: [bool; 256],
    leaves: usize,
}

impl TreeParser<'_> {
    fn next_byte(&mut self) -> Result<u8, CodecError> {
        let byte = *self
            .data
            .get(self.offset)
            .ok_or_else(|| CodecError::corrupt("truncated tree"))?;
        self.offset += 1;
        Ok(byte)
    }

    fn node(&mut self, depth: usize) -> Result<HuffmanNode, CodecError> {
        match self.next_byte()? {
            TREE_TAG_LEAF => {
                let symbol = self.next_byte()?;
                if self.seen[symbol as usize] {
                    return Err(CodecError::corrupt(format!(
                        "symbol 0x{:02x} appears twice in tree",
                        symbol
                    )));
                }
                self.seen[symbol as usize] = true;
                self.leaves += 1;
                Ok(HuffmanNode::Leaf { symbol, freq: 0 })
            }
            TREE_TAG_INTERNAL => {
                if depth >= MAX_TREE_DEPTH || self.leaves >= MAX_TREE_LEAVES {
                    return Err(CodecError::corrupt("tree too deep"));
                }
                let left = self.node(depth + 1)?;
                let right = self.node(depth + 1)?;
                Ok(HuffmanNode::Internal {
                    freq: 0,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            }
            tag => Err(CodecError::corrupt(format!("unknown tree tag 0x{:02x}", tag))),
        }
    }
}
