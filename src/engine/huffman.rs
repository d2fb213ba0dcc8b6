use std::collections::{BTreeMap, BinaryHeap};
use std::cmp::Ordering;

use crate::engine::frequency::FrequencyMap;
use crate::error::CodecError;

/// Bit string, most significant (first emitted) bit first. `false` = 0.
pub type Code = Vec<bool>;
pub type CodeMap = BTreeMap<u8, Code>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> HuffmanNode {
        HuffmanNode::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Heap slot. `seq` is the insertion order and breaks frequency ties so the
/// tree shape is reproducible.
struct QueueEntry {
    freq: u64,
    seq: usize,
    node: HuffmanNode,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other.freq.cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Builds the Huffman tree for `freqs`.
///
/// Leaves enter the queue in ascending symbol order and every merged node is
/// queued behind all nodes created before it; equal frequencies pop in that
/// order. The first node popped becomes the left child.
pub fn build_tree(freqs: &FrequencyMap) -> Result<HuffmanNode, CodecError> {
    if freqs.is_empty() {
        return Err(CodecError::EmptyInput);
    }

    let mut heap = BinaryHeap::with_capacity(freqs.len());
    let mut seq = 0usize;
    for (&symbol, &freq) in freqs {
        heap.push(QueueEntry {
            freq,
            seq,
            node: HuffmanNode::Leaf { symbol, freq },
        });
        seq += 1;
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let node = HuffmanNode::merge(left.node, right.node);
        heap.push(QueueEntry {
            freq: node.freq(),
            seq,
            node,
        });
        seq += 1;
    }

    heap.pop()
        .map(|entry| entry.node)
        .ok_or(CodecError::EmptyInput)
}

/// Walks the tree assigning left = 0, right = 1. A lone leaf root gets `0`.
pub fn assign_codes(root: &HuffmanNode) -> CodeMap {
    fn build_codes(node: &HuffmanNode, code: &mut Code, table: &mut CodeMap) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                let assigned = if code.is_empty() { vec![false] } else { code.clone() };
                table.insert(*symbol, assigned);
            }
            HuffmanNode::Internal { left, right, .. } => {
                code.push(false);
                build_codes(left, code, table);
                code.pop();

                code.push(true);
                build_codes(right, code, table);
                code.pop();
            }
        }
    }

    let mut table = CodeMap::new();
    build_codes(root, &mut Vec::new(), &mut table);
    table
}

/// Sum of `frequency * code length` over every symbol in `freqs`.
pub fn weighted_path_length(freqs: &FrequencyMap, codes: &CodeMap) -> u64 {
    freqs
        .iter()
        .map(|(symbol, &freq)| freq * codes.get(symbol).map_or(0, |c| c.len() as u64))
        .sum()
}

pub fn code_to_string(code: &[bool]) -> String {
    code.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
