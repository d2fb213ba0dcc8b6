use crate::engine::huffman::{CodeMap, HuffmanNode};
use crate::error::CodecError;
use crate::utils::bits::{BitReader, BitWriter};

/// Packed payload plus the number of meaningful bits in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub bit_len: u64,
}

impl PackedBits {
    /// Trailing zero bits in the last byte.
    pub fn padding_bits(&self) -> u64 {
        self.bytes.len() as u64 * 8 - self.bit_len
    }
}

pub fn pack(input: &[u8], codes: &CodeMap) -> Result<PackedBits, CodecError> {
    // indexed by byte value
    let mut table: [Option<&[bool]>; 256] = [None; 256];
    for (&symbol, code) in codes {
        table[symbol as usize] = Some(code.as_slice());
    }

    let mut writer = BitWriter::with_capacity(input.len() / 2);
    for &byte in input {
        let code = table[byte as usize].ok_or(CodecError::UnknownSymbol(byte))?;
        writer.push_bits(code);
    }

    let (bytes, bit_len) = writer.finish();
    Ok(PackedBits { bytes, bit_len })
}

/// Decodes exactly `symbol_count` symbols by walking `root`.
///
/// Every meaningful bit must be consumed; leftover bits mean the recorded
/// counts disagree with the stream.
pub fn unpack(
    packed: &PackedBits,
    root: &HuffmanNode,
    symbol_count: u64,
) -> Result<Vec<u8>, CodecError> {
    if symbol_count > packed.bit_len {
        return Err(CodecError::corrupt(format!(
            "{} symbols cannot fit in {} bits",
            symbol_count, packed.bit_len
        )));
    }

    let mut reader = BitReader::new(&packed.bytes, packed.bit_len);
    let mut out = Vec::with_capacity(symbol_count.min(reader.remaining()) as usize);

    match root {
        HuffmanNode::Leaf { symbol, .. } => {
            for _ in 0..symbol_count {
                match reader.read_bit() {
                    Some(false) => out.push(*symbol),
                    Some(true) => {
                        return Err(CodecError::corrupt("unexpected 1 bit in single-symbol stream"))
                    }
                    None => return Err(CodecError::corrupt("bitstream exhausted")),
                }
            }
        }
        HuffmanNode::Internal { .. } => {
            while (out.len() as u64) < symbol_count {
                let mut node = root;
                while let HuffmanNode::Internal { left, right, .. } = node {
                    node = match reader.read_bit() {
                        Some(false) => left,
                        Some(true) => right,
                        None => return Err(CodecError::corrupt("bitstream exhausted")),
                    };
                }
                if let HuffmanNode::Leaf { symbol, .. } = node {
                    out.push(*symbol);
                }
            }
        }
    }

    if reader.position() != packed.bit_len {
        return Err(CodecError::corrupt(format!(
            "decoded {} symbols using {} of {} bits",
            symbol_count,
            reader.position(),
            packed.bit_len
        )));
    }

    Ok(out)
}
