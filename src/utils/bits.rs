/// MSB-first bit sink. The last byte is zero-padded.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        let bit_offset = (self.bit_len % 8) as u32;
        if bit_offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - bit_offset);
            }
        }
        self.bit_len += 1;
    }

    pub fn push_bits(&mut self, bits: &[bool]) {
        for &bit in bits {
            self.push_bit(bit);
        }
    }

    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    pub fn finish(self) -> (Vec<u8>, u64) {
        (self.bytes, self.bit_len)
    }
}

/// MSB-first bit source limited to `bit_len` meaningful bits.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_len: u64,
    pos: u64,
}

impl<'a> BitReader<'a> {
    /// `bit_len` is clamped to the bits actually present in `bytes`.
    pub fn new(bytes: &'a [u8], bit_len: u64) -> Self {
        let available = bytes.len() as u64 * 8;
        Self {
            bytes,
            bit_len: bit_len.min(available),
            pos: 0,
        }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte = self.bytes[(self.pos / 8) as usize];
        let bit = (byte >> (7 - (self.pos % 8))) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.bit_len - self.pos
    }
}

/// Bytes needed to hold `bit_len` bits.
pub fn bytes_for_bits(bit_len: u64) -> u64 {
    bit_len.div_ceil(8)
}
