//! Container format constants

/// Container magic bytes: "HUFP"
pub const CONTAINER_MAGIC: [u8; 4] = *b"HUFP";

/// Current container version
pub const CONTAINER_VERSION: u16 = 1;

/// Serialized tree node tags (pre-order)
pub const TREE_TAG_INTERNAL: u8 = 0x00;
pub const TREE_TAG_LEAF: u8 = 0x01;

/// Hard safety limits
pub const MAX_TREE_LEAVES: usize = 256;
pub const MAX_TREE_DEPTH: usize = MAX_TREE_LEAVES - 1;
pub const MAX_TREE_BYTES: usize = MAX_TREE_LEAVES * 2 + (MAX_TREE_LEAVES - 1);
