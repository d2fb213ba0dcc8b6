pub mod config;
pub mod frequency;
pub mod huffman;
pub mod bitpack;
pub mod compressor;
pub mod decompressor;

pub use compressor::*;
pub use decompressor::*;
