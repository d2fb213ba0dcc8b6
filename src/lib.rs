//! Static Huffman coding of byte streams.
//!
//! [`encode`] turns arbitrary bytes into a self-describing container (serialized
//! code tree, original symbol count, packed payload) and [`decode`] restores the
//! original bytes from it.
//!
//! ```
//! use huffpack::{decode, encode, EngineConfig};
//!
//! let config = EngineConfig::default();
//! let packed = encode(b"aaabbc", &config)?;
//! assert_eq!(decode(&packed, &config)?, b"aaabbc");
//! # Ok::<(), huffpack::CodecError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod stats;
pub mod utils;

pub use engine::config::EngineConfig;
pub use engine::{compress, decode, decompress, encode};
pub use error::CodecError;
pub use protocol::container::Container;
