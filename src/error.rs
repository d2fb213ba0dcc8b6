use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Tree construction was asked to work on zero symbols.
    EmptyInput,
    /// A byte reached the packer without an entry in its code table.
    UnknownSymbol(u8),
    /// The container or its bitstream is structurally invalid.
    CorruptStream(String),
    InputTooLarge { size: usize, limit: usize },
}

impl CodecError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        CodecError::CorruptStream(reason.into())
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EmptyInput =>
                write!(f, "cannot build a code tree from empty input"),
            CodecError::UnknownSymbol(b) =>
                write!(f, "symbol 0x{:02x} has no code", b),
            CodecError::CorruptStream(reason) =>
                write!(f, "corrupt stream: {}", reason),
            CodecError::InputTooLarge { size, limit } =>
                write!(f, "input too large: {} bytes (limit {})", size, limit),
        }
    }
}

impl std::error::Error for CodecError {}
