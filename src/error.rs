use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Fatal conditions. Malformed opcodes are not errors; the processor skips them.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("stack overflow: call stack is already {depth} entries deep")]
    StackOverflow { depth: usize },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frontend error: {0}")]
    Frontend(String),
}
