/// Errors from reading or patching raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unexpected end of data: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("seek to {position} past end of data ({len} bytes)")]
    SeekOutOfBounds { position: usize, len: usize },

    #[error("fixup at {position} out of bounds ({len} bytes written)")]
    FixupOutOfBounds { position: usize, len: usize },

    #[error("string at offset {offset} is not NUL-terminated")]
    MissingTerminator { offset: usize },

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("invalid magic: expected {expected:?}, found {found:?}")]
    InvalidMagic { expected: String, found: String },

    #[error("invalid chunk count {0}")]
    InvalidChunkCount(i32),

    #[error("chunk {index} was never written")]
    UnwrittenChunk { index: usize },

    #[error("chunk {index} offset {offset} is not 4-byte aligned")]
    MisalignedChunk { index: usize, offset: u32 },

    #[error("chunk {index} offset {offset} outside data ({len} bytes)")]
    ChunkOutOfBounds { index: usize, offset: u32, len: usize },

    #[error("chunk {index} out of range ({count} chunks)")]
    NoSuchChunk { index: usize, count: usize },
}

/// Misuse of the [`ChunkContainer`](crate::ChunkContainer) state machine.
///
/// The container is left unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContainerError {
    #[error("can't start chunk '{requested}' inside active chunk '{active}'")]
    ChunkAlreadyActive { active: String, requested: String },

    #[error("can't start chunk '{requested}': all {declared} chunks have been written")]
    AllChunksWritten { requested: String, declared: usize },

    #[error("no active chunk to end")]
    NoActiveChunk,

    #[error("can't close while chunk '{name}' is active")]
    ChunkStillActive { name: String },

    #[error("closed after writing {written} of {declared} chunks")]
    Incomplete { written: usize, declared: usize },

    #[error(transparent)]
    Format(#[from] FormatError),
}
