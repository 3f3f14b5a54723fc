use tessel_format::{ContainerError, FormatError};

/// Errors from writing a definition file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("container: {0}")]
    Container(#[from] ContainerError),

    #[error("backpatch failed: {0}")]
    Format(#[from] FormatError),

    #[error("{what} count {count} does not fit in an i32")]
    TooMany { what: &'static str, count: usize },

    #[error("{what} {value} does not fit in an i32")]
    TooLarge { what: &'static str, value: u32 },
}
