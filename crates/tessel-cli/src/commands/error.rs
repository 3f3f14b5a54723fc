use tessel_codec::{DecodeError, RpcError};
use tessel_schema::{EmitError, LoadError, SourceError};

/// Anything a command can fail with. Printed as `error: <message>`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Source {
        path: String,
        #[source]
        source: SourceError,
    },

    #[error("{path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("failed to emit definition file: {0}")]
    Emit(#[from] EmitError),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("invalid hex payload: {0}")]
    Hex(String),

    #[error("invalid --values: {0}")]
    Values(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Rpc(#[from] RpcError),
}
