use std::io;

#[derive(Debug, thiserror::Error)]
pub enum MovFileError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("no keyframe with parameter sets was written")]
    NoKeyframe,
    #[error("no samples were written")]
    EmptySequence,
    #[error("malformed parameter set: {0}")]
    MalformedParameterSet(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("operation cancelled")]
    Cancelled,
    #[error("cannot {operation} while the file is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    #[error("chunk offsets were already shifted")]
    OffsetAlreadyApplied,
    #[error("presentation time {pts} does not follow {previous}")]
    OutOfOrder { pts: u64, previous: u64 },
    #[error("sample has no data")]
    EmptySample,
}

pub type Result<T, E = MovFileError> = std::result::Result<T, E>;
