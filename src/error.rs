// Fatal conditions raised by delta construction.
//
// Each variant means a caller or configuration bug; the host decides how to
// report it and stop. Recoverable anomalies are logged, never returned.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    #[error("delta end {end} precedes start {start}")]
    InvertedRange { start: usize, end: usize },

    #[error("delta at {start} has zero length")]
    Empty { start: usize },

    #[error("delta [{start}, {end}] is {len} bytes, larger than the {buffer_size}-byte buffer")]
    TooLong {
        start: usize,
        end: usize,
        len: usize,
        buffer_size: usize,
    },

    #[error("delta [{start}, {end}] runs past the end of the {buffer_size}-byte buffer")]
    OutOfBounds {
        start: usize,
        end: usize,
        buffer_size: usize,
    },

    #[error("unsupported pixel bit depth: {0}")]
    UnsupportedBitDepth(u8),

    #[error("{which} frame is {actual} bytes, expected {expected}")]
    FrameSizeMismatch {
        which: &'static str,
        actual: usize,
        expected: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
