// Borrowed view of the two frame buffers a delta is classified against.

use crate::error::DeltaError;

/// The previous and next raster buffers, both exactly `buffer_size` bytes.
#[derive(Debug, Clone, Copy)]
pub struct FramePair<'a> {
    prev: &'a [u8],
    next: &'a [u8],
}

impl<'a> FramePair<'a> {
    /// Pair two buffers, checking both match the configured size.
    pub fn new(prev: &'a [u8], next: &'a [u8], buffer_size: usize) -> Result<Self, DeltaError> {
        for (which, buf) in [("previous", prev), ("next", next)] {
            if buf.len() != buffer_size {
                return Err(DeltaError::FrameSizeMismatch {
                    which,
                    actual: buf.len(),
                    expected: buffer_size,
                });
            }
        }
        Ok(Self { prev, next })
    }

    pub fn prev(&self) -> &'a [u8] {
        self.prev
    }

    pub fn next(&self) -> &'a [u8] {
        self.next
    }

    /// Buffer size shared by both frames.
    pub fn size(&self) -> usize {
        self.next.len()
    }
}
