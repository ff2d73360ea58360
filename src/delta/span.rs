// A single changed byte range and the metadata derived from it.
//
// Construction validates the range, classifies it as a run (one repeated
// byte) or a slice (anything else), prices it in replay cycles and, for
// single-byte ranges, counts how many pixels actually changed.

use std::fmt;

use crate::config::CodecConfig;
use crate::error::DeltaError;
use crate::frame::FramePair;

/// How a delta is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Heterogeneous bytes, replayed by copying.
    Slice,
    /// Every byte equals the fill value, replayed by filling.
    Run(u8),
}

/// One contiguous range of changed bytes in the frame buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta {
    start: usize,
    end: usize,
    kind: DeltaKind,
    cost: f64,
    pixels_changed: Option<u8>,
    frozen: bool,
}

impl Delta {
    /// Classify the inclusive range `[start, end]` against `frames`.
    pub fn classify(
        start: usize,
        end: usize,
        frames: &FramePair<'_>,
        config: &CodecConfig,
    ) -> Result<Self, DeltaError> {
        let len = range_len(start, end, config.buffer_size)?;
        let limit = config.buffer_size.min(frames.size());
        if end >= limit {
            return Err(DeltaError::OutOfBounds {
                start,
                end,
                buffer_size: limit,
            });
        }

        let kind = if len < config.min_run_length {
            DeltaKind::Slice
        } else {
            scan_run(&frames.next()[start..=end])
        };

        let units = len as f64 / 2.0;
        let cost = match kind {
            DeltaKind::Slice => units * config.copy_unit_cost,
            DeltaKind::Run(_) => units * config.fill_unit_cost,
        };

        let pixels_changed = if len == 1 {
            let xor = frames.prev()[start] ^ frames.next()[start];
            if xor == 0 {
                log::warn!("byte at {start} reported as changed but is identical in both frames");
                Some(0)
            } else {
                Some(changed_pixels(xor, config.bits_per_pixel)?)
            }
        } else {
            None
        };

        Ok(Self {
            start,
            end,
            kind,
            cost,
            pixels_changed,
            frozen: false,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of bytes covered, `end - start + 1`.
    pub fn byte_len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn kind(&self) -> DeltaKind {
        self.kind
    }

    pub fn is_run(&self) -> bool {
        matches!(self.kind, DeltaKind::Run(_))
    }

    /// Fill byte for runs, 0 for slices.
    pub fn fill_value(&self) -> u8 {
        match self.kind {
            DeltaKind::Run(value) => value,
            DeltaKind::Slice => 0,
        }
    }

    /// Estimated replay cost in CPU cycles.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Changed pixel count. Only computed for single-byte deltas.
    pub fn pixels_changed(&self) -> Option<u8> {
        self.pixels_changed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Marker owned by later optimization passes; nothing here reads it.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>6}, {:>6}] len {:>6} cost {:>10.2} ",
            self.start,
            self.end,
            self.byte_len(),
            self.cost
        )?;
        match self.kind {
            DeltaKind::Slice => f.write_str("slice")?,
            DeltaKind::Run(value) => write!(f, "run fill=0x{value:02X}")?,
        }
        if self.frozen {
            f.write_str(" frozen")?;
        }
        Ok(())
    }
}

/// Validate an inclusive range and return its length.
pub(crate) fn range_len(start: usize, end: usize, buffer_size: usize) -> Result<usize, DeltaError> {
    if end < start {
        return Err(DeltaError::InvertedRange { start, end });
    }
    let len = (end - start).saturating_add(1);
    if len > buffer_size {
        return Err(DeltaError::TooLong {
            start,
            end,
            len,
            buffer_size,
        });
    }
    Ok(len)
}

fn scan_run(bytes: &[u8]) -> DeltaKind {
    match bytes.split_first() {
        Some((&first, rest)) if rest.iter().all(|&b| b == first) => DeltaKind::Run(first),
        _ => DeltaKind::Slice,
    }
}

/// Count pixels that differ within one byte given the XOR of old and new.
pub fn changed_pixels(xor: u8, bits_per_pixel: u8) -> Result<u8, DeltaError> {
    match bits_per_pixel {
        1 => Ok(xor.count_ones() as u8),
        4 => Ok(u8::from(xor & 0x0F != 0) + u8::from(xor & 0xF0 != 0)),
        8 => Ok(u8::from(xor != 0)),
        other => Err(DeltaError::UnsupportedBitDepth(other)),
    }
}
