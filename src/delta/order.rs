// Ordering strategies for delta collections.
//
// `PriorityOrder` ranks deltas for replay so a budget-limited consumer can
// keep a prefix. `StartOrder` sorts by position for adjacency scans.

use std::cmp::Ordering;

use crate::config::CodecConfig;

use super::span::Delta;

/// Total order over deltas used by [`DeltaList`](super::list::DeltaList).
pub trait DeltaOrder {
    fn compare(&self, a: &Delta, b: &Delta) -> Ordering;
}

/// Replay priority: longest first, then cheapest, then grouped by fill
/// value (highest first), then by position.
///
/// With an interlace mask the position key is `start & mask`, so the two
/// fields of one visual row land next to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityOrder {
    interlace_mask: Option<usize>,
}

impl PriorityOrder {
    /// Plain start-offset tie-break.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interlace_mask(mask: usize) -> Self {
        Self {
            interlace_mask: Some(mask),
        }
    }

    pub fn for_config(config: &CodecConfig) -> Self {
        Self {
            interlace_mask: config.interlace_mask(),
        }
    }

    pub fn interlace_mask(&self) -> Option<usize> {
        self.interlace_mask
    }

    fn position_key(&self, start: usize) -> usize {
        match self.interlace_mask {
            Some(mask) => start & mask,
            None => start,
        }
    }
}

impl DeltaOrder for PriorityOrder {
    fn compare(&self, a: &Delta, b: &Delta) -> Ordering {
        b.byte_len()
            .cmp(&a.byte_len())
            .then_with(|| a.cost().total_cmp(&b.cost()))
            .then_with(|| b.fill_value().cmp(&a.fill_value()))
            .then_with(|| self.position_key(a.start()).cmp(&self.position_key(b.start())))
    }
}

/// Ascending start offset only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartOrder;

impl DeltaOrder for StartOrder {
    fn compare(&self, a: &Delta, b: &Delta) -> Ordering {
        a.start().cmp(&b.start())
    }
}
