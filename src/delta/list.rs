// Sorted, owning collection of deltas.
//
// Backed by a `Vec<Delta>` kept sorted by the collection's `DeltaOrder`.
// New entries are placed after every entry that compares equal, so ties
// keep insertion order.

use std::cmp::Ordering;

use crate::config::CodecConfig;
use crate::error::DeltaError;
use crate::frame::FramePair;

use super::order::{DeltaOrder, PriorityOrder, StartOrder};
use super::span::Delta;

/// How much detail the diagnostic dump includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    /// Adds per-byte pixel-change counts.
    High,
}

#[derive(Debug, Clone)]
pub struct DeltaList<O> {
    items: Vec<Delta>,
    order: O,
}

/// Deltas ranked for replay.
pub type PriorityList = DeltaList<PriorityOrder>;

/// Deltas sorted by position.
pub type StartList = DeltaList<StartOrder>;

impl<O: DeltaOrder> DeltaList<O> {
    pub fn new(order: O) -> Self {
        Self {
            items: Vec::new(),
            order,
        }
    }

    pub fn order(&self) -> &O {
        &self.order
    }

    /// Insert `delta` at its sorted position and return that position.
    pub fn insert(&mut self, delta: Delta) -> usize {
        let pos = self
            .items
            .partition_point(|existing| self.order.compare(existing, &delta) != Ordering::Greater);
        self.items.insert(pos, delta);
        pos
    }

    /// Remove and return the delta at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Delta> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Delta> {
        self.items.get(index)
    }

    /// Mutable access for setting the frozen marker. Nothing reachable through
    /// `&mut Delta` affects ordering.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Delta> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delta> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Delta> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Delta] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of byte lengths.
    pub fn total_bytes(&self) -> usize {
        self.items.iter().map(Delta::byte_len).sum()
    }

    /// Sum of estimated replay cycles.
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(Delta::cost).sum()
    }

    /// One line per delta, in collection order.
    pub fn dump_lines(&self, verbosity: Verbosity) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, d)| match (verbosity, d.pixels_changed()) {
                (Verbosity::High, Some(px)) => format!("{i:>5}: {d} pixels={px}"),
                _ => format!("{i:>5}: {d}"),
            })
            .collect()
    }

    /// Send the dump to the log at debug level.
    pub fn log_dump(&self, verbosity: Verbosity) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!(
            "{} deltas, {} bytes, {:.2} cycles",
            self.len(),
            self.total_bytes(),
            self.total_cost()
        );
        for line in self.dump_lines(verbosity) {
            log::debug!("{line}");
        }
    }

    /// Move every delta into a collection with a different order.
    pub fn reorder<P: DeltaOrder>(self, order: P) -> DeltaList<P> {
        let mut items = self.items;
        // Stable sort keeps the current order among ties.
        items.sort_by(|a, b| order.compare(a, b));
        DeltaList { items, order }
    }
}

impl DeltaList<PriorityOrder> {
    /// Bisect every delta of two or more bytes.
    ///
    /// Positions are visited from last to first over a snapshot of the
    /// current length. A child is always shorter than every delta still
    /// waiting to be visited, so it sorts at or after the visited position
    /// and is never split again in the same pass. Single-byte deltas stay
    /// where they are.
    ///
    /// Returns the number of deltas that were split. On error the list may
    /// hold a partially split set.
    pub fn split_all(
        &mut self,
        frames: &FramePair<'_>,
        config: &CodecConfig,
    ) -> Result<usize, DeltaError> {
        let snapshot = self.items.len();
        let mut split = 0;

        for index in (0..snapshot).rev() {
            let delta = &self.items[index];
            let len = delta.byte_len();
            if len < 2 {
                continue;
            }

            let (start, end) = (delta.start(), delta.end());
            let first_end = start + (len - len / 2) - 1;
            let first = Delta::classify(start, first_end, frames, config)?;
            let second = Delta::classify(first_end + 1, end, frames, config)?;

            self.items.remove(index);
            let a = self.insert(first);
            let b = self.insert(second);
            debug_assert!(a >= index && b >= index, "split child sorted before {index}");
            split += 1;
        }

        log::debug!("split {split} of {snapshot} deltas");
        Ok(split)
    }
}

impl Default for DeltaList<PriorityOrder> {
    fn default() -> Self {
        Self::new(PriorityOrder::default())
    }
}

impl Default for DeltaList<StartOrder> {
    fn default() -> Self {
        Self::new(StartOrder)
    }
}

impl<O: DeltaOrder> Extend<Delta> for DeltaList<O> {
    fn extend<I: IntoIterator<Item = Delta>>(&mut self, iter: I) {
        for delta in iter {
            self.insert(delta);
        }
    }
}

impl<'a, O> IntoIterator for &'a DeltaList<O> {
    type Item = &'a Delta;
    type IntoIter = std::slice::Iter<'a, Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<O> IntoIterator for DeltaList<O> {
    type Item = Delta;
    type IntoIter = std::vec::IntoIter<Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
