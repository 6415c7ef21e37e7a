//! Shortest-column packing
//!
//! Items fill the first row left to right. Every later item goes to the
//! column whose bottom is currently highest on the page (smallest bottom
//! value), one gutter below it. Ties go to the column whose bottom was
//! recorded first, which matches a stable sort of the column list followed
//! by taking its head.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// The current bottom edge of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBottom {
    pub column: usize,
    pub left: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy)]
struct TrackedColumn {
    bottom: f32,
    sequence: u64,
    column: usize,
    left: f32,
}

impl TrackedColumn {
    fn key(&self) -> (f32, u64) {
        (self.bottom, self.sequence)
    }
}

impl PartialEq for TrackedColumn {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TrackedColumn {}

impl PartialOrd for TrackedColumn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TrackedColumn {
    fn cmp(&self, other: &Self) -> Ordering {
        let (bottom, sequence) = self.key();
        let (other_bottom, other_sequence) = other.key();
        bottom
            .total_cmp(&other_bottom)
            .then(sequence.cmp(&other_sequence))
    }
}

/// Column bottoms ordered shortest first, ties by insertion order
#[derive(Debug, Clone, Default)]
pub struct ColumnTracker {
    heap: BinaryHeap<Reverse<TrackedColumn>>,
    next_sequence: u64,
}

impl ColumnTracker {
    pub fn with_capacity(columns: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(columns),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, column: usize, left: f32, bottom: f32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(TrackedColumn {
            bottom,
            sequence,
            column,
            left,
        }));
    }

    pub fn peek_shortest(&self) -> Option<ColumnBottom> {
        self.heap.peek().map(|Reverse(tracked)| tracked.into())
    }

    pub fn pop_shortest(&mut self) -> Option<ColumnBottom> {
        self.heap.pop().map(|Reverse(tracked)| (&tracked).into())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Snapshot of every column's bottom, ordered by column index
    pub fn bottoms(&self) -> Vec<ColumnBottom> {
        let mut bottoms: Vec<ColumnBottom> = self
            .heap
            .iter()
            .map(|Reverse(tracked)| tracked.into())
            .collect();
        bottoms.sort_by_key(|bottom| bottom.column);
        bottoms
    }
}

impl From<&TrackedColumn> for ColumnBottom {
    fn from(tracked: &TrackedColumn) -> Self {
        Self {
            column: tracked.column,
            left: tracked.left,
            bottom: tracked.bottom,
        }
    }
}

/// Where the next item goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub column: usize,
    pub left: f32,
    pub top: f32,
}

/// Places items one at a time into a fixed number of columns
#[derive(Debug, Clone)]
pub struct ColumnPacker {
    columns: usize,
    column_width: f32,
    gutter: f32,
    placed: usize,
    next_left: f32,
    height: f32,
    tracker: ColumnTracker,
}

impl ColumnPacker {
    pub fn new(columns: usize, column_width: f32, gutter: f32) -> Self {
        let columns = columns.max(1);
        Self {
            columns,
            column_width,
            gutter,
            placed: 0,
            next_left: 0.0,
            height: 0.0,
            tracker: ColumnTracker::with_capacity(columns),
        }
    }

    /// The slot the next item will occupy
    pub fn next_slot(&self) -> Slot {
        if self.placed < self.columns {
            return Slot {
                column: self.placed,
                left: self.next_left,
                top: 0.0,
            };
        }
        match self.tracker.peek_shortest() {
            Some(shortest) => Slot {
                column: shortest.column,
                left: shortest.left,
                top: shortest.bottom + self.gutter,
            },
            // Unreachable once the first row is filled
            None => Slot {
                column: 0,
                left: 0.0,
                top: 0.0,
            },
        }
    }

    /// Place the next item. `measure` receives the chosen slot, positions the
    /// item there and returns its height. Nothing is recorded if it fails.
    pub fn place_with<E>(
        &mut self,
        measure: impl FnOnce(Slot) -> Result<f32, E>,
    ) -> Result<(Slot, f32), E> {
        let slot = self.next_slot();
        let height = measure(slot)?;
        self.commit(slot, height);
        Ok((slot, height))
    }

    fn commit(&mut self, slot: Slot, height: f32) {
        let bottom = slot.top + height;
        if self.placed < self.columns {
            self.next_left += self.column_width + self.gutter;
        } else {
            self.tracker.pop_shortest();
        }
        self.tracker.push(slot.column, slot.left, bottom);
        self.placed += 1;
        self.height = self.height.max(bottom);
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Lowest bottom edge of any placed item
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn tracker(&self) -> &ColumnTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    fn pack(columns: usize, column_width: f32, gutter: f32, heights: &[f32]) -> Vec<(Slot, f32)> {
        let mut packer = ColumnPacker::new(columns, column_width, gutter);
        heights
            .iter()
            .map(|&height| {
                packer
                    .place_with(|_| Ok::<_, Infallible>(height))
                    .unwrap()
            })
            .collect()
    }

    /// Stable sort of `(left, bottom)` pairs, take the head, push the new
    /// bottom to the back.
    fn pack_by_sorting(
        columns: usize,
        column_width: f32,
        gutter: f32,
        heights: &[f32],
    ) -> Vec<(f32, f32)> {
        let mut coords: Vec<(f32, f32)> = Vec::new();
        let mut left = 0.0;
        let mut positions = Vec::new();
        for (index, &height) in heights.iter().enumerate() {
            if index < columns {
                positions.push((left, 0.0));
                coords.push((left, height));
                left += column_width + gutter;
            } else {
                coords.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
                let (left, bottom) = coords.remove(0);
                let top = bottom + gutter;
                positions.push((left, top));
                coords.push((left, top + height));
            }
        }
        positions
    }

    #[test]
    fn test_first_row_left_to_right() {
        let placed = pack(3, 330.0, 5.0, &[100.0, 50.0, 75.0]);
        let lefts: Vec<f32> = placed.iter().map(|(slot, _)| slot.left).collect();
        assert_eq!(lefts, vec![0.0, 335.0, 670.0]);
        assert!(placed.iter().all(|(slot, _)| slot.top == 0.0));
    }

    #[test]
    fn test_gap_fill_picks_shortest_column() {
        let placed = pack(3, 330.0, 5.0, &[100.0, 50.0, 75.0, 20.0, 20.0]);
        // Column 1 (bottom 50) is shortest
        assert_eq!(placed[3].0, Slot { column: 1, left: 335.0, top: 55.0 });
        // Column 1 now ends at 75, tying column 2 which was recorded first
        assert_eq!(placed[4].0, Slot { column: 2, left: 670.0, top: 80.0 });
    }

    #[test]
    fn test_equal_heights_cycle_through_columns() {
        let placed = pack(3, 100.0, 0.0, &[10.0; 9]);
        let columns: Vec<usize> = placed.iter().map(|(slot, _)| slot.column).collect();
        assert_eq!(columns, vec![0, 1, 2, 0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_matches_stable_sort_reference() {
        // Deterministic pseudo-random heights with many ties
        let heights: Vec<f32> = (0..200u32)
            .map(|i| ((i.wrapping_mul(2_654_435_761) >> 7) % 6) as f32 * 40.0)
            .collect();

        for columns in 1..=6 {
            let expected = pack_by_sorting(columns, 200.0, 5.0, &heights);
            let actual: Vec<(f32, f32)> = pack(columns, 200.0, 5.0, &heights)
                .into_iter()
                .map(|(slot, _)| (slot.left, slot.top))
                .collect();
            assert_eq!(actual, expected, "{columns} columns");
        }
    }

    #[test]
    fn test_each_item_lands_on_minimal_bottom() {
        let heights = [120.0, 80.0, 200.0, 40.0, 90.0, 10.0, 300.0, 60.0];
        let mut packer = ColumnPacker::new(3, 100.0, 5.0);
        for (index, &height) in heights.iter().enumerate() {
            let before = packer.tracker().bottoms();
            let (slot, _) = packer.place_with(|_| Ok::<_, Infallible>(height)).unwrap();
            if index >= 3 {
                let minimal = before
                    .iter()
                    .map(|column| column.bottom)
                    .fold(f32::INFINITY, f32::min);
                assert_eq!(slot.top, minimal + 5.0);
            }
        }
        assert_eq!(packer.tracker().len(), 3);
        assert_eq!(packer.placed(), heights.len());
    }

    #[test]
    fn test_height_tracks_lowest_bottom() {
        let mut packer = ColumnPacker::new(2, 100.0, 5.0);
        assert_eq!(packer.height(), 0.0);
        for height in [30.0, 10.0, 50.0] {
            packer.place_with(|_| Ok::<_, Infallible>(height)).unwrap();
        }
        // Third item goes under the 10px item: 15 + 50
        assert_eq!(packer.height(), 65.0);
    }

    #[test]
    fn test_failed_measurement_records_nothing() {
        let mut packer = ColumnPacker::new(2, 100.0, 5.0);
        let result = packer.place_with(|_| Err("detached"));
        assert_eq!(result, Err("detached"));
        assert_eq!(packer.placed(), 0);
        assert!(packer.tracker().is_empty());
    }
}
