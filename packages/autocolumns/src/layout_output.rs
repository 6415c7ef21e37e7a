//! Results of a layout pass

use autocolumns_traits::NodeId;

/// Final placement of one item
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub node_id: NodeId,
    /// Column index, counted from the left
    pub column: usize,
    pub left: f32,
    pub top: f32,
    /// Measured height after width and intrinsic padding were applied
    pub height: f32,
}

impl PlacedItem {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Summary of a layout pass, mirroring what was written to the elements
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub column_width: f32,
    /// Height given to the container
    pub height: f32,
    /// Items in layout order
    pub items: Vec<PlacedItem>,
}

impl GridLayout {
    /// Items placed in `column`, top to bottom
    pub fn column_items(&self, column: usize) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(move |item| item.column == column)
    }

    /// Bottom edge of each column, 0 for empty columns
    pub fn column_bottoms(&self) -> Vec<f32> {
        let mut bottoms = vec![0.0_f32; self.columns];
        for item in &self.items {
            if let Some(bottom) = bottoms.get_mut(item.column) {
                *bottom = bottom.max(item.bottom());
            }
        }
        bottoms
    }
}
