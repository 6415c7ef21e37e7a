//! Element access used by the layout engine

use thiserror::Error;

use crate::NodeId;
use crate::selector::Selector;
use crate::style::{StyleProperty, StyleValue};

/// Errors raised by a [`GridTree`] implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("No element with id {node_id}")]
    UnknownNode { node_id: NodeId },

    #[error("Measuring element {node_id} failed: {reason}")]
    Measurement { node_id: NodeId, reason: String },
}

impl TreeError {
    pub fn measurement(node_id: NodeId, reason: impl Into<String>) -> Self {
        Self::Measurement {
            node_id,
            reason: reason.into(),
        }
    }
}

/// A tree of elements the engine can inspect and style.
///
/// Mutating methods silently ignore unknown node ids, mirroring how DOM
/// operations on detached nodes are no-ops for layout purposes. Only
/// measurement reports failure.
pub trait GridTree {
    fn parent_node(&self, node_id: NodeId) -> Option<NodeId>;

    fn children(&self, node_id: NodeId) -> &[NodeId];

    /// Lowercase tag name
    fn local_name(&self, node_id: NodeId) -> Option<&str>;

    fn has_class(&self, node_id: NodeId, class: &str) -> bool;

    fn attr(&self, node_id: NodeId, name: &str) -> Option<&str>;

    /// Current rendered width in pixels
    fn offset_width(&self, node_id: NodeId) -> f32;

    /// Rendered height in pixels with the element's current inline styles applied
    fn offset_height(&mut self, node_id: NodeId) -> Result<f32, TreeError>;

    fn add_class(&mut self, node_id: NodeId, class: &str);

    fn remove_class(&mut self, node_id: NodeId, class: &str);

    fn remove_attr(&mut self, node_id: NodeId, name: &str);

    /// Set an inline style property, or clear it with `None`
    fn set_style(&mut self, node_id: NodeId, property: StyleProperty, value: Option<StyleValue>);

    /// First descendant of `scope` (in document order) matching `selector`.
    /// `scope` itself is never returned.
    fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node_id) = stack.pop() {
            if selector.matches(self, node_id) {
                return Some(node_id);
            }
            stack.extend(self.children(node_id).iter().rev().copied());
        }
        None
    }
}
