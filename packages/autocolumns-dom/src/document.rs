use autocolumns_traits::{GridTree, NodeId, StyleProperty, StyleValue, TreeError};
use slab::Slab;

use crate::measure::measure_height;
use crate::node::{Attribute, ElementNode, InlineStyle};

/// A headless tree of elements.
///
/// Elements without a parent are laid out against the viewport width.
#[derive(Debug, Clone)]
pub struct GridDocument {
    pub(crate) nodes: Slab<ElementNode>,
    viewport_width: f32,
}

impl GridDocument {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            nodes: Slab::new(),
            viewport_width,
        }
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Change the viewport width, e.g. in response to a window resize
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
    }

    /// Create a detached element
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(ElementNode::new(id, local_name));
        id
    }

    /// Create an element and append it to `parent`
    pub fn create_child(&mut self, parent: NodeId, local_name: &str) -> NodeId {
        let child = self.create_element(local_name);
        self.append_child(parent, child);
        child
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains(parent) || !self.nodes.contains(child) {
            return;
        }
        if let Some(previous) = self.nodes[child].parent.take() {
            self.nodes[previous].children.retain(|&id| id != child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    pub fn node(&self, node_id: NodeId) -> Option<&ElementNode> {
        self.nodes.get(node_id)
    }

    pub fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        match node.attrs.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => node.attrs.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn set_content_height(&mut self, node_id: NodeId, height: f32) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.content_height = height.max(0.0);
        }
    }

    pub fn inline_style(&self, node_id: NodeId) -> Option<&InlineStyle> {
        self.nodes.get(node_id).map(|node| &node.style)
    }

    pub fn style_value(&self, node_id: NodeId, property: StyleProperty) -> Option<StyleValue> {
        self.inline_style(node_id)
            .and_then(|style| style.get(property))
    }

    pub fn classes(&self, node_id: NodeId) -> &[String] {
        self.nodes
            .get(node_id)
            .map(|node| node.classes.as_slice())
            .unwrap_or(&[])
    }
}

impl GridTree for GridDocument {
    fn parent_node(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id)?.parent
    }

    fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(node_id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    fn local_name(&self, node_id: NodeId) -> Option<&str> {
        self.nodes.get(node_id).map(|node| node.local_name.as_str())
    }

    fn has_class(&self, node_id: NodeId, class: &str) -> bool {
        self.nodes
            .get(node_id)
            .is_some_and(|node| node.has_class(class))
    }

    fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(node_id)?.attr(name)
    }

    fn offset_width(&self, node_id: NodeId) -> f32 {
        let Some(node) = self.nodes.get(node_id) else {
            return 0.0;
        };
        let containing_width = match node.parent {
            Some(parent) => self.offset_width(parent),
            None => self.viewport_width,
        };
        match node.style.width {
            Some(width) => width.resolve(containing_width).max(0.0),
            None => containing_width,
        }
    }

    fn offset_height(&mut self, node_id: NodeId) -> Result<f32, TreeError> {
        if !self.nodes.contains(node_id) {
            return Err(TreeError::UnknownNode { node_id });
        }
        let height = measure_height(self, node_id)
            .map_err(|err| TreeError::measurement(node_id, err.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::trace!("Measured element {} height {}", node_id, height);

        Ok(height)
    }

    fn add_class(&mut self, node_id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node_id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.classes.retain(|existing| existing != class);
        }
    }

    fn remove_attr(&mut self, node_id: NodeId, name: &str) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.attrs.retain(|attr| attr.name != name);
        }
    }

    fn set_style(&mut self, node_id: NodeId, property: StyleProperty, value: Option<StyleValue>) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.style.set(property, value);
        }
    }
}
