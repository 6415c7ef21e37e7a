//! The host that owns a layout container

use crate::NodeId;

/// Points in the layout lifecycle at which the host is notified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleHook {
    BeforeLayout,
    AfterLayout,
    BeforeDestroy,
    AfterDestroy,
}

impl LifecycleHook {
    pub fn name(self) -> &'static str {
        match self {
            LifecycleHook::BeforeLayout => "beforeLayout",
            LifecycleHook::AfterLayout => "afterLayout",
            LifecycleHook::BeforeDestroy => "beforeDestroy",
            LifecycleHook::AfterDestroy => "afterDestroy",
        }
    }
}

/// Supplies the container and item elements a layout operates on.
///
/// The set of items is enumerated once when the engine is constructed and is
/// treated as fixed for the engine's lifetime.
pub trait LayoutHost {
    /// The container whose content width is divided into columns
    fn root_node(&self) -> NodeId;

    /// The direct item children, in layout order
    fn child_nodes(&self) -> Vec<NodeId>;

    /// Called at each [`LifecycleHook`]. The default does nothing.
    fn invoke_hook(&mut self, hook: LifecycleHook, root: NodeId) {
        let _ = (hook, root);
    }
}

/// A host with a fixed container and item list and no hook behaviour
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    pub root: NodeId,
    pub children: Vec<NodeId>,
}

impl StaticHost {
    pub fn new(root: NodeId, children: Vec<NodeId>) -> Self {
        Self { root, children }
    }
}

impl LayoutHost for StaticHost {
    fn root_node(&self) -> NodeId {
        self.root
    }

    fn child_nodes(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}
