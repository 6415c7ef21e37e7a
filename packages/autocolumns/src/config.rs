//! Layout configuration and marker identifiers

use std::fmt;
use std::sync::Arc;

use autocolumns_traits::{LifecycleHook, NodeId};

/// Class added to the layout container
pub const ROOT_MARKER: &str = "autocolumns-wrapper";
/// Class added to every item
pub const CHILD_MARKER: &str = "autocolumns-item-wrapper";
/// Class added to each item's image wrapper
pub const IMAGE_MARKER: &str = "autocolumns-image-wrapper";

/// Lifecycle callback, receives the container
pub type HookCallback = Arc<dyn Fn(NodeId) + Send + Sync>;

/// Per-item callback, receives the item just placed
pub type ChildCallback = Arc<dyn Fn(NodeId) + Send + Sync>;

/// Optional callbacks run at each [`LifecycleHook`], after the host's own hook
#[derive(Clone, Default)]
pub struct LayoutHooks {
    pub before_layout: Option<HookCallback>,
    pub after_layout: Option<HookCallback>,
    pub before_destroy: Option<HookCallback>,
    pub after_destroy: Option<HookCallback>,
}

impl LayoutHooks {
    pub fn get(&self, hook: LifecycleHook) -> Option<&HookCallback> {
        match hook {
            LifecycleHook::BeforeLayout => self.before_layout.as_ref(),
            LifecycleHook::AfterLayout => self.after_layout.as_ref(),
            LifecycleHook::BeforeDestroy => self.before_destroy.as_ref(),
            LifecycleHook::AfterDestroy => self.after_destroy.as_ref(),
        }
    }
}

impl fmt::Debug for LayoutHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutHooks")
            .field("before_layout", &self.before_layout.is_some())
            .field("after_layout", &self.after_layout.is_some())
            .field("before_destroy", &self.before_destroy.is_some())
            .field("after_destroy", &self.after_destroy.is_some())
            .finish()
    }
}

/// Options used when constructing an [`Autocolumns`](crate::Autocolumns) layout.
///
/// Callers override the defaults with struct update syntax:
///
/// ```
/// use autocolumns::AutocolumnsConfig;
///
/// let config = AutocolumnsConfig {
///     gutter: 10.0,
///     image_wrapper_selector: Some(".thumb".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(config.max_columns, 12);
/// ```
#[derive(Clone)]
pub struct AutocolumnsConfig {
    /// Lower bound on the column count
    pub min_columns: usize,
    /// Upper bound on the column count, applied before `min_columns`
    pub max_columns: usize,
    /// Narrowest column the available width is divided into
    pub min_column_width: f32,
    /// Spacing between columns and between stacked items
    pub gutter: f32,
    /// Request pending images while laying out
    pub auto_load_images: bool,
    /// Selector locating each item's image wrapper
    pub image_wrapper_selector: Option<String>,
    /// Called after each item is placed
    pub after_child_loaded: Option<ChildCallback>,
    pub hooks: LayoutHooks,

    /// Identifiers a host may declare for the container, item and image
    /// wrapper. Teardown only removes a marker class when the declared
    /// identifier differs from the marker itself.
    pub root_class: Option<String>,
    pub child_class: Option<String>,
    pub image_class: Option<String>,
}

impl Default for AutocolumnsConfig {
    fn default() -> Self {
        Self {
            min_columns: 1,
            max_columns: 12,
            min_column_width: 300.0,
            gutter: 5.0,
            auto_load_images: false,
            image_wrapper_selector: None,
            after_child_loaded: None,
            hooks: LayoutHooks::default(),
            root_class: None,
            child_class: None,
            image_class: None,
        }
    }
}

impl fmt::Debug for AutocolumnsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocolumnsConfig")
            .field("min_columns", &self.min_columns)
            .field("max_columns", &self.max_columns)
            .field("min_column_width", &self.min_column_width)
            .field("gutter", &self.gutter)
            .field("auto_load_images", &self.auto_load_images)
            .field("image_wrapper_selector", &self.image_wrapper_selector)
            .field("after_child_loaded", &self.after_child_loaded.is_some())
            .field("hooks", &self.hooks)
            .field("root_class", &self.root_class)
            .field("child_class", &self.child_class)
            .field("image_class", &self.image_class)
            .finish()
    }
}

impl AutocolumnsConfig {
    /// Apply per-layout overrides. Overridden values persist for later layouts.
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            min_columns,
            max_columns,
            min_column_width,
            gutter,
            auto_load_images,
            after_child_loaded,
        } = overrides;

        if let Some(min_columns) = min_columns {
            self.min_columns = min_columns;
        }
        if let Some(max_columns) = max_columns {
            self.max_columns = max_columns;
        }
        if let Some(min_column_width) = min_column_width {
            self.min_column_width = min_column_width;
        }
        if let Some(gutter) = gutter {
            self.gutter = gutter;
        }
        if let Some(auto_load_images) = auto_load_images {
            self.auto_load_images = auto_load_images;
        }
        if after_child_loaded.is_some() {
            self.after_child_loaded = after_child_loaded;
        }
    }

    pub(crate) fn removes_marker(configured: Option<&str>, marker: &str) -> bool {
        configured != Some(marker)
    }
}

/// Options that may be changed when requesting a layout
#[derive(Clone, Default)]
pub struct ConfigOverrides {
    pub min_columns: Option<usize>,
    pub max_columns: Option<usize>,
    pub min_column_width: Option<f32>,
    pub gutter: Option<f32>,
    pub auto_load_images: Option<bool>,
    pub after_child_loaded: Option<ChildCallback>,
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("min_columns", &self.min_columns)
            .field("max_columns", &self.max_columns)
            .field("min_column_width", &self.min_column_width)
            .field("gutter", &self.gutter)
            .field("auto_load_images", &self.auto_load_images)
            .field("after_child_loaded", &self.after_child_loaded.is_some())
            .finish()
    }
}
