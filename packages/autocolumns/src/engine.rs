use std::sync::Arc;

use autocolumns_traits::{
    DATA_LOAD_ATTR, DummyImageLoader, GridTree, ImageLoadOptions, ImageLoader, LayoutHost,
    LifecycleHook, NodeId, Selector, StyleProperty, StyleValue,
};

use crate::columns::{final_column_width, number_of_columns};
use crate::config::{AutocolumnsConfig, CHILD_MARKER, ConfigOverrides, IMAGE_MARKER, ROOT_MARKER};
use crate::errors::{AutocolumnsResult, DimensionsError};
use crate::intrinsic::{image_ratio, intrinsic_padding_percent};
use crate::layout_output::{GridLayout, PlacedItem};
use crate::packer::ColumnPacker;

/// Images still waiting for their source
const PENDING_IMAGE_SELECTOR: &str = "img[data-src]";

#[derive(Debug, Clone)]
struct EngineSelectors {
    pending_image: Selector,
    any_image: Selector,
    image_marker: Selector,
}

impl EngineSelectors {
    fn new() -> AutocolumnsResult<Self> {
        Ok(Self {
            pending_image: Selector::parse(PENDING_IMAGE_SELECTOR)?,
            any_image: Selector::parse("img")?,
            image_marker: Selector::class(IMAGE_MARKER),
        })
    }
}

/// Masonry column layout for one container and its fixed set of items.
///
/// The engine never owns elements: every operation takes the [`GridTree`]
/// holding them. Items are enumerated from the [`LayoutHost`] once, at
/// construction.
pub struct Autocolumns<H: LayoutHost> {
    host: H,
    config: AutocolumnsConfig,
    root: NodeId,
    children: Vec<NodeId>,
    selectors: EngineSelectors,
    image_loader: Arc<dyn ImageLoader>,
}

impl<H: LayoutHost> Autocolumns<H> {
    /// Tag the container, items and image wrappers with their marker
    /// classes. No layout happens until [`layout`](Self::layout) is called.
    pub fn new<T: GridTree + ?Sized>(
        tree: &mut T,
        host: H,
        config: AutocolumnsConfig,
    ) -> AutocolumnsResult<Self> {
        Self::with_image_loader(tree, host, config, Arc::new(DummyImageLoader))
    }

    /// Like [`new`](Self::new), with a loader used when
    /// `auto_load_images` is set
    pub fn with_image_loader<T: GridTree + ?Sized>(
        tree: &mut T,
        host: H,
        config: AutocolumnsConfig,
        image_loader: Arc<dyn ImageLoader>,
    ) -> AutocolumnsResult<Self> {
        let image_wrapper_selector = config
            .image_wrapper_selector
            .as_deref()
            .map(Selector::parse)
            .transpose()?;
        let selectors = EngineSelectors::new()?;

        let root = host.root_node();
        let children = host.child_nodes();

        tree.add_class(root, ROOT_MARKER);
        for &child in &children {
            tree.add_class(child, CHILD_MARKER);

            let wrapper = image_wrapper_selector
                .as_ref()
                .and_then(|selector| tree.query_selector(child, selector));
            if let Some(wrapper) = wrapper {
                tree.add_class(wrapper, IMAGE_MARKER);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Initialised autocolumns on node {} with {} items",
            root,
            children.len()
        );

        Ok(Self {
            host,
            config,
            root,
            children,
            selectors,
            image_loader,
        })
    }

    pub fn config(&self) -> &AutocolumnsConfig {
        &self.config
    }

    pub fn root_node(&self) -> NodeId {
        self.root
    }

    pub fn child_nodes(&self) -> &[NodeId] {
        &self.children
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Column count for a container of `wrapper_width` under the current config
    pub fn number_of_columns(&self, wrapper_width: f32) -> usize {
        number_of_columns(
            wrapper_width,
            self.config.min_column_width,
            self.config.gutter,
            self.config.min_columns,
            self.config.max_columns,
        )
    }

    /// Width of each of `columns` columns in a container of `wrapper_width`
    pub fn final_column_width(&self, wrapper_width: f32, columns: usize) -> f32 {
        final_column_width(wrapper_width, columns, self.config.gutter)
    }

    /// Aspect ratio of an image element, see [`parse_image_ratio`](crate::parse_image_ratio)
    pub fn image_ratio<T: GridTree + ?Sized>(
        &self,
        tree: &T,
        image: NodeId,
    ) -> Result<f32, DimensionsError> {
        image_ratio(tree, image)
    }

    /// Position every item and size the container.
    ///
    /// `overrides` are merged into the stored configuration first and stay in
    /// effect for later passes. If measuring an item fails the pass stops:
    /// items already visited keep their new styles and the container height
    /// is left untouched.
    pub fn layout<T: GridTree + ?Sized>(
        &mut self,
        tree: &mut T,
        overrides: ConfigOverrides,
    ) -> AutocolumnsResult<GridLayout> {
        self.config.merge(overrides);
        self.invoke_hook(LifecycleHook::BeforeLayout);

        let wrapper_width = tree.offset_width(self.root);
        let columns = self.number_of_columns(wrapper_width);
        let column_width = self.final_column_width(wrapper_width, columns);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Laying out {} items in {} columns of {}px (container {}px)",
            self.children.len(),
            columns,
            column_width,
            wrapper_width
        );

        let mut packer = ColumnPacker::new(columns, column_width, self.config.gutter);
        let mut items = Vec::with_capacity(self.children.len());

        for &item in &self.children {
            tree.set_style(item, StyleProperty::Width, Some(StyleValue::Px(column_width)));
            self.prepare_image(tree, item);

            let placed = packer.place_with(|slot| {
                tree.set_style(item, StyleProperty::Top, Some(StyleValue::Px(slot.top)));
                tree.set_style(item, StyleProperty::Left, Some(StyleValue::Px(slot.left)));
                tree.offset_height(item)
            });
            let (slot, height) = placed.inspect_err(|_err| {
                #[cfg(feature = "tracing")]
                tracing::warn!("Layout stopped at item {}: {}", item, _err);
            })?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                "Placed item {} in column {} at ({}, {}) height {}",
                item,
                slot.column,
                slot.left,
                slot.top,
                height
            );

            if let Some(after_child_loaded) = &self.config.after_child_loaded {
                after_child_loaded(item);
            }

            items.push(PlacedItem {
                node_id: item,
                column: slot.column,
                left: slot.left,
                top: slot.top,
                height,
            });
        }

        let height = packer.height();
        tree.set_style(self.root, StyleProperty::Height, Some(StyleValue::Px(height)));
        self.invoke_hook(LifecycleHook::AfterLayout);

        Ok(GridLayout {
            columns,
            column_width,
            height,
            items,
        })
    }

    /// Clear item positions, widths and image wrapper padding. Safe to call
    /// before any layout.
    pub fn reset<T: GridTree + ?Sized>(&self, tree: &mut T) {
        for &item in &self.children {
            if let Some(wrapper) = tree.query_selector(item, &self.selectors.image_marker) {
                tree.set_style(wrapper, StyleProperty::PaddingBottom, None);
            }
            tree.set_style(item, StyleProperty::Top, None);
            tree.set_style(item, StyleProperty::Left, None);
            tree.set_style(item, StyleProperty::Width, None);
        }
    }

    /// Recompute from the container's current width. Debouncing resize
    /// events is the caller's concern.
    pub fn after_resize<T: GridTree + ?Sized>(
        &mut self,
        tree: &mut T,
    ) -> AutocolumnsResult<GridLayout> {
        self.reset(tree);
        self.layout(tree, ConfigOverrides::default())
    }

    /// Undo every mutation made by the engine and hand the host back.
    pub fn destroy<T: GridTree + ?Sized>(mut self, tree: &mut T) -> H {
        self.invoke_hook(LifecycleHook::BeforeDestroy);
        self.reset(tree);
        tree.set_style(self.root, StyleProperty::Height, None);

        if AutocolumnsConfig::removes_marker(self.config.root_class.as_deref(), ROOT_MARKER) {
            tree.remove_class(self.root, ROOT_MARKER);
        }
        let remove_child =
            AutocolumnsConfig::removes_marker(self.config.child_class.as_deref(), CHILD_MARKER);
        let remove_image =
            AutocolumnsConfig::removes_marker(self.config.image_class.as_deref(), IMAGE_MARKER);
        for &item in &self.children {
            if remove_child {
                tree.remove_class(item, CHILD_MARKER);
            }
            if !remove_image {
                continue;
            }
            if let Some(wrapper) = tree.query_selector(item, &self.selectors.image_marker) {
                tree.remove_class(wrapper, IMAGE_MARKER);
            }
        }

        self.invoke_hook(LifecycleHook::AfterDestroy);

        #[cfg(feature = "tracing")]
        tracing::debug!("Destroyed autocolumns on node {}", self.root);

        self.host
    }

    // Reserve space for a pending image and optionally start loading it
    fn prepare_image<T: GridTree + ?Sized>(&self, tree: &mut T, item: NodeId) {
        let Some(image) = tree.query_selector(item, &self.selectors.pending_image) else {
            return;
        };
        tree.remove_attr(image, DATA_LOAD_ATTR);

        if let Some(wrapper) = tree.query_selector(item, &self.selectors.image_marker) {
            let source = tree
                .query_selector(wrapper, &self.selectors.any_image)
                .unwrap_or(image);
            self.set_intrinsic_padding(tree, wrapper, source);
        }

        if self.config.auto_load_images {
            self.image_loader.load(image, ImageLoadOptions::request_once());
        }
    }

    fn set_intrinsic_padding<T: GridTree + ?Sized>(
        &self,
        tree: &mut T,
        wrapper: NodeId,
        image: NodeId,
    ) {
        let ratio = match image_ratio(&*tree, image) {
            Ok(ratio) => ratio,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("{} on image {}, reserving a square", _err, image);
                1.0
            }
        };
        tree.set_style(
            wrapper,
            StyleProperty::PaddingBottom,
            Some(StyleValue::Percent(intrinsic_padding_percent(ratio))),
        );
    }

    fn invoke_hook(&mut self, hook: LifecycleHook) {
        self.host.invoke_hook(hook, self.root);
        if let Some(callback) = self.config.hooks.get(hook) {
            callback(self.root);
        }
    }
}
