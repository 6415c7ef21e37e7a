//! Shared traits and types for Autocolumns
//!
//! The layout engine in [`autocolumns`](https://docs.rs/autocolumns) never owns the elements it
//! positions. Everything it needs from the outside world goes through the seams defined here:
//!
//!  - [`GridTree`](tree::GridTree): read, measure and mutate elements addressed by [`NodeId`].
//!  - [`LayoutHost`](host::LayoutHost): supplies the container and its fixed set of items, and
//!    receives lifecycle notifications.
//!  - [`ImageLoader`](image::ImageLoader): triggers the fetch of a lazily loaded image.

pub mod host;
pub mod image;
pub mod selector;
pub mod style;
pub mod tree;

/// Identifier of an element inside a [`GridTree`](tree::GridTree)
pub type NodeId = usize;

pub use host::{LayoutHost, LifecycleHook, StaticHost};
pub use image::{
    DATA_LOAD_ATTR, DATA_SRC_ATTR, DIMENSIONS_ATTR, DummyImageLoader, ImageLoadOptions, ImageLoader,
    LoadMode,
};
pub use selector::{Selector, SelectorError};
pub use style::{StyleProperty, StyleValue};
pub use tree::{GridTree, TreeError};
