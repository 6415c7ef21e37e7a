//! Autocolumns: responsive masonry columns
//!
//! Items of varying height are distributed over as many equal-width columns
//! as the container allows. The first row fills left to right, after which
//! each item drops into whichever column currently ends highest, one gutter
//! below its last item.
//!
//! The engine is independent of any particular element tree. Hosts implement
//! [`GridTree`] for their elements and [`LayoutHost`] to expose the container
//! and its items; the `autocolumns-dom` crate provides a headless tree for
//! tests and precomputation.
//!
//! Images inside items can be reserved before they load: give the image a
//! `data-src` and a `data-image-dimensions="<width>x<height>"` attribute and
//! configure an `image_wrapper_selector`. The wrapper's bottom padding is set
//! to the image's aspect ratio so the item already has its final height.

mod columns;
mod config;
mod engine;
mod errors;
mod intrinsic;
mod layout_output;
mod packer;

pub use autocolumns_traits as traits;
pub use autocolumns_traits::{
    DummyImageLoader, GridTree, ImageLoadOptions, ImageLoader, LayoutHost, LifecycleHook, LoadMode,
    NodeId, Selector, StaticHost, StyleProperty, StyleValue,
};

pub use columns::{final_column_width, number_of_columns};
pub use config::{
    AutocolumnsConfig, CHILD_MARKER, ChildCallback, ConfigOverrides, HookCallback, IMAGE_MARKER,
    LayoutHooks, ROOT_MARKER,
};
pub use engine::Autocolumns;
pub use errors::{AutocolumnsError, AutocolumnsResult, DimensionsError};
pub use intrinsic::{image_ratio, intrinsic_padding_percent, parse_image_ratio};
pub use layout_output::{GridLayout, PlacedItem};
pub use packer::{ColumnBottom, ColumnPacker, ColumnTracker, Slot};
