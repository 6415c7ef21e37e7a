//! A headless element tree for Autocolumns
//!
//! [`GridDocument`] is a small slab-backed element tree implementing
//! [`GridTree`](autocolumns_traits::GridTree). Element heights are computed by
//! mirroring a subtree into [`taffy`] block layout, so percentage padding set
//! by the layout engine reserves space exactly as a browser would.
//!
//! It is intended for tests, server-side precomputation and any host that
//! does not have a real DOM at hand.

mod document;
mod image;
mod measure;
mod node;

pub use document::GridDocument;
pub use image::{ChannelImageLoader, IMAGE_LOADED_ATTR, ImageRequest};
pub use node::{Attribute, ElementNode, InlineStyle};
