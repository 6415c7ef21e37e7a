//! Image loading collaborator

use crate::NodeId;

/// Attribute holding the deferred image source
pub const DATA_SRC_ATTR: &str = "data-src";

/// Marker attribute present while an image waits to be loaded
pub const DATA_LOAD_ATTR: &str = "data-load";

/// Attribute describing intrinsic image size as `<width>x<height>`
pub const DIMENSIONS_ATTR: &str = "data-image-dimensions";

/// Placeholder transition used while an image loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// No fill/fit treatment, the image is displayed as-is
    #[default]
    None,
    Fill,
    Fit,
}

/// Options handed to an [`ImageLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageLoadOptions {
    pub mode: LoadMode,
    /// Whether the image source should actually be requested
    pub load: bool,
}

impl ImageLoadOptions {
    /// Request the image once, without a placeholder transition
    pub const fn request_once() -> Self {
        Self {
            mode: LoadMode::None,
            load: true,
        }
    }
}

/// Triggers the fetch and display of an image element.
///
/// Loading is fire-and-forget: callers never wait for completion.
pub trait ImageLoader: Send + Sync {
    fn load(&self, image: NodeId, options: ImageLoadOptions);
}

/// An [`ImageLoader`] that ignores every request
pub struct DummyImageLoader;

impl ImageLoader for DummyImageLoader {
    fn load(&self, _image: NodeId, _options: ImageLoadOptions) {}
}
