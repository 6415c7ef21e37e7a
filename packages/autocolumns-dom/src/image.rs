use std::sync::Arc;

use autocolumns_traits::{DATA_SRC_ATTR, GridTree, ImageLoadOptions, ImageLoader, NodeId};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::GridDocument;

/// Attribute set on an image once its deferred source has been promoted
pub const IMAGE_LOADED_ATTR: &str = "data-image-loaded";

/// A load request recorded by [`ChannelImageLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRequest {
    pub node_id: NodeId,
    pub options: ImageLoadOptions,
}

/// An [`ImageLoader`] that forwards requests over an unbounded channel.
///
/// The layout engine runs synchronously and never waits on image loads, so
/// requests are queued and applied by the owner of the document later, see
/// [`GridDocument::apply_image_requests`].
pub struct ChannelImageLoader {
    sender: UnboundedSender<ImageRequest>,
}

impl ChannelImageLoader {
    pub fn new() -> (Self, UnboundedReceiver<ImageRequest>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn shared() -> (Arc<dyn ImageLoader>, UnboundedReceiver<ImageRequest>) {
        let (loader, receiver) = Self::new();
        (Arc::new(loader), receiver)
    }
}

impl ImageLoader for ChannelImageLoader {
    fn load(&self, image: NodeId, options: ImageLoadOptions) {
        let request = ImageRequest {
            node_id: image,
            options,
        };
        if self.sender.send(request).is_err() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Dropped load request for image {}: receiver closed", image);
        }
    }
}

impl GridDocument {
    /// Drain queued image requests, promoting each requested image's
    /// `data-src` to `src`. Returns the number of images started.
    pub fn apply_image_requests(
        &mut self,
        receiver: &mut UnboundedReceiver<ImageRequest>,
    ) -> usize {
        let mut started = 0;
        while let Ok(request) = receiver.try_recv() {
            if !request.options.load {
                continue;
            }
            let Some(source) = self
                .attr(request.node_id, DATA_SRC_ATTR)
                .map(str::to_string)
            else {
                continue;
            };
            self.set_attr(request.node_id, "src", &source);
            self.set_attr(request.node_id, IMAGE_LOADED_ATTR, "");
            started += 1;

            #[cfg(feature = "tracing")]
            tracing::debug!("Started loading image {} from {}", request.node_id, source);
        }
        started
    }
}
