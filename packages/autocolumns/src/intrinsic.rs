//! Image aspect ratios and the intrinsic padding that reserves their space

use autocolumns_traits::{DIMENSIONS_ATTR, GridTree, NodeId};

use crate::errors::DimensionsError;

/// Aspect ratio (`height / width`) from a `<width>x<height>` descriptor.
///
/// An empty descriptor yields `1.0`: placeholder images receive their
/// dimensions late. Below 1 is landscape, above 1 portrait.
pub fn parse_image_ratio(descriptor: &str) -> Result<f32, DimensionsError> {
    if descriptor.is_empty() {
        return Ok(1.0);
    }

    let (width, height) =
        descriptor
            .split_once('x')
            .ok_or_else(|| DimensionsError::MissingSeparator {
                descriptor: descriptor.to_string(),
            })?;

    let invalid = |axis| DimensionsError::InvalidNumber {
        descriptor: descriptor.to_string(),
        axis,
    };
    let width: f32 = width.trim().parse().map_err(|_| invalid("width"))?;
    let height: f32 = height.trim().parse().map_err(|_| invalid("height"))?;

    if !width.is_finite() || width <= 0.0 {
        return Err(DimensionsError::NonPositiveWidth {
            descriptor: descriptor.to_string(),
        });
    }
    if !height.is_finite() || height < 0.0 {
        return Err(invalid("height"));
    }

    Ok(height / width)
}

/// Aspect ratio of an image element from its dimensions attribute.
/// A missing attribute counts as empty.
pub fn image_ratio<T: GridTree + ?Sized>(
    tree: &T,
    image: NodeId,
) -> Result<f32, DimensionsError> {
    parse_image_ratio(tree.attr(image, DIMENSIONS_ATTR).unwrap_or_default())
}

/// Bottom padding, as a whole percentage of the wrapper width, that reserves
/// space for an image of the given ratio
pub fn intrinsic_padding_percent(ratio: f32) -> f32 {
    (ratio * 100.0).floor()
}
