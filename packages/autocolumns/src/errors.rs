//! Error types for the layout engine

use autocolumns_traits::{SelectorError, TreeError};
use thiserror::Error;

/// Failure while parsing an image dimensions descriptor (`<width>x<height>`)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DimensionsError {
    #[error("Image dimensions `{descriptor}` are not of the form <width>x<height>")]
    MissingSeparator { descriptor: String },

    #[error("Image dimensions `{descriptor}` have a non-numeric {axis}")]
    InvalidNumber {
        descriptor: String,
        axis: &'static str,
    },

    #[error("Image dimensions `{descriptor}` have a zero or negative width")]
    NonPositiveWidth { descriptor: String },
}

/// Unified error for engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AutocolumnsError {
    /// The configured image wrapper selector could not be parsed
    #[error("Invalid image wrapper selector: {0}")]
    Selector(#[from] SelectorError),

    /// The element tree failed to measure an item
    #[error("Element tree error: {0}")]
    Tree(#[from] TreeError),
}

pub type AutocolumnsResult<T> = Result<T, AutocolumnsError>;
