//! Inline style properties written by the layout engine

use std::fmt;

/// The subset of inline style properties the engine reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Top,
    Left,
    Width,
    Height,
    PaddingBottom,
}

impl StyleProperty {
    /// CSS property name
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Top => "top",
            StyleProperty::Left => "left",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::PaddingBottom => "padding-bottom",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A length value. Pixel values are kept fractional as computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleValue {
    Px(f32),
    Percent(f32),
}

impl StyleValue {
    /// Resolve against a containing length. Percentages are relative to `basis`.
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            StyleValue::Px(px) => px,
            StyleValue::Percent(pct) => basis * pct / 100.0,
        }
    }

    pub fn as_px(self) -> Option<f32> {
        match self {
            StyleValue::Px(px) => Some(px),
            StyleValue::Percent(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(px) => write!(f, "{px}px"),
            StyleValue::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}
