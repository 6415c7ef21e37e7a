use autocolumns_traits::{NodeId, StyleProperty, StyleValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Inline style declarations. Only the properties the layout engine writes
/// are modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InlineStyle {
    pub top: Option<StyleValue>,
    pub left: Option<StyleValue>,
    pub width: Option<StyleValue>,
    pub height: Option<StyleValue>,
    pub padding_bottom: Option<StyleValue>,
}

impl InlineStyle {
    pub fn get(&self, property: StyleProperty) -> Option<StyleValue> {
        match property {
            StyleProperty::Top => self.top,
            StyleProperty::Left => self.left,
            StyleProperty::Width => self.width,
            StyleProperty::Height => self.height,
            StyleProperty::PaddingBottom => self.padding_bottom,
        }
    }

    pub fn set(&mut self, property: StyleProperty, value: Option<StyleValue>) {
        let slot = match property {
            StyleProperty::Top => &mut self.top,
            StyleProperty::Left => &mut self.left,
            StyleProperty::Width => &mut self.width,
            StyleProperty::Height => &mut self.height,
            StyleProperty::PaddingBottom => &mut self.padding_bottom,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize as a `style` attribute value, e.g. `top: 0px; width: 330px`
    pub fn to_css_text(&self) -> String {
        [
            StyleProperty::Top,
            StyleProperty::Left,
            StyleProperty::Width,
            StyleProperty::Height,
            StyleProperty::PaddingBottom,
        ]
        .into_iter()
        .filter_map(|property| {
            self.get(property)
                .map(|value| format!("{property}: {value}"))
        })
        .collect::<Vec<_>>()
        .join("; ")
    }
}

/// An element in a [`GridDocument`](crate::GridDocument)
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    /// Lowercase tag name
    pub local_name: String,
    pub classes: Vec<String>,
    pub attrs: Vec<Attribute>,
    pub style: InlineStyle,

    /// Block size of the element's own content. Only used for leaf elements;
    /// elements with children are sized by their children.
    pub content_height: f32,
}

impl ElementNode {
    pub(crate) fn new(id: NodeId, local_name: &str) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            local_name: local_name.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: Vec::new(),
            style: InlineStyle::default(),
            content_height: 0.0,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}
