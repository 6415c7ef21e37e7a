//! Height measurement by mirroring a subtree into taffy block layout

use autocolumns_traits::{GridTree, NodeId, StyleValue};
use taffy::style_helpers::{auto, length, percent, zero};
use taffy::{
    AvailableSpace, Dimension, Display, LengthPercentage, Rect, Size, Style, TaffyError, TaffyTree,
};

use crate::GridDocument;
use crate::node::ElementNode;

/// Compute the border-box height of `node_id` at its current offset width
pub(crate) fn measure_height(doc: &GridDocument, node_id: NodeId) -> Result<f32, TaffyError> {
    let width = doc.offset_width(node_id);

    let mut taffy: TaffyTree<()> = TaffyTree::new();
    let root = mirror_subtree(doc, &mut taffy, node_id, Some(width))?;
    taffy.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::MaxContent,
        },
    )?;

    Ok(taffy.layout(root)?.size.height)
}

fn mirror_subtree(
    doc: &GridDocument,
    taffy: &mut TaffyTree<()>,
    node_id: NodeId,
    known_width: Option<f32>,
) -> Result<taffy::NodeId, TaffyError> {
    let node = &doc.nodes[node_id];
    let children = node
        .children
        .iter()
        .map(|&child| mirror_subtree(doc, taffy, child, None))
        .collect::<Result<Vec<_>, _>>()?;

    let style = block_style(node, known_width, children.is_empty());
    if children.is_empty() {
        taffy.new_leaf(style)
    } else {
        taffy.new_with_children(style, &children)
    }
}

fn block_style(node: &ElementNode, known_width: Option<f32>, is_leaf: bool) -> Style {
    let width: Dimension = match known_width {
        Some(width) => length(width),
        None => node.style.width.map_or(auto(), dimension),
    };
    let height: Dimension = match node.style.height {
        Some(value) => dimension(value),
        None if is_leaf => length(node.content_height),
        None => auto(),
    };
    let padding_bottom: LengthPercentage = match node.style.padding_bottom {
        Some(StyleValue::Px(px)) => length(px),
        Some(StyleValue::Percent(pct)) => percent(pct / 100.0),
        None => zero(),
    };

    Style {
        display: Display::Block,
        size: Size { width, height },
        padding: Rect {
            left: zero(),
            right: zero(),
            top: zero(),
            bottom: padding_bottom,
        },
        ..Default::default()
    }
}

fn dimension(value: StyleValue) -> Dimension {
    match value {
        StyleValue::Px(px) => length(px),
        StyleValue::Percent(pct) => percent(pct / 100.0),
    }
}
