//! Layout passes over a headless document

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use autocolumns::{
    Autocolumns, AutocolumnsConfig, AutocolumnsError, CHILD_MARKER, ConfigOverrides, GridLayout,
    GridTree, NodeId, ROOT_MARKER, StaticHost, StyleProperty, StyleValue,
};
use autocolumns::traits::TreeError;
use autocolumns_dom::GridDocument;

/// A container of `heights.len()` leaf items in a document of the given width
fn build_grid(viewport_width: f32, heights: &[f32]) -> (GridDocument, StaticHost) {
    let mut doc = GridDocument::new(viewport_width);
    let root = doc.create_element("div");
    let children = heights
        .iter()
        .map(|&height| {
            let item = doc.create_child(root, "div");
            doc.set_content_height(item, height);
            item
        })
        .collect();
    (doc, StaticHost::new(root, children))
}

fn px(doc: &GridDocument, node: usize, property: StyleProperty) -> Option<f32> {
    doc.style_value(node, property).and_then(|value| value.as_px())
}

fn positions(layout: &GridLayout) -> Vec<(f32, f32)> {
    layout.items.iter().map(|item| (item.left, item.top)).collect()
}

#[test]
fn test_three_columns_at_1000px() {
    let (mut doc, host) = build_grid(1000.0, &[100.0, 50.0, 75.0, 20.0, 20.0]);
    let root = host.root;
    let items = host.children.clone();
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let layout = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    assert_eq!(layout.columns, 3);
    assert_eq!(layout.column_width, 330.0);
    assert_eq!(
        positions(&layout),
        vec![
            (0.0, 0.0),
            (335.0, 0.0),
            (670.0, 0.0),
            (335.0, 55.0),
            // Ties go to the column whose bottom was recorded first
            (670.0, 80.0),
        ]
    );
    assert_eq!(layout.height, 100.0);
    assert_eq!(layout.column_bottoms(), vec![100.0, 75.0, 100.0]);

    // Styles written to the elements match the returned layout
    for item in &layout.items {
        assert_eq!(px(&doc, item.node_id, StyleProperty::Width), Some(330.0));
        assert_eq!(px(&doc, item.node_id, StyleProperty::Left), Some(item.left));
        assert_eq!(px(&doc, item.node_id, StyleProperty::Top), Some(item.top));
    }
    assert_eq!(px(&doc, root, StyleProperty::Height), Some(100.0));

    assert!(doc.has_class(root, ROOT_MARKER));
    assert!(items.iter().all(|&item| doc.has_class(item, CHILD_MARKER)));
}

#[test]
fn test_empty_container() {
    let (mut doc, host) = build_grid(1000.0, &[]);
    let root = host.root;
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let layout = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    assert_eq!(layout.columns, 3);
    assert!(layout.items.is_empty());
    assert_eq!(layout.height, 0.0);
    assert_eq!(px(&doc, root, StyleProperty::Height), Some(0.0));
}

#[test]
fn test_narrow_container_uses_one_column() {
    let (mut doc, host) = build_grid(500.0, &[40.0]);
    let root = host.root;
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let layout = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    assert_eq!(layout.columns, 1);
    assert_eq!(layout.column_width, 500.0);
    assert_eq!(positions(&layout), vec![(0.0, 0.0)]);
    assert_eq!(px(&doc, root, StyleProperty::Height), Some(40.0));
}

#[test]
fn test_items_fill_the_shortest_column() {
    let heights: Vec<f32> = (0..40u32).map(|i| 20.0 + ((i * 37) % 90) as f32).collect();
    let (mut doc, host) = build_grid(1280.0, &heights);
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let layout = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();
    assert_eq!(layout.columns, 4);

    let gutter = grid.config().gutter;
    let mut bottoms = vec![0.0_f32; layout.columns];
    for (index, item) in layout.items.iter().enumerate() {
        if index < layout.columns {
            assert_eq!(item.column, index);
            assert_eq!(item.top, 0.0);
        } else {
            let shortest = bottoms.iter().copied().fold(f32::INFINITY, f32::min);
            assert_eq!(bottoms[item.column], shortest, "item {index} skipped a shorter column");
            assert_eq!(item.top, shortest + gutter);
        }
        bottoms[item.column] = item.bottom();
    }

    let tallest = bottoms.iter().copied().fold(0.0, f32::max);
    assert_eq!(layout.height, tallest);
}

#[test]
fn test_layout_is_deterministic() {
    let (mut doc, host) = build_grid(1000.0, &[80.0, 30.0, 60.0, 45.0, 45.0, 10.0]);
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let first = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();
    grid.reset(&mut doc);
    let second = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_reset_clears_item_styles() {
    let (mut doc, host) = build_grid(1000.0, &[10.0, 20.0]);
    let items = host.children.clone();
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    // Nothing to clear yet
    grid.reset(&mut doc);
    assert!(items.iter().all(|&item| doc.inline_style(item).unwrap().is_empty()));

    grid.layout(&mut doc, ConfigOverrides::default()).unwrap();
    grid.reset(&mut doc);
    grid.reset(&mut doc);
    assert!(items.iter().all(|&item| doc.inline_style(item).unwrap().is_empty()));
    assert!(items.iter().all(|&item| doc.has_class(item, CHILD_MARKER)));
}

#[test]
fn test_destroy_restores_elements() {
    let (mut doc, host) = build_grid(1000.0, &[10.0, 20.0, 30.0]);
    let root = host.root;
    let items = host.children.clone();
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();
    grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    let host = grid.destroy(&mut doc);

    assert_eq!(host.children, items);
    assert!(doc.inline_style(root).unwrap().is_empty());
    assert!(!doc.has_class(root, ROOT_MARKER));
    for &item in &items {
        assert!(doc.inline_style(item).unwrap().is_empty());
        assert!(!doc.has_class(item, CHILD_MARKER));
    }
}

#[test]
fn test_destroy_keeps_marker_declared_as_identifier() {
    let (mut doc, host) = build_grid(1000.0, &[10.0]);
    let root = host.root;
    let item = host.children[0];
    let config = AutocolumnsConfig {
        root_class: Some(ROOT_MARKER.to_string()),
        child_class: Some("tile".to_string()),
        ..Default::default()
    };
    let mut grid = Autocolumns::new(&mut doc, host, config).unwrap();
    grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    grid.destroy(&mut doc);

    assert!(doc.has_class(root, ROOT_MARKER));
    assert!(!doc.has_class(item, CHILD_MARKER));
}

#[test]
fn test_after_child_loaded_runs_once_per_item() {
    let (mut doc, host) = build_grid(1000.0, &[10.0, 20.0, 30.0, 40.0]);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = AutocolumnsConfig {
        after_child_loaded: Some(Arc::new(move |_item: NodeId| {
            counter.fetch_add(1, Ordering::SeqCst);
        })),
        ..Default::default()
    };
    let mut grid = Autocolumns::new(&mut doc, host, config).unwrap();

    grid.layout(&mut doc, ConfigOverrides::default()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 4);

    grid.after_resize(&mut doc).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}

#[test]
fn test_overrides_persist() {
    let (mut doc, host) = build_grid(1000.0, &[10.0, 20.0, 30.0]);
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let layout = grid
        .layout(
            &mut doc,
            ConfigOverrides {
                max_columns: Some(2),
                gutter: Some(10.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.column_width, 495.0);

    let layout = grid.after_resize(&mut doc).unwrap();
    assert_eq!(layout.columns, 2);
    assert_eq!(grid.config().max_columns, 2);
    assert_eq!(grid.config().gutter, 10.0);
}

#[test]
fn test_after_resize_follows_container_width() {
    let (mut doc, host) = build_grid(1000.0, &[100.0, 50.0, 75.0]);
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let wide = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();
    assert_eq!(wide.columns, 3);

    doc.set_viewport_width(500.0);
    let narrow = grid.after_resize(&mut doc).unwrap();

    assert_eq!(narrow.columns, 1);
    assert_eq!(narrow.column_width, 500.0);
    assert_eq!(
        positions(&narrow),
        vec![(0.0, 0.0), (0.0, 105.0), (0.0, 160.0)]
    );
    assert_eq!(narrow.height, 235.0);
}

#[test]
fn test_invalid_wrapper_selector_is_rejected() {
    let (mut doc, host) = build_grid(1000.0, &[10.0]);
    let root = host.root;
    let config = AutocolumnsConfig {
        image_wrapper_selector: Some("div >".to_string()),
        ..Default::default()
    };

    let result = Autocolumns::new(&mut doc, host, config);

    assert!(matches!(result, Err(AutocolumnsError::Selector(_))));
    assert!(!doc.has_class(root, ROOT_MARKER));
}

#[test]
fn test_measurement_failure_stops_layout() {
    let (mut doc, mut host) = build_grid(1000.0, &[10.0]);
    let root = host.root;
    host.children.push(999);
    let mut grid = Autocolumns::new(&mut doc, host, AutocolumnsConfig::default()).unwrap();

    let result = grid.layout(&mut doc, ConfigOverrides::default());

    assert_eq!(
        result,
        Err(AutocolumnsError::Tree(TreeError::UnknownNode { node_id: 999 }))
    );
    assert_eq!(doc.style_value(root, StyleProperty::Height), None);
}

#[test]
fn test_percent_width_container() {
    let mut doc = GridDocument::new(1000.0);
    let page = doc.create_element("main");
    let root = doc.create_child(page, "div");
    doc.set_style(root, StyleProperty::Width, Some(StyleValue::Percent(50.0)));
    let item = doc.create_child(root, "div");
    doc.set_content_height(item, 10.0);

    let mut grid = Autocolumns::new(
        &mut doc,
        StaticHost::new(root, vec![item]),
        AutocolumnsConfig::default(),
    )
    .unwrap();
    let layout = grid.layout(&mut doc, ConfigOverrides::default()).unwrap();

    assert_eq!(layout.columns, 1);
    assert_eq!(layout.column_width, 500.0);
}
