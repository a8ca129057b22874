//! Integration tests for selection export (deck-export).
//!
//! Drives the full pipeline from host JSON through the orchestrator and
//! checks ordering, positions, fallbacks and the serialized batch.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{selection, SlowRasterizer, ThrowingRasterizer, PNG};
use deck_core::{ElementKind, ExportBatch, ExportError, ImageFormat, ShapeSubtype};
use deck_export::{export_selection, ExportConfig, MemoryRasterizer, NoRasterizer};
use serde_json::json;

// ==========================================================================
// Selection handling
// ==========================================================================

#[tokio::test]
async fn test_empty_selection_produces_no_documents() {
    let err = export_selection(&[], &NoRasterizer, &ExportConfig::default())
        .await
        .expect_err("empty");
    assert!(matches!(err, ExportError::EmptySelection));
    assert_eq!(err.to_string(), "Select a frame to export first");
}

#[tokio::test]
async fn test_rectangle_only_selection_has_no_valid_root() {
    let nodes = selection(json!([
        { "id": "1:1", "name": "Box", "type": "RECTANGLE", "width": 10, "height": 10 }
    ]));
    let err = export_selection(&nodes, &NoRasterizer, &ExportConfig::default())
        .await
        .expect_err("no root");
    assert!(matches!(err, ExportError::NoValidRoot));
}

#[tokio::test]
async fn test_documents_follow_selection_order() {
    let nodes = selection(json!([
        { "id": "3:1", "name": "Third", "type": "FRAME", "width": 100, "height": 50 },
        { "id": "0:9", "name": "Stray", "type": "TEXT", "characters": "x" },
        { "id": "1:1", "name": "First", "type": "GROUP", "width": 10, "height": 10 },
        { "id": "2:1", "name": "Second", "type": "INSTANCE", "width": 10, "height": 10 }
    ]));
    let batch = export_selection(&nodes, &NoRasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let names: Vec<&str> = batch.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Third", "First", "Second"]);
    assert!((batch.aspect_ratio.width - 100.0).abs() < f64::EPSILON);
    assert!((batch.aspect_ratio.height - 50.0).abs() < f64::EPSILON);
}

// ==========================================================================
// Positions and order
// ==========================================================================

#[tokio::test]
async fn test_nested_text_position_is_relative_to_root() {
    let nodes = selection(json!([{
        "id": "1:1", "name": "FrameA", "type": "FRAME",
        "x": 640, "y": 480, "width": 960, "height": 540,
        "children": [{
            "id": "1:2", "name": "Group", "type": "GROUP", "x": 5, "y": 5,
            "children": [{
                "id": "1:3", "name": "Greeting", "type": "TEXT",
                "x": 10, "y": 20, "width": 120, "height": 24,
                "characters": "Hello"
            }]
        }]
    }]));
    let batch = export_selection(&nodes, &NoRasterizer, &ExportConfig::default())
        .await
        .expect("export");

    assert_eq!(batch.documents.len(), 1);
    let document = &batch.documents[0];
    assert_eq!(document.name, "FrameA");
    assert_eq!(document.elements.len(), 1);

    let record = &document.elements[0];
    assert!((record.base.x - 15.0).abs() < 1e-9);
    assert!((record.base.y - 25.0).abs() < 1e-9);
    match &record.kind {
        ElementKind::Text(text) => assert_eq!(text.characters, "Hello"),
        other => panic!("Expected text, got {other:?}"),
    }
}

#[tokio::test]
async fn test_host_transforms_win_over_local_offsets() {
    // The group is rotated by the host; only the absolute transforms are right.
    let nodes = selection(json!([{
        "id": "1:1", "name": "Slide", "type": "FRAME",
        "absoluteTransform": [[1, 0, 100], [0, 1, 100]],
        "children": [{
            "id": "1:2", "name": "Spun", "type": "GROUP", "x": 50, "y": 50, "rotation": 90,
            "absoluteTransform": [[0, 1, 150], [-1, 0, 150]],
            "children": [{
                "id": "1:3", "name": "Label", "type": "TEXT", "x": 10, "y": 0,
                "absoluteTransform": [[0, 1, 150], [-1, 0, 140]],
                "characters": "Tilted"
            }]
        }]
    }]));
    let batch = export_selection(&nodes, &NoRasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let record = &batch.documents[0].elements[0];
    assert!((record.base.x - 50.0).abs() < 1e-9);
    assert!((record.base.y - 40.0).abs() < 1e-9);
    assert!((record.base.rotation - 90.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_paint_order_is_pre_order() {
    let nodes = selection(json!([{
        "id": "1:1", "name": "Root", "type": "FRAME",
        "children": [
            { "id": "2:0", "name": "A", "type": "FRAME",
              "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 } }],
              "children": [
                { "id": "2:1", "name": "A1", "type": "ELLIPSE" },
                { "id": "2:2", "name": "A2", "type": "LINE", "width": 40,
                  "strokes": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0 } }],
                  "strokeWeight": 2, "dashPattern": [4, 2] }
              ] },
            { "id": "3:0", "name": "B", "type": "TEXT", "characters": "b" }
        ]
    }]));
    let batch = export_selection(&nodes, &NoRasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let kinds: Vec<(&str, &str)> = batch.documents[0]
        .elements
        .iter()
        .map(|e| (e.base.name.as_str(), e.kind_name()))
        .collect();
    assert_eq!(
        kinds,
        vec![("A", "shape"), ("A1", "shape"), ("A2", "line"), ("B", "text")]
    );

    let ElementKind::Line(line) = &batch.documents[0].elements[2].kind else {
        panic!("Expected line");
    };
    assert_eq!(line.dash_pattern, Some(vec![4.0, 2.0]));
    assert!((line.end.x - line.start.x - 40.0).abs() < 1e-9);
}

// ==========================================================================
// Fallbacks
// ==========================================================================

fn image_filled_frame() -> serde_json::Value {
    json!([{
        "id": "1:1", "name": "Deck", "type": "FRAME", "width": 800, "height": 600,
        "children": [{
            "id": "1:2", "name": "Hero", "type": "FRAME", "x": 20, "y": 30,
            "width": 400, "height": 300, "cornerRadius": 12,
            "fills": [{ "type": "IMAGE", "imageHash": "abc123", "scaleMode": "FILL" }],
            "strokes": [{ "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } }],
            "strokeWeight": 3,
            "children": [{ "id": "1:3", "name": "Caption", "type": "TEXT", "characters": "Hi" }]
        }]
    }])
}

#[tokio::test]
async fn test_image_frame_raster_failure_falls_back_to_shape() {
    let nodes = selection(image_filled_frame());
    let rasterizer = ThrowingRasterizer::default();
    let batch = export_selection(&nodes, &rasterizer, &ExportConfig::default())
        .await
        .expect("export still succeeds");

    // Hero, then the root snapshot.
    assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 2);
    assert!(batch.documents[0].snapshot.is_none());
    let elements = &batch.documents[0].elements;
    assert_eq!(elements.len(), 2);

    let ElementKind::Shape(shape) = &elements[0].kind else {
        panic!("Expected shape fallback, got {:?}", elements[0].kind);
    };
    assert_eq!(elements[0].base.name, "Hero");
    assert_eq!(shape.subtype, ShapeSubtype::Rectangle);
    assert_eq!(shape.fills.len(), 1);
    assert_eq!(shape.strokes.len(), 1);
    assert!((shape.stroke_weight - 3.0).abs() < f64::EPSILON);
    assert_eq!(elements[1].kind_name(), "text");
}

#[tokio::test]
async fn test_image_frame_raster_success_collapses_children() {
    let nodes = selection(image_filled_frame());
    let rasterizer = MemoryRasterizer::new().with_image("1:2", PNG.to_vec());
    let batch = export_selection(&nodes, &rasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let elements = &batch.documents[0].elements;
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].kind_name(), "image");
    assert!((elements[0].base.x - 20.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_root_snapshot_rides_alongside_the_records() {
    let nodes = selection(image_filled_frame());
    let rasterizer = MemoryRasterizer::new().with_image("1:1", PNG.to_vec());
    let batch = export_selection(&nodes, &rasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let document = &batch.documents[0];
    let snapshot = document.snapshot.as_ref().expect("snapshot");
    assert_eq!(snapshot.bytes, PNG.to_vec());
    assert_eq!(snapshot.format, ImageFormat::Png);
    // Hero has no image of its own here, so it still falls back.
    let names: Vec<&str> = document.elements.iter().map(|e| e.base.name.as_str()).collect();
    assert_eq!(names, vec!["Hero", "Caption"]);
}

#[tokio::test]
async fn test_disabled_snapshot_skips_root_rasterization() {
    let nodes = selection(image_filled_frame());
    let rasterizer = ThrowingRasterizer::default();
    let config = ExportConfig {
        root_snapshot: false,
        ..ExportConfig::default()
    };
    let batch = export_selection(&nodes, &rasterizer, &config)
        .await
        .expect("export");

    assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 1);
    assert!(batch.documents[0].snapshot.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_slow_rasterizer_cannot_hang_the_batch() {
    let nodes = selection(json!([{
        "id": "1:1", "name": "Root", "type": "FRAME",
        "children": [{ "id": "1:2", "name": "Burst", "type": "STAR", "pointCount": 7 }]
    }]));
    let config = ExportConfig {
        raster_timeout: Duration::from_secs(1),
        ..ExportConfig::default()
    };
    let rasterizer = SlowRasterizer {
        delay: Duration::from_secs(120),
    };
    let batch = export_selection(&nodes, &rasterizer, &config)
        .await
        .expect("export");

    assert!(batch.documents[0].snapshot.is_none());
    let ElementKind::Shape(shape) = &batch.documents[0].elements[0].kind else {
        panic!("Expected shape fallback");
    };
    assert_eq!(shape.subtype, ShapeSubtype::Star);
    assert_eq!(shape.point_count, Some(7));
}

// ==========================================================================
// Serialization
// ==========================================================================

#[tokio::test]
async fn test_batch_json_carries_images_and_round_trips() {
    let nodes = selection(image_filled_frame());
    let rasterizer = MemoryRasterizer::new().with_image("1:2", PNG.to_vec());
    let batch = export_selection(&nodes, &rasterizer, &ExportConfig::default())
        .await
        .expect("export");

    let json = batch.to_json().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    let image = &value["documents"][0]["elements"][0];
    assert_eq!(image["type"], "image");
    assert_eq!(image["data"]["format"], "png");
    assert_eq!(image["data"]["bytes"], "iVBORw0KGgo=");
    assert_eq!(value["aspectRatio"]["width"], json!(800.0));
    assert!(value["documents"][0].get("snapshot").is_none());

    let back = ExportBatch::from_json(&json).expect("deserialize");
    assert_eq!(back, batch);
}
