use chart_editor::api::{
    ChartConfig, ChartKind, EDITOR_SNAPSHOT_JSON_SCHEMA_V1, EditorSnapshot, PlotX,
};
use chart_editor::core::DataTable;
use chart_editor::host::RecordingSink;
use chart_editor::interaction::{DragTarget, InteractionMode};
use chart_editor::render::NullRenderer;
use chart_editor::{ChartEditor, ChartError};
use serde_json::json;

fn table(value: serde_json::Value) -> DataTable {
    serde_json::from_value(value).expect("table")
}

fn bar_editor() -> ChartEditor<NullRenderer> {
    let config = ChartConfig::new(
        ChartKind::VerticalBar,
        "chart1",
        "cat",
        table(json!([{ "cat": "A", "v": 10 }, { "cat": "B", "v": -5 }])),
    )
    .with_value_field("v")
    .with_draggable("v", true)
    .with_value_axis(-20.0, 20.0);
    ChartEditor::mount(config, NullRenderer::default(), RecordingSink::new()).expect("mount")
}

#[test]
fn chart_config_json_roundtrip() {
    let config = ChartConfig::new(
        ChartKind::Scatter,
        "points",
        "x",
        table(json!([{ "x": 1.5, "y": 2.25 }])),
    )
    .with_value_field("y")
    .with_trend("y", 2)
    .with_draggable("y", true);

    let json = serde_json::to_string_pretty(&config).expect("config should serialize");
    let restored = ChartConfig::from_json_str(&json).expect("config should deserialize");

    assert_eq!(restored, config);
}

#[test]
fn snapshot_reports_categories_and_rows() {
    let editor = bar_editor();
    let snapshot = editor.snapshot();

    assert_eq!(snapshot.kind, ChartKind::VerticalBar);
    assert_eq!(snapshot.host_id, "chart1");
    assert_eq!(
        snapshot.categories,
        Some(vec!["A".to_owned(), "B".to_owned()])
    );
    assert!(snapshot.x_domain.is_none());
    assert_eq!(snapshot.value_domain, (-20.0, 20.0));
    assert_eq!(snapshot.rows.len(), 2);
    assert_eq!(snapshot.rows[1].x, PlotX::Category("B".to_owned()));
    assert_eq!(snapshot.interaction_mode, InteractionMode::Idle);
    assert!(snapshot.last_change.is_none());
}

#[test]
fn snapshot_tracks_an_active_drag() {
    let mut editor = bar_editor();
    editor.begin_drag("v", 1).expect("drag");

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.interaction_mode, InteractionMode::Dragging);
    assert_eq!(snapshot.drag_target, Some(DragTarget::new("v", 1)));
}

#[test]
fn snapshot_json_roundtrip() {
    let mut editor = bar_editor();
    let (x, y) = editor
        .point_position("v", 0)
        .expect("position")
        .expect("handle");
    editor.pointer_down(x, y).expect("down");
    let target = editor.value_to_pixel(17.0).expect("pixel");
    editor.pointer_move(x, target).expect("move");
    editor.pointer_up().expect("up");

    let json = editor
        .snapshot_json_pretty()
        .expect("snapshot should serialize");
    let decoded: EditorSnapshot =
        serde_json::from_str(&json).expect("snapshot json should deserialize");

    assert_eq!(decoded.rows[0].values.get("v"), Some(&17.0));
    let change = decoded.last_change.expect("last change");
    assert_eq!(change.index, 0);
    assert_eq!(change.field, "v");
}

#[test]
fn versioned_contract_and_bare_snapshot_both_parse() {
    let editor = bar_editor();
    let snapshot = editor.snapshot();

    let versioned = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    let value: serde_json::Value = serde_json::from_str(&versioned).expect("json");
    assert_eq!(value["schema_version"], json!(EDITOR_SNAPSHOT_JSON_SCHEMA_V1));

    let from_contract = EditorSnapshot::from_json_compat_str(&versioned).expect("contract");
    let bare = editor.snapshot_json_pretty().expect("bare");
    let from_bare = EditorSnapshot::from_json_compat_str(&bare).expect("bare snapshot");

    assert_eq!(from_contract.host_id, "chart1");
    assert_eq!(from_contract.categories, from_bare.categories);
    assert_eq!(from_contract.rows, from_bare.rows);
}

#[test]
fn unknown_contract_versions_are_rejected() {
    let editor = bar_editor();
    let versioned = editor
        .snapshot()
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    let bumped = versioned.replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);

    let err = EditorSnapshot::from_json_compat_str(&bumped).expect_err("version 2");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(EditorSnapshot::from_json_compat_str("{}").is_err());
}
